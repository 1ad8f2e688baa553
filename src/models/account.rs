//! Account data models and API request types.
//!
//! This module defines:
//! - `Account`: Database entity, also returned to clients as-is
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `PageRequest`: Query parameters shared by the list endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::currency::Currency;

/// Represents an account record from the database.
///
/// # Balance Storage
///
/// Balances are stored as `i64` minor units (cents, paise) to avoid
/// floating-point precision issues. A balance may go negative: transfers
/// do not check for sufficient funds.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: i64,

    /// Username of the owner, matched against the token subject
    pub owner: String,

    /// Current balance in minor units of `currency`
    pub balance: i64,

    /// Stored as the ISO code; rows with an unknown code fail to decode
    #[sqlx(try_from = "String")]
    pub currency: Currency,

    /// Timestamp when account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether `username` owns this account.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// { "currency": "USD" }
/// ```
///
/// The owner is always the authenticated caller and the balance starts at 0.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub currency: Currency,
}

/// Paging parameters for list endpoints (`?page_id=1&page_size=5`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    pub page_id: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub const MIN_PAGE_SIZE: i64 = 5;
    pub const MAX_PAGE_SIZE: i64 = 10;

    /// Check bounds and return `(limit, offset)` for the query.
    pub fn limit_offset(&self) -> Result<(i64, i64), AppError> {
        if self.page_id < 1 {
            return Err(AppError::InvalidRequest(
                "page_id must be at least 1".to_string(),
            ));
        }
        if !(Self::MIN_PAGE_SIZE..=Self::MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::InvalidRequest(format!(
                "page_size must be between {} and {}",
                Self::MIN_PAGE_SIZE,
                Self::MAX_PAGE_SIZE
            )));
        }

        Ok((self.page_size, (self.page_id - 1) * self.page_size))
    }
}
