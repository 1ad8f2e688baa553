//! Transfer data models and API request/response types.
//!
//! This module defines:
//! - `Transfer`: Database entity representing a transfer
//! - `TransferRequest`: Request body for `POST /transfers`
//! - `TransferTxParams` / `TransferResult`: input and output of the atomic
//!   store transaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{account::Account, entry::Entry};

/// Represents a transfer record from the database.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,

    /// Amount credited, in minor units of the destination account's currency
    pub amount: i64,

    pub created_at: DateTime<Utc>,
}

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": 1,
///   "to_account_id": 2,
///   "amount": 100
/// }
/// ```
///
/// `amount` is in minor units of the source account's currency.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferRequest {
    /// Field-level validation done before any account is touched.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.from_account_id < 1 {
            return Err(AppError::InvalidRequest(
                "from_account_id must be a positive id".to_string(),
            ));
        }
        if self.to_account_id < 1 {
            return Err(AppError::InvalidRequest(
                "to_account_id must be a positive id".to_string(),
            ));
        }
        if self.amount <= 0 {
            return Err(AppError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }
        if self.from_account_id == self.to_account_id {
            return Err(AppError::InvalidRequest(
                "Cannot transfer to same account".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the store needs to apply one transfer atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,

    /// Debited from the source, in the source currency
    pub debit_amount: i64,

    /// Credited to the destination, in the destination currency
    pub credit_amount: i64,
}

impl TransferTxParams {
    /// `(account_id, delta)` for both balance updates, lower account id
    /// first. Every store applies them in this order so two opposing
    /// transfers take their row locks in the same sequence.
    pub fn balance_updates(&self) -> [(i64, i64); 2] {
        let debit = (self.from_account_id, -self.debit_amount);
        let credit = (self.to_account_id, self.credit_amount);
        if self.from_account_id < self.to_account_id {
            [debit, credit]
        } else {
            [credit, debit]
        }
    }
}

/// Outcome of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}
