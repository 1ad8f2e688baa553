//! Ledger entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One signed balance change on one account.
///
/// Positive amounts are credits, negative amounts are debits. Entries are
/// written inside the transfer transaction and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
