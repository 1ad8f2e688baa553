//! Storage seam between the HTTP layer and the database.
//!
//! Handlers and services talk to a `dyn Store`. [`PgStore`] is the
//! production implementation; [`MemoryStore`] keeps everything in process
//! and is used by the test suites.

use async_trait::async_trait;

use crate::models::{
    account::Account,
    currency::Currency,
    entry::Entry,
    transfer::{Transfer, TransferResult, TransferTxParams},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the lookup.
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The store could not serve the request (used by [`MemoryStore`]).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backing store; used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert an account with a zero balance.
    async fn create_account(&self, owner: &str, currency: Currency)
    -> Result<Account, StoreError>;

    /// Fetch one account by id, [`StoreError::NotFound`] if absent.
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;

    /// Accounts of `owner` ordered by id.
    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError>;

    /// Entries of one account ordered by id.
    async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, StoreError>;

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError>;

    /// Apply a transfer atomically: one transfer row, two entries and both
    /// balance updates commit together or not at all.
    ///
    /// Balances are updated in ascending account id order so that two
    /// opposing transfers between the same accounts lock rows in the same
    /// order.
    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferResult, StoreError>;
}
