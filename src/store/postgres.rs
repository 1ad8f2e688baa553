//! PostgreSQL implementation of [`Store`].
//!
//! # Atomicity Guarantees
//!
//! `transfer_tx` runs inside one PostgreSQL transaction. Dropping the
//! transaction on any `?` rolls it back, so a failed transfer leaves no
//! trace.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::{Store, StoreError};
use crate::db::DbPool;
use crate::models::{
    account::Account,
    currency::Currency,
    entry::Entry,
    transfer::{Transfer, TransferResult, TransferTxParams},
};

const ACCOUNT_COLUMNS: &str = "id, owner, balance, currency, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Add `amount` (may be negative) to one balance and return the row.
///
/// `UPDATE` takes the row lock, which is held until the surrounding
/// transaction ends.
async fn add_account_balance(
    conn: &mut PgConnection,
    account_id: i64,
    amount: i64,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts SET balance = balance + $1 WHERE id = $2 RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(amount)
    .bind(account_id)
    .fetch_one(conn)
    .await
}

async fn create_entry(
    conn: &mut PgConnection,
    account_id: i64,
    amount: i64,
) -> Result<Entry, sqlx::Error> {
    sqlx::query_as::<_, Entry>(
        "INSERT INTO entries (account_id, amount) VALUES ($1, $2) RETURNING id, account_id, amount, created_at",
    )
    .bind(account_id)
    .bind(amount)
    .fetch_one(conn)
    .await
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_account(
        &self,
        owner: &str,
        currency: Currency,
    ) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (owner, currency, balance) VALUES ($1, $2, 0) RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(owner)
        .bind(currency.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE owner = $1 ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, StoreError> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, account_id, amount, created_at
            FROM entries
            WHERE account_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        let transfer = sqlx::query_as::<_, Transfer>(
            "SELECT id, from_account_id, to_account_id, amount, created_at FROM transfers WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(transfer)
    }

    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferResult, StoreError> {
        let mut tx = self.pool.begin().await?;

        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (from_account_id, to_account_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, from_account_id, to_account_id, amount, created_at
            "#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.credit_amount)
        .fetch_one(&mut *tx)
        .await?;

        let from_entry =
            create_entry(&mut tx, params.from_account_id, -params.debit_amount).await?;
        let to_entry = create_entry(&mut tx, params.to_account_id, params.credit_amount).await?;

        let [(first_id, first_delta), (second_id, second_delta)] = params.balance_updates();
        let first = add_account_balance(&mut tx, first_id, first_delta).await?;
        let second = add_account_balance(&mut tx, second_id, second_delta).await?;
        let (from_account, to_account) = if first.id == params.from_account_id {
            (first, second)
        } else {
            (second, first)
        };

        tx.commit().await?;

        Ok(TransferResult {
            transfer,
            from_account,
            to_account,
            from_entry,
            to_entry,
        })
    }
}
