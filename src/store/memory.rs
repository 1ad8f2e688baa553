//! In-process [`Store`] used by tests.
//!
//! All tables live behind one mutex, so `transfer_tx` is trivially atomic.
//! Balance updates still follow [`TransferTxParams::balance_updates`] and are
//! logged, so tests can check the lock order PostgreSQL relies on. Write
//! failures can be switched on to exercise the internal-error path.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::{Store, StoreError};
use crate::models::{
    account::Account,
    currency::Currency,
    entry::Entry,
    transfer::{Transfer, TransferResult, TransferTxParams},
};

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    entries: Vec<Entry>,
    transfers: Vec<Transfer>,
    balance_update_log: Vec<i64>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write return [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Insert an account with a chosen balance (fixtures only).
    pub fn insert_account(&self, owner: &str, currency: Currency, balance: i64) -> Account {
        let mut tables = self.lock();
        let account = Account {
            id: tables.accounts.len() as i64 + 1,
            owner: owner.to_string(),
            balance,
            currency,
            created_at: Utc::now(),
        };
        tables.accounts.push(account.clone());
        account
    }

    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn transfer_count(&self) -> usize {
        self.lock().transfers.len()
    }

    /// Account ids in the order their balances were updated.
    pub fn balance_update_log(&self) -> Vec<i64> {
        self.lock().balance_update_log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock only means a test panicked mid-write.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

fn page<T>(rows: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    rows.skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_account(
        &self,
        owner: &str,
        currency: Currency,
    ) -> Result<Account, StoreError> {
        self.check_writable()?;
        Ok(self.insert_account(owner, currency, 0))
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError> {
        let tables = self.lock();
        let owned = tables.accounts.iter().filter(|a| a.owner == owner).cloned();
        Ok(page(owned, limit, offset))
    }

    async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, StoreError> {
        let tables = self.lock();
        let entries = tables
            .entries
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned();
        Ok(page(entries, limit, offset))
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        self.lock()
            .transfers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferResult, StoreError> {
        self.check_writable()?;

        let mut tables = self.lock();

        let from_index = tables
            .accounts
            .iter()
            .position(|a| a.id == params.from_account_id)
            .ok_or(StoreError::NotFound)?;
        let to_index = tables
            .accounts
            .iter()
            .position(|a| a.id == params.to_account_id)
            .ok_or(StoreError::NotFound)?;

        // Range-check both updates before touching anything.
        let mut updates = Vec::with_capacity(2);
        for (account_id, delta) in params.balance_updates() {
            let index = if account_id == params.from_account_id {
                from_index
            } else {
                to_index
            };
            let balance = tables.accounts[index]
                .balance
                .checked_add(delta)
                .ok_or_else(|| {
                    StoreError::Unavailable(format!("balance of account {account_id} out of range"))
                })?;
            updates.push((index, balance));
        }

        let now = Utc::now();
        let transfer = Transfer {
            id: tables.transfers.len() as i64 + 1,
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.credit_amount,
            created_at: now,
        };
        let from_entry = Entry {
            id: tables.entries.len() as i64 + 1,
            account_id: params.from_account_id,
            amount: -params.debit_amount,
            created_at: now,
        };
        let to_entry = Entry {
            id: from_entry.id + 1,
            account_id: params.to_account_id,
            amount: params.credit_amount,
            created_at: now,
        };

        for (index, balance) in updates {
            tables.accounts[index].balance = balance;
            let account_id = tables.accounts[index].id;
            tables.balance_update_log.push(account_id);
        }
        tables.transfers.push(transfer.clone());
        tables.entries.push(from_entry.clone());
        tables.entries.push(to_entry.clone());

        Ok(TransferResult {
            transfer,
            from_account: tables.accounts[from_index].clone(),
            to_account: tables.accounts[to_index].clone(),
            from_entry,
            to_entry,
        })
    }
}
