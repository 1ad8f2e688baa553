//! Transfer service - Core business logic for moving money between accounts.
//!
//! This service handles:
//! - Account lookup (not found vs. store failure)
//! - Ownership of the source account
//! - Currency conversion between differing accounts
//! - Handing the debit/credit to the store's atomic transaction
//!
//! # Atomicity Guarantees
//!
//! Nothing is written before [`Store::transfer_tx`]; that call commits the
//! transfer, both entries and both balances together or not at all.

use crate::{
    error::AppError,
    models::{
        account::Account,
        transfer::{TransferResult, TransferTxParams},
    },
    services::currency,
    store::{Store, StoreError},
};

/// Fetch an account, mapping a missing row to a 404.
pub async fn get_account(store: &dyn Store, account_id: i64) -> Result<Account, AppError> {
    match store.get_account(account_id).await {
        Ok(account) => Ok(account),
        Err(StoreError::NotFound) => Err(AppError::AccountNotFound(account_id)),
        Err(e) => Err(e.into()),
    }
}

/// Reject callers that do not own `account`.
pub fn check_ownership(account: &Account, username: &str) -> Result<(), AppError> {
    if account.is_owned_by(username) {
        Ok(())
    } else {
        Err(AppError::AccountNotOwned(account.id))
    }
}

/// Execute a transfer on behalf of `username`.
///
/// # Process
///
/// 1. Resolve the source account
/// 2. Resolve the destination account
/// 3. Check the caller owns the source account
/// 4. Convert `amount` into the destination currency if they differ
/// 5. Apply everything in one store transaction
///
/// `amount` is in minor units of the source currency. The caller is expected
/// to have validated the request shape already.
///
/// # Errors
///
/// - `AccountNotFound`: either account does not exist
/// - `AccountNotOwned`: source account belongs to someone else
/// - `InvalidRequest`: the converted amount rounds down to zero or does not
///   fit in an `i64`
/// - `Database` / `Internal`: the store failed; nothing was applied
pub async fn execute_transfer(
    store: &dyn Store,
    username: &str,
    from_account_id: i64,
    to_account_id: i64,
    amount: i64,
) -> Result<TransferResult, AppError> {
    let from_account = get_account(store, from_account_id).await?;
    let to_account = get_account(store, to_account_id).await?;

    check_ownership(&from_account, username)?;

    let credit_amount = currency::convert(amount, from_account.currency, to_account.currency)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    if credit_amount <= 0 {
        return Err(AppError::InvalidRequest(format!(
            "Amount {amount} {} is too small to convert to {}",
            from_account.currency, to_account.currency
        )));
    }

    let result = store
        .transfer_tx(TransferTxParams {
            from_account_id,
            to_account_id,
            debit_amount: amount,
            credit_amount,
        })
        .await
        .map_err(|e| match e {
            // A row that existed a moment ago is gone; still not a client error.
            StoreError::NotFound => AppError::Internal(format!(
                "account disappeared during transfer {from_account_id} -> {to_account_id}"
            )),
            other => other.into(),
        })?;

    tracing::info!(
        transfer_id = result.transfer.id,
        from_account_id,
        to_account_id,
        debit = amount,
        credit = credit_amount,
        from_currency = %from_account.currency,
        to_currency = %to_account.currency,
        "transfer committed"
    );

    Ok(result)
}
