//! Transfer HTTP handlers.
//!
//! This module implements transfer-related API endpoints:
//! - POST /transfers - Move money between accounts
//! - GET /transfers/{id} - Get transfer details

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    error::AppError,
    models::transfer::{Transfer, TransferRequest, TransferResult},
    services::transfer_service,
    state::AppState,
    store::StoreError,
    token::TokenPayload,
};

/// Transfer money between accounts.
///
/// # Request Body
///
/// ```json
/// { "from_account_id": 1, "to_account_id": 2, "amount": 100 }
/// ```
///
/// # Response
///
/// - **200**: `TransferResult` with the transfer, both entries and both
///   updated accounts
/// - **400**: malformed body or field
/// - **401**: bad token, or the caller does not own the source account
/// - **404**: either account does not exist
/// - **500**: the store transaction failed; nothing was applied
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    request: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferResult>, AppError> {
    let Json(request) = request?;
    request.validate()?;

    let result = transfer_service::execute_transfer(
        state.store.as_ref(),
        &auth.username,
        request.from_account_id,
        request.to_account_id,
        request.amount,
    )
    .await?;

    Ok(Json(result))
}

/// Get transfer by ID.
///
/// # Security
///
/// Returns 404 if the transfer doesn't involve any account owned by the
/// caller, so other users' transfer ids are not revealed.
pub async fn get_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    transfer_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Transfer>, AppError> {
    let Path(transfer_id) = transfer_id?;
    let transfer = match state.store.get_transfer(transfer_id).await {
        Ok(transfer) => transfer,
        Err(StoreError::NotFound) => return Err(AppError::TransferNotFound(transfer_id)),
        Err(e) => return Err(e.into()),
    };

    let mut has_access = false;
    for account_id in [transfer.from_account_id, transfer.to_account_id] {
        match state.store.get_account(account_id).await {
            Ok(account) if account.is_owned_by(&auth.username) => {
                has_access = true;
                break;
            }
            Ok(_) | Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
    }

    if !has_access {
        return Err(AppError::TransferNotFound(transfer_id));
    }

    Ok(Json(transfer))
}
