//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /accounts - Create new account for the caller
//! - GET /accounts/{id} - Get one of the caller's accounts
//! - GET /accounts - List the caller's accounts
//! - GET /accounts/{id}/entries - List ledger entries of one account

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    error::AppError,
    models::{
        account::{Account, CreateAccountRequest, PageRequest},
        entry::Entry,
    },
    services::transfer_service,
    state::AppState,
    token::TokenPayload,
};

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// { "currency": "USD" }
/// ```
///
/// # Response
///
/// - **201 Created**: the account, owned by the caller, balance 0
/// - **400**: body missing or currency unsupported
/// - **401**: bad token
pub async fn create_account(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    request: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let Json(request) = request?;

    let account = state
        .store
        .create_account(&auth.username, request.currency)
        .await?;

    tracing::info!(account_id = account.id, currency = %account.currency, "account created");

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get a specific account by ID.
///
/// Returns 404 if the account does not exist and 401 if it belongs to
/// someone else.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    account_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Account>, AppError> {
    let Path(account_id) = account_id?;
    let account = transfer_service::get_account(state.store.as_ref(), account_id).await?;
    transfer_service::check_ownership(&account, &auth.username)?;

    Ok(Json(account))
}

/// List the caller's accounts, ordered by id.
///
/// `GET /accounts?page_id=1&page_size=5`
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<Account>>, AppError> {
    let Query(page) = page?;
    let (limit, offset) = page.limit_offset()?;

    let accounts = state
        .store
        .list_accounts(&auth.username, limit, offset)
        .await?;

    Ok(Json(accounts))
}

/// List ledger entries of one of the caller's accounts.
///
/// `GET /accounts/{id}/entries?page_id=1&page_size=5`
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth): Extension<TokenPayload>,
    account_id: Result<Path<i64>, PathRejection>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let Path(account_id) = account_id?;
    let Query(page) = page?;
    let (limit, offset) = page.limit_offset()?;

    let account = transfer_service::get_account(state.store.as_ref(), account_id).await?;
    transfer_service::check_ownership(&account, &auth.username)?;

    let entries = state.store.list_entries(account.id, limit, offset).await?;

    Ok(Json(entries))
}
