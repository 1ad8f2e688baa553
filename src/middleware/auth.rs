//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the `authorization` header
//! 2. Verify it with the configured [`TokenMaker`](crate::token::TokenMaker)
//! 3. Inject the decoded [`TokenPayload`] into the request
//! 4. Reject unauthorized requests with HTTP 401

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState, token::TokenPayload};

/// Only supported authorization scheme, compared case-insensitively.
pub const AUTHORIZATION_TYPE_BEARER: &str = "bearer";

/// Split an `authorization` header value into its bearer token.
///
/// The value must be exactly two whitespace-separated fields and the first
/// must be `bearer` in any case.
pub fn parse_bearer(header_value: &str) -> Result<&str, AppError> {
    let mut fields = header_value.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case(AUTHORIZATION_TYPE_BEARER) =>
        {
            Ok(token)
        }
        _ => Err(AppError::InvalidAuthorization),
    }
}

/// Authentication middleware function.
///
/// # Flow
///
/// 1. Missing header -> 401 `missing_authorization`
/// 2. Not `bearer <token>` -> 401 `invalid_authorization`
/// 3. Token fails verification -> 401 `invalid_token`
/// 4. Otherwise insert `TokenPayload` and call the next handler
///
/// Handlers read the identity with `Extension<TokenPayload>`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AppError::InvalidAuthorization)?;

    let token = parse_bearer(auth_header)?;

    let payload: TokenPayload = state.token_maker.verify_token(token)?;

    request.extensions_mut().insert(payload);

    Ok(next.run(request).await)
}
