//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, caller identity)
//! 2. Delegates to the store or a service
//! 3. Returns a JSON response or an `AppError`

/// Account management endpoints
pub mod accounts;
/// Liveness probe
pub mod health;
/// Money transfer endpoints
pub mod transfers;
