//! Simple bank API.
//!
//! A REST service for accounts, their ledger entries, and money transfers
//! between accounts, including cross-currency transfers at fixed rates.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind the [`store::Store`] trait
//! - **Authentication**: HS256 bearer tokens ([`token::JwtMaker`])
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod token;

pub use routes::router;
pub use state::AppState;
