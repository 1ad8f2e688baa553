//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request bodies that create them.

/// Bank account model
pub mod account;
/// Supported currencies
pub mod currency;
/// Ledger entries
pub mod entry;
/// Transfers between accounts
pub mod transfer;
