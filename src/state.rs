//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::store::Store;
use crate::token::TokenMaker;

/// Cloned into each request; both members are cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub token_maker: Arc<dyn TokenMaker>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, token_maker: Arc<dyn TokenMaker>) -> Self {
        Self { store, token_maker }
    }
}
