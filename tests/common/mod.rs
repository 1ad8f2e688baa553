//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::Duration;
use http_body_util::BodyExt;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tower::ServiceExt;

use simple_bank::{
    AppState,
    models::currency::Currency,
    store::MemoryStore,
    token::{JwtMaker, TokenMaker},
};

pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Deterministic fixture generator. Every test builds its own with a fixed
/// seed so runs are reproducible and tests do not share state.
pub struct RandomData {
    rng: StdRng,
}

impl RandomData {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    pub fn string(&mut self, len: usize) -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
        (0..len)
            .map(|_| CHARSET[self.rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }

    pub fn owner(&mut self) -> String {
        self.string(6)
    }

    pub fn money(&mut self) -> i64 {
        self.int(0, 1000)
    }

    pub fn currency(&mut self) -> Currency {
        *Currency::ALL
            .choose(&mut self.rng)
            .expect("currency list is not empty")
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub maker: JwtMaker,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let maker = JwtMaker::new(TEST_SECRET).unwrap();
        let state = AppState::new(store.clone(), Arc::new(maker.clone()));

        Self {
            store,
            maker,
            router: simple_bank::router(state),
        }
    }

    pub fn token_for(&self, username: &str) -> String {
        self.maker
            .create_token(username, Duration::minutes(15))
            .unwrap()
            .0
    }

    pub fn bearer(&self, username: &str) -> String {
        format!("Bearer {}", self.token_for(username))
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
