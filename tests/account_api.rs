//! End-to-end tests for the account, entry and health endpoints.

mod common;

use axum::http::StatusCode;
use simple_bank::models::currency::Currency;

use common::{RandomData, TestApp, body_json, get_request, json_request};

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();

    let response = app.send(get_request("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn create_account_is_owned_by_caller() {
    let app = TestApp::new();
    let mut data = RandomData::seeded(7);
    let owner = data.owner();
    let currency = data.currency();

    let response = app
        .send(json_request(
            "POST",
            "/accounts",
            Some(&app.bearer(&owner)),
            &format!(r#"{{"currency":"{currency}"}}"#),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["owner"], owner.as_str());
    assert_eq!(json["currency"], currency.as_str());
    assert_eq!(json["balance"], 0);
}

#[tokio::test]
async fn create_account_rejects_unsupported_currency() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/accounts",
            Some(&app.bearer("alice")),
            r#"{"currency":"GBP"}"#,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_account_requires_token() {
    let app = TestApp::new();

    let response = app
        .send(json_request("POST", "/accounts", None, r#"{"currency":"USD"}"#))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_account_checks_owner() {
    let app = TestApp::new();
    let mut data = RandomData::seeded(11);
    let balance = data.money();
    let account = app.store.insert_account("alice", Currency::Cad, balance);
    let uri = format!("/accounts/{}", account.id);

    let response = app.send(get_request(&uri, Some(&app.bearer("alice")))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], account.id);
    assert_eq!(json["balance"], balance);

    let response = app.send(get_request(&uri, Some(&app.bearer("bob")))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(get_request("/accounts/999", Some(&app.bearer("alice"))))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_accounts_pages_callers_accounts() {
    let app = TestApp::new();
    let mut data = RandomData::seeded(3);
    for _ in 0..7 {
        let currency = data.currency();
        let balance = data.money();
        app.store.insert_account("alice", currency, balance);
    }
    app.store.insert_account("bob", Currency::Usd, 0);

    let response = app
        .send(get_request(
            "/accounts?page_id=2&page_size=5",
            Some(&app.bearer("alice")),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let accounts = json.as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a["owner"] == "alice"));
}

#[tokio::test]
async fn list_accounts_rejects_bad_paging() {
    let app = TestApp::new();

    for uri in [
        "/accounts",
        "/accounts?page_id=0&page_size=5",
        "/accounts?page_id=1&page_size=50",
        "/accounts?page_id=x&page_size=5",
    ] {
        let response = app.send(get_request(uri, Some(&app.bearer("alice")))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }
}

#[tokio::test]
async fn list_entries_after_transfer() {
    let app = TestApp::new();
    let from = app.store.insert_account("alice", Currency::Usd, 500);
    let to = app.store.insert_account("bob", Currency::Inr, 0);

    let response = app
        .send(json_request(
            "POST",
            "/transfers",
            Some(&app.bearer("alice")),
            &format!(
                r#"{{"from_account_id":{},"to_account_id":{},"amount":10}}"#,
                from.id, to.id
            ),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(get_request(
            &format!("/accounts/{}/entries?page_id=1&page_size=5", to.id),
            Some(&app.bearer("bob")),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["amount"], 800);

    let response = app
        .send(get_request(
            &format!("/accounts/{}/entries?page_id=1&page_size=5", to.id),
            Some(&app.bearer("alice")),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_numeric_account_id_is_json_bad_request() {
    let app = TestApp::new();

    for uri in ["/accounts/abc", "/accounts/abc/entries?page_id=1&page_size=5"] {
        let response = app.send(get_request(uri, Some(&app.bearer("alice")))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "uri: {uri}"
        );
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
    }
}
