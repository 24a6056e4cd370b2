//! Integration tests for the Coinbase REST client
//!
//! Runs the full pipeline (signing, reqwest transport, classification,
//! mapping) against a local mock server.

mod common;

use std::time::Duration;

use common::*;
use coinbase_rest::types::Account;
use coinbase_rest::{ClientConfig, CoinbaseClient, HttpVerbs, ListOptions, ListRequest, Resource, RestError};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_key_pair_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts/2bbf394c-193b-5b2a-9155-3b4732659ede"))
        .and(header("CB-ACCESS-KEY", TEST_KEY_NAME))
        .and(header("CB-VERSION", "2025-01-28"))
        .and(header("Content-Type", "application/json"))
        .and(header_exists("CB-ACCESS-SIGN"))
        .and(header_exists("CB-ACCESS-TIMESTAMP"))
        .and(header_exists("Authorization"))
        .and(query_param_is_missing("access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNT_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let account = client
        .get_account("2bbf394c-193b-5b2a-9155-3b4732659ede")
        .await
        .unwrap();

    assert_eq!(account.name.as_deref(), Some("My Wallet"));
    assert_eq!(account.currency_code(), Some("BTC"));
    let balance = account.balance.unwrap();
    assert_eq!(balance.amount.to_string(), "39.59000000");
    assert_eq!(balance.currency, "BTC");
}

#[tokio::test]
async fn test_bearer_token_bound_to_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNTS_PAGE_2))
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    client.get_accounts(ListOptions::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let authorization = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    let token = authorization.strip_prefix("Bearer ").unwrap();
    let claims = jwt_claims(token);

    let host = server.uri().replace("http://", "");
    assert_eq!(claims["uri"], format!("GET {}/v2/accounts", host));
    assert_eq!(claims["sub"], TEST_KEY_NAME);
    assert_eq!(claims["iss"], "cdp");
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["nbf"].as_i64().unwrap(),
        120
    );

    let sign = requests[0].headers.get("cb-access-sign").unwrap().to_str().unwrap();
    assert_eq!(sign.len(), 64);
    assert!(sign.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_token_mode_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(query_param("access_token", TEST_ACCESS_TOKEN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"resource": "user", "id": "u1", "name": "User One"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server);
    let user = client.get_current_user().await.unwrap();
    assert_eq!(user.id, "u1");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("cb-access-key").is_none());
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/accounts"))
        .and(body_json(json!({"name": "Savings"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(ACCOUNT_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    client.create_account("Savings").await.unwrap();
}

// =============================================================================
// Error classification
// =============================================================================

#[tokio::test]
async fn test_unauthorized_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = token_client(&server);
    let err = client.get_current_user().await.unwrap_err();
    assert!(!err.to_string().contains(TEST_ACCESS_TOKEN));

    match err {
        RestError::HttpStatus { status, url, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
            assert!(url.ends_with("/v2/user?access_token=REDACTED"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND_RESPONSE))
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let err = client.get_account("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.api_errors().is_none());
}

#[tokio::test]
async fn test_error_envelope_with_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NOT_FOUND_RESPONSE))
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let err = client.get_account("missing").await.unwrap_err();

    let errors = err.api_errors().unwrap();
    assert_eq!(errors[0].id.as_deref(), Some("not_found"));
}

#[tokio::test]
async fn test_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = token_client(&server);
    assert!(matches!(
        client.get_current_user().await,
        Err(RestError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = token_client(&server);
    assert!(matches!(client.get_time().await, Err(RestError::Decode(_))));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ACCOUNT_RESPONSE)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::with_access_token(TEST_ACCESS_TOKEN)
        .with_base_uri(base_uri(&server))
        .with_timeout(Duration::from_millis(50));
    let client = CoinbaseClient::new(config).unwrap();

    let err = client.get_account("slow").await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = ClientConfig::with_access_token(TEST_ACCESS_TOKEN).with_base_uri("http://127.0.0.1:1/v2/");
    let client = CoinbaseClient::new(config).unwrap();

    let err = client.get_current_user().await.unwrap_err();
    assert!(matches!(err, RestError::Transport(_)));
    assert!(!err.to_string().contains(TEST_ACCESS_TOKEN));
    assert!(!format!("{:?}", err).contains(TEST_ACCESS_TOKEN));
}

// =============================================================================
// Mapping and pagination
// =============================================================================

#[tokio::test]
async fn test_unknown_resource_is_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/rewards/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"resource": "unknown_future_type", "id": "r1"},
            "warnings": [{"id": "beta", "message": "This endpoint is in beta"}]
        })))
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let resource = client.get_resource("rewards/r1").await.unwrap();
    assert_eq!(
        resource,
        Resource::Raw(json!({
            "data": {"resource": "unknown_future_type", "id": "r1"},
            "warnings": [{"id": "beta", "message": "This endpoint is in beta"}]
        }))
    );
}

#[tokio::test]
async fn test_mixed_list_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next_uri": null},
            "data": [
                {"resource": "account", "id": "a1"},
                {"resource": "user", "id": "u1", "name": "Not an account"}
            ]
        })))
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let result = client.get_accounts(ListOptions::new()).await;
    assert!(matches!(result, Err(RestError::Decode(_))));
}

#[tokio::test]
async fn test_follow_cursor_adds_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNTS_PAGE_2))
        .expect(1)
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    client
        .get_page(&ListRequest::follow("/v2/accounts?starting_after=x"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("starting_after=x"));
}

#[tokio::test]
async fn test_walk_all_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .and(query_param_is_missing("starting_after"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNTS_PAGE_1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .and(query_param("starting_after", "58542935-67b5-56e1-a3f9-42686e07fa40"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNTS_PAGE_2))
        .expect(1)
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    let accounts: Vec<Account> = client
        .get_all(ListRequest::with_options("accounts", ListOptions::new().limit(1)))
        .await
        .unwrap();

    let names: Vec<_> = accounts.iter().filter_map(|a| a.name.as_deref()).collect();
    assert_eq!(names, vec!["My Vault", "My Wallet"]);
}

#[tokio::test]
async fn test_delete_with_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/accounts/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = key_pair_client(&server);
    assert_eq!(client.delete_http("accounts/abc").await.unwrap(), None);
}
