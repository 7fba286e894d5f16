mod common;

use axum::http::StatusCode;
use contract_lookup::config::ContractsApiSettings;
use contract_lookup::models::{ContractSummaryQuery, LineQuery};
use contract_lookup::services::contracts_client::{ContractsApi, ContractsClient, SearchError};
use serde_json::json;
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ContractsClient {
    ContractsClient::new(common::test_settings(&server.uri()).contracts_api)
}

#[tokio::test]
async fn contract_summary_sends_bearer_request_id_and_bill_to_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/contractSummary"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header_exists("Request-Id"))
        .and(body_json(json!({ "billToId": ["123"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contracts": [{
                "contractNumber": "555",
                "status": "ACTIVE",
                "endDate": "2026-01-01",
                "billToName": "Example Co",
                "serviceLevel": "SNT",
                "contractType": "Service"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .search_contracts(
            &ContractSummaryQuery {
                bill_to_id: vec!["123".to_string()],
            },
            "tok-1",
        )
        .await
        .unwrap();

    assert_eq!(response.contracts.len(), 1);
    assert_eq!(response.contracts[0].contract_number, "555");
    assert_eq!(response.contracts[0].bill_to_name_display(), "Example Co");
}

#[tokio::test]
async fn line_search_body_uses_single_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/lines"))
        .and(body_json(json!({ "serialNumber": ["FOC1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lines": [{
                "serialNumber": "FOC1",
                "productNumber": "C9300-24T-A",
                "description": "Catalyst 9300",
                "contractNumber": "204368924",
                "status": "COVERED",
                "coverageEndDate": "2025-12-31"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .search_lines(&LineQuery::SerialNumber(vec!["FOC1".to_string()]), "tok-1")
        .await
        .unwrap();

    assert_eq!(response.lines.len(), 1);
    assert!(response.lines[0].is_covered());
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .search_lines(&LineQuery::ContractNumber(vec!["1".to_string()]), "tok-1")
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
}

#[tokio::test]
async fn missing_result_fields_decode_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/contractSummary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lines": [] })))
        .mount(&server)
        .await;

    let client = client(&server);
    let contracts = client
        .search_contracts(
            &ContractSummaryQuery {
                bill_to_id: vec![String::new()],
            },
            "tok-1",
        )
        .await
        .unwrap();
    let lines = client
        .search_lines(&LineQuery::SerialNumber(vec!["X".to_string()]), "tok-1")
        .await
        .unwrap();

    assert!(contracts.contracts.is_empty());
    assert!(lines.lines.is_empty());
}

#[tokio::test]
async fn null_result_list_decodes_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/contractSummary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contracts": null })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .search_contracts(
            &ContractSummaryQuery {
                bill_to_id: vec!["123".to_string()],
            },
            "tok-1",
        )
        .await
        .unwrap();

    assert!(response.contracts.is_empty());
}

#[tokio::test]
async fn unreachable_api_is_network_error() {
    let client = ContractsClient::new(ContractsApiSettings {
        base_url: "http://127.0.0.1:9".to_string(),
    });

    let err = client
        .search_lines(&LineQuery::SerialNumber(vec!["FOC1".to_string()]), "tok-1")
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
    assert!(err.to_string().starts_with("Network error: "));
    assert_eq!(err.kind(), "network_error");
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .search_lines(&LineQuery::SerialNumber(vec!["X".to_string()]), "tok-1")
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidResponse(_)));
}

#[tokio::test]
async fn demo_bill_to_search_renders_fixture_cards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = common::test_router(&common::test_settings(&server.uri()));

    let response = app
        .clone()
        .oneshot(common::post_form("/demo/toggle", "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = common::session_cookie(&response).unwrap();

    let response = app
        .oneshot(common::post_form("/search/bill-to", "criteria=123", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = common::body_text(response).await;
    assert!(html.contains("#204368924"));
    assert!(html.contains("#987654321"));
    assert!(html.contains("status-active"));
    assert!(html.contains("status-expired"));
}

#[tokio::test]
async fn demo_toggle_swaps_header_only() {
    let app = common::test_router(&common::test_settings("http://127.0.0.1:9"));

    let response = app
        .clone()
        .oneshot(common::post_form("/demo/toggle", "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("HX-Redirect"));
    let cookie = common::session_cookie(&response).unwrap();

    let html = common::body_text(response).await;
    assert!(html.contains(r#"id="app-header""#));
    assert!(html.contains("Disable Demo Mode"));
    assert!(html.contains(r#"id="btn-login" class="btn-primary" disabled"#));
    assert!(!html.contains("results-area"));
    assert!(!html.contains("lookup-panel"));

    // Toggling back re-enables the login link.
    let response = app
        .clone()
        .oneshot(common::post_form("/demo/toggle", "", Some(&cookie)))
        .await
        .unwrap();
    let html = common::body_text(response).await;
    assert!(html.contains("Enable Demo Mode"));
    assert!(html.contains(r#"href="/login""#));
    assert!(!html.contains("results-area"));
}

#[tokio::test]
async fn live_search_without_login_prompts_for_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = common::test_router(&common::test_settings(&server.uri()));

    let response = app
        .oneshot(common::post_form("/search/contract", "criteria=204368924", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let html = common::body_text(response).await;
    assert!(html.contains("Please login or enable Demo Mode."));
    assert!(html.contains("empty-state error"));
}

#[tokio::test]
async fn live_search_after_login_calls_api_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-9" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/lines"))
        .and(header("authorization", "Bearer tok-9"))
        .and(body_json(json!({ "contractNumber": ["204368924"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lines": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let app = common::test_router(&common::test_settings(&server.uri()));

    let response = app
        .clone()
        .oneshot(common::get("/login", None))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap();
    let response = app
        .clone()
        .oneshot(common::get("/callback?code=c1", Some(&cookie)))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap_or(cookie);

    let response = app
        .oneshot(common::post_form(
            "/search/contract",
            "criteria=+204368924+",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::body_text(response).await.contains("No lines found."));
}

#[tokio::test]
async fn upstream_failure_renders_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-9" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/search/contractSummary"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = common::test_router(&common::test_settings(&server.uri()));

    let response = app
        .clone()
        .oneshot(common::get("/login", None))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap();
    let response = app
        .clone()
        .oneshot(common::get("/callback?code=c1", Some(&cookie)))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap_or(cookie);

    let response = app
        .oneshot(common::post_form("/search/bill-to", "criteria=1", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(html.contains("Error: API Error: 503 Service Unavailable"));
}

#[tokio::test]
async fn unreachable_api_renders_inline_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-9" })))
        .mount(&server)
        .await;
    let mut settings = common::test_settings(&server.uri());
    settings.contracts_api.base_url = "http://127.0.0.1:9".to_string();
    let app = common::test_router(&settings);

    let response = app
        .clone()
        .oneshot(common::get("/login", None))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap();
    let response = app
        .clone()
        .oneshot(common::get("/callback?code=c1", Some(&cookie)))
        .await
        .unwrap();
    let cookie = common::session_cookie(&response).unwrap_or(cookie);

    let response = app
        .oneshot(common::post_form("/search/serial", "criteria=FOC1", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(html.contains("Error: Network error: "));
    assert!(html.contains("empty-state error"));
}

#[tokio::test]
async fn switching_tabs_resets_results_to_prompt() {
    let app = common::test_router(&common::test_settings("http://127.0.0.1:9"));

    let response = app
        .clone()
        .oneshot(common::post_form("/tabs/serial", "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = common::session_cookie(&response).unwrap();

    let html = common::body_text(response).await;
    assert!(html.contains(r#"id="tab-serial" class="tab active""#));
    assert!(html.contains(r#"id="serial-number""#));
    assert!(html.contains("Enter search criteria to view contract details."));

    // The active tab persists across a full reload.
    let response = app.oneshot(common::get("/", Some(&cookie))).await.unwrap();
    let html = common::body_text(response).await;
    assert!(html.contains(r#"id="tab-serial" class="tab active""#));
}

#[tokio::test]
async fn unknown_tab_is_not_found() {
    let app = common::test_router(&common::test_settings("http://127.0.0.1:9"));

    let response = app
        .oneshot(common::post_form("/search/invoice", "criteria=1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
