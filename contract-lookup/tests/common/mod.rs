#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use contract_lookup::config::{
    ContractsApiSettings, DemoSettings, OAuthSettings, ServerSettings, Settings,
    TelemetrySettings,
};
use contract_lookup::startup::build_router;
use contract_lookup::AppState;

/// Settings pointing both upstreams at `upstream` (usually a wiremock server).
pub fn test_settings(upstream: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            secure_cookies: false,
            session_idle_hours: 1,
            static_dir: "static".to_string(),
        },
        oauth: OAuthSettings {
            client_id: "test-client".to_string(),
            authorize_url: format!("{}/oauth2/v1/authorize", upstream),
            token_url: format!("{}/oauth2/v1/token", upstream),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            scopes: "openid profile".to_string(),
        },
        contracts_api: ContractsApiSettings {
            base_url: format!("{}/api/v1.0", upstream),
        },
        demo: DemoSettings {
            latency_ms: 0,
            enabled_by_default: false,
        },
        telemetry: TelemetrySettings::default(),
    }
}

pub fn test_router(settings: &Settings) -> Router {
    build_router(AppState::from_settings(settings), &settings.server)
}

/// `name=value` part of the session `Set-Cookie`, if the response set one.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
