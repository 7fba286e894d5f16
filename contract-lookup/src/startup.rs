use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use service_core::observability::REQUEST_ID_HEADER;
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerSettings;
use crate::handlers::{
    app::{health_check, index},
    auth::{callback_handler, login_handler, logout_handler},
    search::{search_handler, switch_tab_handler, toggle_demo_handler},
};
use crate::AppState;

pub fn build_router(state: AppState, server: &ServerSettings) -> Router {
    // Lax so the session cookie survives the provider's top-level redirect to /callback.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            server.session_idle_hours,
        )));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/logout", get(logout_handler).post(logout_handler))
        .route("/demo/toggle", post(toggle_demo_handler))
        .route("/tabs/:tab", post(switch_tab_handler))
        .route("/search/:tab", post(search_handler))
        .nest_service("/static", ServeDir::new(&server.static_dir))
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
