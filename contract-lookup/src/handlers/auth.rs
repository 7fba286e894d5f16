use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use service_core::error::AppError;
use tower_sessions::Session;

use crate::handlers::reload_page;
use crate::services::auth_handshake::{AuthError, CallbackParams};
use crate::services::session_storage::reset_lookup_state;
use crate::AppState;

/// Start the PKCE login and hand the browser to the authorization endpoint.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let url = state.auth.begin_login(&session).await?;
    Ok(Redirect::to(url.as_str()))
}

/// Redirect target registered with the provider.
///
/// Always ends on `/`, which drops `code` and `state` from the address bar.
pub async fn callback_handler(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    match state.auth.complete_login(&session, &params).await {
        Ok(Some(_)) => tracing::info!("User logged in"),
        Ok(None) => tracing::info!("Callback completed without a token"),
        Err(AuthError::Storage(e)) => return Err(e),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }

    Ok(Redirect::to("/").into_response())
}

/// Drop the token and in-memory lookup state, then reload the app.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    state.auth.logout(&session).await?;
    reset_lookup_state(&session).await?;

    Ok(reload_page(&headers))
}
