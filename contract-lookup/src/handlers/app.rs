use askama::Template;
use axum::{extract::State, response::IntoResponse};
use service_core::error::AppError;
use tower_sessions::Session;

use crate::handlers::search::ResultsContext;
use crate::models::ResultsView;
use crate::services::session_storage::load_lookup_state;
use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub authenticated: bool,
    pub demo_mode: bool,
    pub active_tab: &'static str,
    pub results: ResultsContext,
}

/// Header bar alone; the demo toggle swaps it in place.
#[derive(Template)]
#[template(path = "partials/header.html")]
pub struct HeaderTemplate {
    pub authenticated: bool,
    pub demo_mode: bool,
}

pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let lookup = load_lookup_state(&session, state.demo_by_default).await?;
    let token = state.auth.current_token(&session).await?;

    Ok(IndexTemplate {
        authenticated: token.is_some(),
        demo_mode: lookup.is_demo(),
        active_tab: lookup.active_tab.slug(),
        results: ResultsView::Prompt.into(),
    })
}

pub async fn health_check() -> &'static str {
    "OK"
}
