use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

use crate::handlers::app::HeaderTemplate;
use crate::models::{Contract, Line, ResultsView, Tab};
use crate::services::contracts_client::SearchError;
use crate::services::session_storage::{load_lookup_state, save_lookup_state};
use crate::AppState;

/// Flattened [`ResultsView`] for the templates.
pub struct ResultsContext {
    pub notice: Option<String>,
    pub is_error: bool,
    pub contracts: Vec<Contract>,
    pub lines: Vec<Line>,
}

impl From<ResultsView> for ResultsContext {
    fn from(view: ResultsView) -> Self {
        let notice = view.notice();
        let is_error = view.is_error();
        let (contracts, lines) = match view {
            ResultsView::Contracts(contracts) => (contracts, Vec::new()),
            ResultsView::Lines(lines) => (Vec::new(), lines),
            _ => (Vec::new(), Vec::new()),
        };

        Self {
            notice,
            is_error,
            contracts,
            lines,
        }
    }
}

#[derive(Template)]
#[template(path = "partials/results.html")]
pub struct ResultsTemplate {
    pub results: ResultsContext,
}

#[derive(Template)]
#[template(path = "partials/panel.html")]
pub struct PanelTemplate {
    pub active_tab: &'static str,
    pub results: ResultsContext,
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub criteria: String,
}

fn parse_tab(slug: &str) -> Result<Tab, AppError> {
    slug.parse::<Tab>()
        .map_err(|e| AppError::NotFound(anyhow::anyhow!(e)))
}

pub async fn search_handler(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let tab = parse_tab(&slug)?;
    let lookup = load_lookup_state(&session, state.demo_by_default).await?;
    let token = state.auth.current_token(&session).await?;

    let outcome = state
        .orchestrator
        .search(lookup.mode, token.as_ref(), tab, &form.criteria)
        .await;

    let (status, view) = match outcome {
        Ok(results) => (StatusCode::OK, ResultsView::from(results)),
        Err(SearchError::Unauthenticated) => (StatusCode::UNAUTHORIZED, ResultsView::LoginRequired),
        Err(e) => (StatusCode::OK, ResultsView::Error(e.to_string())),
    };

    Ok((
        status,
        ResultsTemplate {
            results: view.into(),
        },
    )
        .into_response())
}

pub async fn switch_tab_handler(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tab = parse_tab(&slug)?;
    let mut lookup = load_lookup_state(&session, state.demo_by_default).await?;
    let view = lookup.switch_tab(tab);
    save_lookup_state(&session, &lookup).await?;

    Ok(PanelTemplate {
        active_tab: tab.slug(),
        results: view.into(),
    })
}

/// Flip demo mode and re-render only the header. The results area is left
/// alone so a search already in flight still lands there.
pub async fn toggle_demo_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let mut lookup = load_lookup_state(&session, state.demo_by_default).await?;
    let mode = lookup.toggle_demo();
    save_lookup_state(&session, &lookup).await?;
    let token = state.auth.current_token(&session).await?;

    tracing::info!(mode = mode.as_str(), "Lookup mode toggled");
    Ok(HeaderTemplate {
        authenticated: token.is_some(),
        demo_mode: lookup.is_demo(),
    })
}
