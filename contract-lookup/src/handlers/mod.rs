pub mod app;
pub mod auth;
pub mod metrics;
pub mod search;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

/// Full reload of `/`: htmx requests get `HX-Redirect`, plain requests a 303.
pub(crate) fn reload_page(headers: &HeaderMap) -> Response {
    if headers.contains_key("HX-Request") {
        (StatusCode::OK, [("HX-Redirect", "/")], "").into_response()
    } else {
        Redirect::to("/").into_response()
    }
}
