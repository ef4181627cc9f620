//! Dashboard page rendering - Full page endpoints

use axum::response::{Html, IntoResponse, Response};
use billed_core::Route;

use crate::AppState;

/// Wrap dashboard markup in the element every dashboard partial targets
pub fn dashboard_content(html: &str) -> String {
    format!("<div id='dashboard-content'>{}</div>", html)
}

pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::Dashboard) {
        return redirect;
    }

    let html = state.dashboard.write().await.load().await;
    Html(crate::page_response(
        &headers,
        Route::Dashboard.title(),
        Route::Dashboard.path(),
        &dashboard_content(&html),
    ))
    .into_response()
}
