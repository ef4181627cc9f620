//! Dashboard endpoints - JSON API and HTMX partials

use axum::extract::Path;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use billed_core::{Bill, Route, StatusGroup};
use serde::Deserialize;

use crate::{ApiError, AppState};

/// Admin-only partials answer with a redirect for anyone else
fn admin_only(state: &AppState, headers: &axum::http::HeaderMap) -> Option<Response> {
    crate::guard(state, headers, Route::Dashboard)
}

pub async fn api_dashboard_bills(state: axum::extract::State<AppState>) -> Result<Json<Vec<Bill>>, ApiError> {
    crate::api_guard(&state, Route::Dashboard)?;
    let bills = state.dashboard.write().await.get_bills_all_users().await?;
    Ok(Json(bills))
}

/// HTMX: Toggle a status section and re-render the dashboard
pub async fn htmx_dashboard_section(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(index): Path<u8>,
) -> Response {
    if let Some(redirect) = admin_only(&state, &headers) {
        return redirect;
    }
    let Some(group) = StatusGroup::from_index(index) else {
        return ApiError::NotFound {
            resource: format!("section {}", index),
        }
        .into_response();
    };

    let mut dashboard = state.dashboard.write().await;
    dashboard.handle_show_tickets(group);
    Html(dashboard.render()).into_response()
}

/// HTMX: Open or close a ticket in the right panel
pub async fn htmx_dashboard_edit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(redirect) = admin_only(&state, &headers) {
        return redirect;
    }
    match state.dashboard.write().await.handle_edit_ticket(&id) {
        Ok(panel) => Html(panel).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// HTMX: Proof modal of the open ticket
pub async fn htmx_dashboard_bill_file(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(redirect) = admin_only(&state, &headers) {
        return redirect;
    }
    match state.dashboard.read().await.handle_click_icon_eye(&id) {
        Ok(modal) => Html(modal.render()).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionForm {
    #[serde(default)]
    pub comment_admin: Option<String>,
}

pub async fn htmx_dashboard_accept(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<DecisionForm>,
) -> Response {
    if let Some(redirect) = admin_only(&state, &headers) {
        return redirect;
    }
    let html = state
        .dashboard
        .write()
        .await
        .handle_accept_submit(&id, form.comment_admin)
        .await;
    Html(html).into_response()
}

pub async fn htmx_dashboard_refuse(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<DecisionForm>,
) -> Response {
    if let Some(redirect) = admin_only(&state, &headers) {
        return redirect;
    }
    let html = state
        .dashboard
        .write()
        .await
        .handle_refuse_submit(&id, form.comment_admin)
        .await;
    Html(html).into_response()
}
