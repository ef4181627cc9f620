//! Employee bills endpoints - JSON API and HTMX partials

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use billed_core::views;
use billed_core::{FormattedBill, Route};
use serde::Deserialize;

use crate::{ApiError, AppState};

pub async fn api_bills(state: axum::extract::State<AppState>) -> Result<Json<Vec<FormattedBill>>, ApiError> {
    crate::api_guard(&state, Route::Bills)?;
    let bills = state.context.bills().get_bills().await?;
    Ok(Json(bills))
}

/// HTMX: Bills table, or the error page when the store rejects
pub async fn htmx_bills_list(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::Bills) {
        return redirect;
    }
    match state.context.bills().get_bills().await {
        Ok(bills) => Html(super::page::render_bills_table(&bills)).into_response(),
        Err(e) => {
            log::warn!("Could not load bills: {}", e);
            Html(views::error_page(&e.label())).into_response()
        }
    }
}

/// HTMX: New bill button
pub async fn htmx_new_bill_click(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::Bills) {
        return redirect;
    }
    state.context.bills().handle_click_new_bill();
    crate::follow_navigation(&state, &headers).unwrap_or_else(|| crate::redirect_to(&headers, Route::NewBill))
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    pub url: String,
}

/// HTMX: Proof modal of the eye icon
pub async fn htmx_bill_file(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    query: Query<FileQuery>,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::Bills) {
        return redirect;
    }
    if query.url.is_empty() {
        return ApiError::BadRequest {
            message: "missing url".to_string(),
        }
        .into_response();
    }
    Html(state.context.bills().handle_click_icon_eye(&query.url).render()).into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_bills_page_lazy_loads_the_table() {
        let state = state();
        login_as_employee(&state).await;
        let (status, _, body) = get(&state, "/employee/bills").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Mes notes de frais"));
        assert!(body.contains("hx-get='/employee/bills/list'"));
        assert!(body.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_bills_list_shows_own_bills_formatted() {
        let state = state();
        login_as_employee(&state).await;
        let (status, _, body) = get(&state, "/employee/bills/list").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-testid='tbody'"));
        assert_eq!(body.matches("<tr class='border-b'>").count(), 2);
        assert!(body.contains("4 Avr. 04"));
        assert!(body.contains("En attente"));
        assert!(!body.contains("test2"));
    }

    #[tokio::test]
    async fn test_api_bills_json() {
        let state = state();
        login_as_employee(&state).await;
        let (status, _, body) = get(&state, "/api/bills").await;
        assert_eq!(status, StatusCode::OK);
        let bills: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0]["date"], "3 Mar. 03");
        assert_eq!(bills[0]["status"], "Accepté");
    }

    #[tokio::test]
    async fn test_api_bills_without_login_is_unauthorized() {
        let (status, _, _) = get(&state(), "/api/bills").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_new_bill_button_redirects() {
        let state = state();
        login_as_employee(&state).await;
        let (status, headers, _) = post_form(&state, "/employee/bills/new", "").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/employee/bill/new");
    }

    #[tokio::test]
    async fn test_icon_eye_modal() {
        let state = state();
        login_as_employee(&state).await;
        let (status, _, body) = get(&state, "/employee/bills/file?url=https%3A%2F%2Fhost%2Fbill.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id='modaleFile'"));
        assert!(body.contains("src='https://host/bill.jpg'"));

        let (status, _, _) = get(&state, "/employee/bills/file").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_session_is_kept_out_of_employee_routes() {
        let state = state();
        login_as_admin(&state).await;

        let (status, headers, body) = get(&state, "/employee/bills/list").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin/dashboard");
        assert!(!body.contains("data-testid='tbody'"));

        let (status, headers, _) = get(&state, "/employee/bills/file?url=https%3A%2F%2Fhost%2Fbill.jpg").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin/dashboard");

        let (status, headers, _) = post_form(&state, "/employee/bills/new", "").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location(&headers), "/admin/dashboard");

        let (status, _, _) = get(&state, "/api/bills").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
