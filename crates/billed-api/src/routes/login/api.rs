//! Login endpoints - Form submissions and session JSON

use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use billed_core::{LoginForm, Route, UserType};
use serde::Serialize;

use crate::AppState;

/// Session as exposed to clients, without the password
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
    pub status: String,
}

pub async fn api_session(state: axum::extract::State<AppState>) -> Json<Option<SessionSummary>> {
    Json(state.context.session.load().map(|session| SessionSummary {
        user_type: session.user_type,
        email: session.email,
        status: session.status,
    }))
}

pub async fn htmx_login_employee(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    submit(&state, &headers, UserType::Employee, &form).await
}

pub async fn htmx_login_admin(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    submit(&state, &headers, UserType::Admin, &form).await
}

async fn submit(state: &AppState, headers: &axum::http::HeaderMap, user_type: UserType, form: &LoginForm) -> Response {
    let login = state.context.login();
    let result = match user_type {
        UserType::Employee => login.handle_submit_employee(form).await,
        UserType::Admin => login.handle_submit_admin(form).await,
    };

    match result {
        Ok(session) => crate::follow_navigation(state, headers)
            .unwrap_or_else(|| crate::redirect_to(headers, Route::for_session(Some(&session)))),
        Err(e) => {
            let content = super::page::render_login(Some((user_type, &e.label())));
            Html(crate::page_response(headers, "Connexion", "/", &content)).into_response()
        }
    }
}
