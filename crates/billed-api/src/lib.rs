//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::login: Landing page and login forms
//! - routes::bills: Employee bills list
//! - routes::new_bill: New bill form
//! - routes::dashboard: Admin validations

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{
    routing::{get, post},
    Router,
};
use billed_config::Config;
use billed_core::{AppContext, Dashboard, NewBill, Route, SessionContext, StoreRef};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub context: AppContext,
    /// Dashboard keeps its section and ticket flags between requests
    pub dashboard: Arc<RwLock<Dashboard>>,
    /// New bill form keeps the uploaded proof until submit
    pub new_bill: Arc<RwLock<NewBill>>,
}

impl AppState {
    pub fn new(config: Config, store: StoreRef) -> Self {
        let context = AppContext::new(&config, Some(store), SessionContext::in_memory());
        Self {
            dashboard: Arc::new(RwLock::new(context.dashboard())),
            new_bill: Arc::new(RwLock::new(context.new_bill())),
            context,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::bills::{api_bills, htmx_bills_list, htmx_bill_file, htmx_new_bill_click, page_bills};
    use routes::dashboard::{
        api_dashboard_bills, htmx_dashboard_accept, htmx_dashboard_bill_file, htmx_dashboard_edit,
        htmx_dashboard_refuse, htmx_dashboard_section, page_dashboard,
    };
    use routes::login::{api_session, htmx_login_admin, htmx_login_employee, page_login};
    use routes::new_bill::{htmx_new_bill_file, htmx_new_bill_submit, page_new_bill};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/session", get(api_session))
        .route("/api/bills", get(api_bills))
        .route("/api/dashboard/bills", get(api_dashboard_bills))
        // Login
        .route("/", get(page_login))
        .route("/login/employee", post(htmx_login_employee))
        .route("/login/admin", post(htmx_login_admin))
        // Employee
        .route("/employee/bills", get(page_bills))
        .route("/employee/bills/list", get(htmx_bills_list))
        .route("/employee/bills/new", post(htmx_new_bill_click))
        .route("/employee/bills/file", get(htmx_bill_file))
        .route("/employee/bill/new", get(page_new_bill))
        .route("/employee/bill/new", post(htmx_new_bill_submit))
        .route("/employee/bill/new/file", post(htmx_new_bill_file))
        // Admin
        .route("/admin/dashboard", get(page_dashboard))
        .route("/admin/dashboard/sections/:group", get(htmx_dashboard_section))
        .route("/admin/dashboard/bills/:id/edit", get(htmx_dashboard_edit))
        .route("/admin/dashboard/bills/:id/file", get(htmx_dashboard_bill_file))
        .route("/admin/dashboard/bills/:id/accept", post(htmx_dashboard_accept))
        .route("/admin/dashboard/bills/:id/refuse", post(htmx_dashboard_refuse))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Billed</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .modal.hidden {{ display: none; }}
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Vertical navigation of the employee and admin views
pub fn nav_sidebar(current_path: &str) -> String {
    let links: Vec<(&str, &str, &str)> = if current_path.starts_with("/employee") {
        vec![
            (Route::Bills.path(), "Mes notes de frais", "layout-icon1"),
            (Route::NewBill.path(), "Nouvelle note", "layout-icon2"),
        ]
    } else if current_path.starts_with("/admin") {
        vec![(Route::Dashboard.path(), "Validations", "layout-icon1")]
    } else {
        Vec::new()
    };

    let mut nav = String::from(
        "<div class='bg-indigo-900 text-white h-screen flex flex-col'><div class='p-4 border-b border-indigo-800'><h1 class='text-xl font-bold'>Billed</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
    );
    for (path, label, id) in links {
        let active_class = if current_path == path {
            "bg-indigo-700"
        } else {
            "hover:bg-indigo-800"
        };
        nav.push_str(&format!(
            "<li><a href='{}' id='{}' data-testid='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>",
            path, id, id, active_class, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

pub(crate) fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main><div id='modal-slot'></div>"#,
            inner_content
        )
    } else if current_path == Route::Login.path() {
        base_html(
            title,
            &format!(r#"<main class='min-h-screen flex items-center justify-center p-6'>{}</main>"#, inner_content),
        )
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>
<div id='modal-slot'></div>"#,
                nav_sidebar(current_path),
                inner_content
            ),
        )
    }
}

/// Send the client to `route`: an `HX-Redirect` for HTMX calls, a 303 otherwise
pub fn redirect_to(headers: &HeaderMap, route: Route) -> Response {
    if is_htmx_request(headers) {
        ([("HX-Redirect", route.path())], "").into_response()
    } else {
        Redirect::to(route.path()).into_response()
    }
}

/// Turn the navigation a container requested, if any, into a redirect
pub fn follow_navigation(state: &AppState, headers: &HeaderMap) -> Option<Response> {
    state
        .context
        .navigator
        .take()
        .map(|route| redirect_to(headers, route))
}

/// Redirect when `route` is not available to the saved session
pub fn guard(state: &AppState, headers: &HeaderMap, route: Route) -> Option<Response> {
    let resolved = state.context.resolve(route);
    if resolved == route {
        None
    } else {
        log::debug!("{} is not available, sending the client to {}", route, resolved);
        Some(redirect_to(headers, resolved))
    }
}

/// JSON counterpart of [`guard`]: answers 401 instead of redirecting
pub fn api_guard(state: &AppState, route: Route) -> Result<(), ApiError> {
    if state.context.resolve(route) == route {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is stopped.
pub async fn start_server(config: Config, store: StoreRef) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, store);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Billed server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Login)");
    log::info!("  - /employee/bills (Employee bills)");
    log::info!("  - /employee/bill/new (New bill)");
    log::info!("  - /admin/dashboard (Validations)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
