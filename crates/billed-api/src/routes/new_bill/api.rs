//! New bill endpoints - HTMX proof upload and form submission

use axum::extract::Multipart;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use billed_core::views::error_banner;
use billed_core::{NewBillForm, Route};
use billed_utils::escape_html;

use crate::{ApiError, AppState};

/// HTMX: Register the chosen proof
///
/// Only the file name reaches the store; the content is discarded.
pub async fn htmx_new_bill_file(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::NewBill) {
        return redirect;
    }
    let mut file_name = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                file_name = field.file_name().map(str::to_string);
                break;
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                return ApiError::BadRequest {
                    message: e.to_string(),
                }
                .into_response()
            }
        }
    }
    let Some(file_name) = file_name else {
        return ApiError::BadRequest {
            message: "missing file".to_string(),
        }
        .into_response();
    };

    let mut new_bill = state.new_bill.write().await;
    match new_bill.handle_change_file(&file_name).await {
        Ok(file) => Html(format!(
            "<span data-testid='file-status'>{}</span>",
            escape_html(&file.file_name)
        ))
        .into_response(),
        Err(e) => Html(error_banner(&e.label())).into_response(),
    }
}

/// Submit the form; back to the list on success, form with an error otherwise
pub async fn htmx_new_bill_submit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<NewBillForm>,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::NewBill) {
        return redirect;
    }

    let result = state.new_bill.write().await.handle_submit(&form).await;
    match result {
        Ok(_) => crate::follow_navigation(&state, &headers)
            .unwrap_or_else(|| crate::redirect_to(&headers, Route::Bills)),
        Err(e) => {
            let content = super::page::render_new_bill(Some(&e.label()));
            Html(crate::page_response(
                &headers,
                Route::NewBill.title(),
                Route::NewBill.path(),
                &content,
            ))
            .into_response()
        }
    }
}
