//! Employee bills page rendering - Full page endpoints

use axum::response::{Html, IntoResponse, Response};
use billed_core::views::{self, EYE_ICON_SVG};
use billed_core::{FormattedBill, Route};
use billed_utils::{escape_html, format_amount};

use crate::AppState;

fn bill_row(bill: &FormattedBill) -> String {
    let url = bill.file_url.as_deref().unwrap_or("");
    format!(
        r#"<tr class='border-b'>
    <td class='py-2'>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td><span data-testid='icon-eye' data-bill-url='{url}' class='cursor-pointer' hx-get='/employee/bills/file?url={query}' hx-target='#modal-slot' hx-swap='innerHTML'>{eye}</span></td>
</tr>"#,
        escape_html(&bill.expense_type),
        escape_html(&bill.name),
        escape_html(&bill.date),
        format_amount(bill.amount),
        escape_html(&bill.status),
        url = escape_html(url),
        query = escape_html(&urlencoding::encode(url)),
        eye = EYE_ICON_SVG,
    )
}

/// Table of the employee's bills
pub fn render_bills_table(bills: &[FormattedBill]) -> String {
    let rows: String = bills.iter().map(bill_row).collect();
    format!(
        r#"<table id='example' class='w-full text-left bg-white rounded-xl shadow-sm'>
    <thead class='text-sm text-gray-500'>
        <tr><th class='py-2'>Type</th><th>Nom</th><th>Date</th><th>Montant</th><th>Statut</th><th>Actions</th></tr>
    </thead>
    <tbody data-testid='tbody'>{}</tbody>
</table>"#,
        rows
    )
}

/// Header of the view with the new bill button
fn bills_header() -> &'static str {
    r#"<div class='flex justify-between items-center mb-6'>
    <h2 class='text-2xl font-bold'>Mes notes de frais</h2>
    <button type='button' data-testid='btn-new-bill' hx-post='/employee/bills/new' class='px-4 py-2 bg-indigo-600 text-white rounded-lg'>Nouvelle note de frais</button>
</div>"#
}

pub async fn page_bills(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::Bills) {
        return redirect;
    }

    let inner_content = format!(
        r#"{}<div id='bills-content' hx-get='/employee/bills/list' hx-trigger='load' hx-swap='innerHTML'>{}</div>"#,
        bills_header(),
        views::loading_page()
    );
    Html(crate::page_response(&headers, Route::Bills.title(), Route::Bills.path(), &inner_content)).into_response()
}
