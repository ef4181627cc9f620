//! New bill page rendering - Full page endpoints

use axum::response::{Html, IntoResponse, Response};
use billed_core::views::error_banner;
use billed_core::Route;

use crate::AppState;

const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// New bill form; `error` is shown above it
pub fn render_new_bill(error: Option<&str>) -> String {
    let options: String = EXPENSE_TYPES
        .iter()
        .map(|t| format!("<option>{}</option>", t))
        .collect();
    format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Envoyer une note de frais</h2></div>
{error}
<div class='bg-white rounded-xl shadow-sm p-6'>
    <form data-testid='form-new-bill' method='post' action='/employee/bill/new' class='grid grid-cols-1 lg:grid-cols-2 gap-4'>
        <div>
            <label for='expense-type' class='block text-sm text-gray-500'>Type de dépense</label>
            <select required name='expense-type' data-testid='expense-type' class='w-full border rounded-lg p-2'>{options}</select>
        </div>
        <div>
            <label for='expense-name' class='block text-sm text-gray-500'>Nom de la dépense</label>
            <input type='text' name='expense-name' data-testid='expense-name' class='w-full border rounded-lg p-2' placeholder='Vol Paris Londres'>
        </div>
        <div>
            <label for='datepicker' class='block text-sm text-gray-500'>Date</label>
            <input required type='date' name='datepicker' data-testid='datepicker' class='w-full border rounded-lg p-2'>
        </div>
        <div>
            <label for='amount' class='block text-sm text-gray-500'>Montant TTC</label>
            <input required type='number' step='0.01' name='amount' data-testid='amount' class='w-full border rounded-lg p-2' placeholder='348'>
        </div>
        <div>
            <label for='vat' class='block text-sm text-gray-500'>TVA</label>
            <div class='flex gap-2'>
                <input type='number' name='vat' data-testid='vat' class='w-24 border rounded-lg p-2' placeholder='70'>
                <input type='number' name='pct' data-testid='pct' class='w-24 border rounded-lg p-2' placeholder='20'>
                <span class='self-center'>%</span>
            </div>
        </div>
        <div>
            <label for='commentary' class='block text-sm text-gray-500'>Commentaire</label>
            <textarea name='commentary' data-testid='commentary' rows='3' class='w-full border rounded-lg p-2'></textarea>
        </div>
        <div>
            <label for='file' class='block text-sm text-gray-500'>Justificatif</label>
            <input required type='file' name='file' data-testid='file' accept='.jpg,.jpeg,.png'
                hx-post='/employee/bill/new/file' hx-encoding='multipart/form-data' hx-trigger='change' hx-target='#file-status' hx-swap='innerHTML'>
            <div id='file-status' class='mt-1 text-sm'></div>
        </div>
        <div class='lg:col-span-2'>
            <button type='submit' id='btn-send-bill' class='px-4 py-2 bg-indigo-600 text-white rounded-lg'>Envoyer</button>
        </div>
    </form>
</div>"#,
        error = error.map(error_banner).unwrap_or_default(),
        options = options,
    )
}

pub async fn page_new_bill(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(redirect) = crate::guard(&state, &headers, Route::NewBill) {
        return redirect;
    }
    Html(crate::page_response(
        &headers,
        Route::NewBill.title(),
        Route::NewBill.path(),
        &render_new_bill(None),
    ))
    .into_response()
}
