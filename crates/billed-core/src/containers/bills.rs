//! Employee bills list

use std::sync::Arc;

use billed_utils::escape_html;

use crate::error::StoreError;
use crate::format::format_bill;
use crate::models::FormattedBill;
use crate::router::{Navigator, Route};
use crate::store::StoreRef;
use crate::views::Modal;

pub const MODAL_ID: &str = "modaleFile";

/// Container behind the employee's "Mes notes de frais" view
pub struct Bills {
    store: Option<StoreRef>,
    navigator: Arc<dyn Navigator>,
    modal_width: u32,
}

impl Bills {
    pub fn new(store: Option<StoreRef>, navigator: Arc<dyn Navigator>, modal_width: u32) -> Self {
        Self {
            store,
            navigator,
            modal_width,
        }
    }

    /// Bills of the logged-in employee, formatted for display
    ///
    /// Store rejections are returned untouched.
    pub async fn get_bills(&self) -> Result<Vec<FormattedBill>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let bills = store.bills().list().await?;
        log::debug!("Fetched {} bills", bills.len());
        Ok(bills.iter().map(format_bill).collect())
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Show the proof at `bill_url` in the employee modal
    pub fn handle_click_icon_eye(&self, bill_url: &str) -> Modal {
        let img_width = self.modal_width / 2;
        Modal {
            id: MODAL_ID,
            body: format!(
                "<div style='text-align: center;' class='bill-proof-container'><img width={} src='{}' alt='Bill' /></div>",
                img_width,
                escape_html(bill_url)
            ),
            open: true,
        }
    }
}
