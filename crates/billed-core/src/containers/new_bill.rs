//! New bill form

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::models::{is_image_file, Bill, NewBillPayload};
use crate::router::{Navigator, Route};
use crate::session::SessionContext;
use crate::store::StoreRef;
use crate::types::BillStatus;

/// VAT percentage used when the form leaves it empty
pub const DEFAULT_PCT: u32 = 20;

/// Raw values of the new bill form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewBillForm {
    #[serde(rename = "expense-type")]
    pub expense_type: String,
    #[serde(rename = "expense-name")]
    pub name: String,
    pub datepicker: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Proof registered by `handle_change_file`
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub bill_id: String,
    pub file_url: Option<String>,
    pub file_name: String,
}

/// Container behind the "Envoyer une note de frais" form
pub struct NewBill {
    store: Option<StoreRef>,
    navigator: Arc<dyn Navigator>,
    session: SessionContext,
    file: Option<UploadedFile>,
}

impl NewBill {
    pub fn new(store: Option<StoreRef>, navigator: Arc<dyn Navigator>, session: SessionContext) -> Self {
        Self {
            store,
            navigator,
            session,
            file: None,
        }
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// Register a proof; only jpg, jpeg and png files reach the store
    pub async fn handle_change_file(&mut self, file_name: &str) -> CoreResult<&UploadedFile> {
        let file_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        if !is_image_file(file_name) {
            self.file = None;
            return Err(CoreError::ValidationFailure {
                message: format!("{} is not a jpg, jpeg or png file", file_name),
            });
        }

        let store = self.store.as_ref().ok_or(CoreError::NoStore)?;
        let payload = NewBillPayload {
            email: self.session.email().unwrap_or_default(),
            file_name: file_name.to_string(),
        };
        let created = store.bills().create(payload).await?;
        log::debug!("Proof {} registered as bill {}", file_name, created.id);

        Ok(&*self.file.insert(UploadedFile {
            bill_id: created.id,
            file_url: created.file_url,
            file_name: created.file_name.unwrap_or_else(|| file_name.to_string()),
        }))
    }

    /// Fill in the bill registered with the proof and send it for validation
    pub async fn handle_submit(&mut self, form: &NewBillForm) -> CoreResult<Bill> {
        let file = self.file.as_ref().ok_or_else(|| CoreError::ValidationFailure {
            message: "a jpg, jpeg or png proof is required".to_string(),
        })?;
        let bill = build_bill(form, file, self.session.email().unwrap_or_default())?;

        let store = self.store.as_ref().ok_or(CoreError::NoStore)?;
        let updated = store.bills().update(&bill).await?;
        log::info!("Bill {} submitted by {}", updated.id, updated.email);

        self.file = None;
        self.navigator.navigate(Route::Bills);
        Ok(updated)
    }
}

fn build_bill(form: &NewBillForm, file: &UploadedFile, email: String) -> CoreResult<Bill> {
    let amount = parse_number::<f64>("amount", &form.amount)?.unwrap_or(0.0);
    let pct = parse_number::<u32>("pct", &form.pct)?.unwrap_or(DEFAULT_PCT);
    Ok(Bill {
        id: file.bill_id.clone(),
        email,
        expense_type: form.expense_type.clone(),
        name: form.name.clone(),
        date: form.datepicker.clone(),
        amount,
        vat: form.vat.clone(),
        pct,
        commentary: form.commentary.clone(),
        comment_admin: String::new(),
        file_url: file.file_url.clone(),
        file_name: Some(file.file_name.clone()),
        status: BillStatus::Pending,
    })
}

/// Parse an optional numeric field; blank means absent
fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> CoreResult<Option<T>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| CoreError::ValidationFailure {
        message: format!("{} must be a number, got '{}'", field, raw),
    })
}
