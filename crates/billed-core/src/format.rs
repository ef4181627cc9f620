//! Display formatting for bill dates and statuses

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{Bill, FormattedBill};
use crate::types::BillStatus;

/// Capitalized three-letter French month abbreviations
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Parse the date layouts the store is known to produce
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Short French date, e.g. `2004-04-04` becomes `4 Avr. 04`
///
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!(
            "{} {}. {:02}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year().rem_euclid(100)
        ),
        None => {
            log::warn!("Cannot format date {:?}, keeping raw value", raw);
            raw.to_string()
        }
    }
}

/// Display label of a status code; unknown codes are returned as-is
pub fn format_status(status: &BillStatus) -> String {
    match status {
        BillStatus::Pending => "En attente".to_string(),
        BillStatus::Accepted => "Accepté".to_string(),
        BillStatus::Refused => "Refused".to_string(),
        BillStatus::Other(code) => {
            log::warn!("Unknown bill status {:?}, displayed as-is", code);
            code.clone()
        }
    }
}

/// Copy of `bill` with display date and status; the stored record is untouched
pub fn format_bill(bill: &Bill) -> FormattedBill {
    FormattedBill {
        id: bill.id.clone(),
        email: bill.email.clone(),
        expense_type: bill.expense_type.clone(),
        name: bill.name.clone(),
        date: format_date(&bill.date),
        amount: bill.amount,
        vat: bill.vat.clone(),
        pct: bill.pct,
        commentary: bill.commentary.clone(),
        comment_admin: bill.comment_admin.clone(),
        file_url: bill.file_url.clone(),
        file_name: bill.file_name.clone(),
        status: format_status(&bill.status),
    }
}
