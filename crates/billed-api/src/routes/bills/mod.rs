//! Employee bills routes - List of the employee's bills and proof modal
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_bills, htmx_bill_file, htmx_bills_list, htmx_new_bill_click};
pub use page::page_bills;
