//! New bill routes - Form, proof upload and submission
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{htmx_new_bill_file, htmx_new_bill_submit};
pub use page::page_new_bill;
