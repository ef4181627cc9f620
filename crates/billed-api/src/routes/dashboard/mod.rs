//! Dashboard routes - Admin validations
//!
//! Features:
//! - Collapsible sections by status
//! - Ticket edit panel with accept and refuse
//! - Proof modal
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_dashboard_bills,
    htmx_dashboard_accept,
    htmx_dashboard_bill_file,
    htmx_dashboard_edit,
    htmx_dashboard_refuse,
    htmx_dashboard_section,
};
pub use page::page_dashboard;
