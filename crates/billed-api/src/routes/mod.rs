//! Route modules for the HTTP server
//!
//! One module per screen:
//! - login: landing page with the employee and admin forms
//! - bills: employee bills list and proof modal
//! - new_bill: new bill form and proof upload
//! - dashboard: admin validations
//!
//! Each module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod bills;
pub mod dashboard;
pub mod login;
pub mod new_bill;
