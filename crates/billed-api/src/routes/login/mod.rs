//! Login routes - Landing page with the employee and admin forms
//!
//! Structure:
//! - api.rs: Form submissions and session JSON
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_session, htmx_login_admin, htmx_login_employee};
pub use page::page_login;
