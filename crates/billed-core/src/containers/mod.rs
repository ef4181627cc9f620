//! View containers: one per screen, each owning its handlers

pub mod bills;
pub mod dashboard;
pub mod login;
pub mod new_bill;

pub use bills::Bills;
pub use dashboard::{cards, filtered_bills, Dashboard};
pub use login::{Login, LoginForm};
pub use new_bill::{NewBill, NewBillForm, UploadedFile};
