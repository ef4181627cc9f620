//! Core of the Billed expense reports front-end
//!
//! Data models, display formatting, the store interface, client-side session
//! storage, routing and the per-screen containers.

pub mod containers;
pub mod error;
pub mod format;
pub mod models;
pub mod router;
pub mod session;
pub mod store;
pub mod types;
pub mod views;

use std::sync::Arc;

use billed_config::Config;

pub use containers::{Bills, Dashboard, Login, LoginForm, NewBill, NewBillForm};
pub use error::{CoreError, CoreResult, ErrorSeverity, StoreError};
pub use format::{format_bill, format_date, format_status};
pub use models::{Bill, FormattedBill, Session, SessionInfo};
pub use router::{Navigator, RecordingNavigator, Route};
pub use session::SessionContext;
pub use store::{MemoryStore, Store, StoreRef, StoreSeed};
pub use types::{BillStatus, StatusGroup, UserType};

/// Shared handles every container is built from
#[derive(Clone)]
pub struct AppContext {
    pub store: Option<StoreRef>,
    pub session: SessionContext,
    pub navigator: Arc<RecordingNavigator>,
    pub modal_width: u32,
}

impl AppContext {
    pub fn new(config: &Config, store: Option<StoreRef>, session: SessionContext) -> Self {
        Self {
            store,
            session,
            navigator: Arc::new(RecordingNavigator::default()),
            modal_width: config.ui.modal_width,
        }
    }

    pub fn bills(&self) -> Bills {
        Bills::new(self.store.clone(), self.navigator.clone(), self.modal_width)
    }

    pub fn login(&self) -> Login {
        Login::new(self.store.clone(), self.session.clone(), self.navigator.clone())
    }

    pub fn new_bill(&self) -> NewBill {
        NewBill::new(self.store.clone(), self.navigator.clone(), self.session.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.store.clone(), self.session.clone(), self.modal_width)
    }

    /// Route actually shown for a requested path, given the saved session
    pub fn resolve(&self, route: Route) -> Route {
        route.resolve(self.session.load().as_ref())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("has_store", &self.store.is_some())
            .field("modal_width", &self.modal_width)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_uses_configured_modal_width() {
        let mut config = Config::default();
        config.ui.modal_width = 600;
        let context = AppContext::new(&config, None, SessionContext::in_memory());
        let modal = context.bills().handle_click_icon_eye("proof.png");
        assert!(modal.body.contains("width=300"));
    }

    #[test]
    fn test_context_resolves_against_saved_session() {
        let context = AppContext::new(&Config::default(), None, SessionContext::in_memory());
        assert_eq!(context.resolve(Route::Dashboard), Route::Login);
        context
            .session
            .save(&Session::connected(UserType::Admin, "admin@test.tld", "admin"))
            .unwrap();
        assert_eq!(context.resolve(Route::Dashboard), Route::Dashboard);
        assert_eq!(context.resolve(Route::Bills), Route::Dashboard);
    }
}
