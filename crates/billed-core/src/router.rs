//! Routes and navigation

use std::sync::RwLock;

use crate::models::Session;
use crate::types::UserType;

/// Views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "/employee/bills",
            Route::NewBill => "/employee/bill/new",
            Route::Dashboard => "/admin/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('#');
        let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
        match path.trim_end_matches('/') {
            "" => Some(Route::Login),
            "/employee/bills" => Some(Route::Bills),
            "/employee/bill/new" => Some(Route::NewBill),
            "/admin/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Connexion",
            Route::Bills => "Mes notes de frais",
            Route::NewBill => "Envoyer une note de frais",
            Route::Dashboard => "Validations",
        }
    }

    /// Landing view for a session
    pub fn for_session(session: Option<&Session>) -> Self {
        match session.map(|s| s.user_type) {
            None => Route::Login,
            Some(UserType::Employee) => Route::Bills,
            Some(UserType::Admin) => Route::Dashboard,
        }
    }

    /// View actually mounted when `self` is requested with `session`
    pub fn resolve(self, session: Option<&Session>) -> Self {
        let allowed = match (self, session.map(|s| s.user_type)) {
            (Route::Login, _) => true,
            (Route::Bills | Route::NewBill, Some(UserType::Employee)) => true,
            (Route::Dashboard, Some(UserType::Admin)) => true,
            _ => false,
        };
        if allowed {
            self
        } else {
            Route::for_session(session)
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Navigation entry point handed to the containers
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that remembers the last requested route for the HTTP layer
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    last: RwLock<Option<Route>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<Route> {
        *self.last.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Take the pending navigation, leaving none behind
    pub fn take(&self) -> Option<Route> {
        self.last.write().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        log::debug!("Navigate to {}", route);
        *self.last.write().unwrap_or_else(|e| e.into_inner()) = Some(route);
    }
}
