//! Login forms for employees and admins

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::{Session, SessionInfo};
use crate::router::{Navigator, Route};
use crate::session::SessionContext;
use crate::store::StoreRef;
use crate::types::UserType;

/// Raw values of a login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Container behind the two login forms of the landing page
pub struct Login {
    store: Option<StoreRef>,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    logger: DefaultErrorLogger,
}

impl Login {
    pub fn new(store: Option<StoreRef>, session: SessionContext, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            session,
            navigator,
            logger: DefaultErrorLogger,
        }
    }

    pub async fn handle_submit_employee(&self, form: &LoginForm) -> CoreResult<Session> {
        self.submit(UserType::Employee, form).await
    }

    pub async fn handle_submit_admin(&self, form: &LoginForm) -> CoreResult<Session> {
        self.submit(UserType::Admin, form).await
    }

    async fn submit(&self, user_type: UserType, form: &LoginForm) -> CoreResult<Session> {
        validate(form);
        let session = Session::connected(user_type, form.email.as_str(), form.password.as_str());
        let context = ErrorContext::new("login.submit").with_user(Some(session.email.clone()));

        let info = match self.login(&session).await {
            Ok(info) => info,
            Err(e) => {
                self.logger.log_error(&e, &context);
                return Err(e);
            }
        };

        self.session.save(&session)?;
        self.session.save_token(&info);
        log::info!("{} logged in as {}", session.email, user_type);
        self.navigator.navigate(Route::for_session(Some(&session)));
        Ok(session)
    }

    /// Log in, registering the account and retrying once if the store refuses
    async fn login(&self, session: &Session) -> CoreResult<SessionInfo> {
        let store = self.store.as_ref().ok_or(CoreError::NoStore)?;
        let credentials = serde_json::to_string(&session.credentials())?;

        match store.login(&credentials).await {
            Ok(info) => return Ok(info),
            Err(e) => log::debug!("Login refused for {} ({}), creating the account", session.email, e),
        }

        let user = serde_json::to_string(&session.new_user())?;
        if let Err(e) = store.create_user(&user).await {
            log::warn!("Could not create user {}: {}", session.email, e);
        }

        Ok(store.login(&credentials).await?)
    }
}

/// Form checks; browser-side `required` attributes are the only rule so far
fn validate(_form: &LoginForm) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::{Bill, NewBillPayload};
    use crate::router::RecordingNavigator;
    use crate::session::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};
    use crate::store::{BillsStore, MemoryStore, Store, StoreSeed, StoreUser};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store that refuses the first `refusals` logins and records every call
    #[derive(Default)]
    struct RecordingStore {
        refusals: Mutex<u32>,
        logins: Mutex<Vec<String>>,
        users: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BillsStore for RecordingStore {
        async fn list(&self) -> Result<Vec<Bill>, StoreError> {
            Ok(Vec::new())
        }
        async fn create(&self, _payload: NewBillPayload) -> Result<Bill, StoreError> {
            Err(StoreError::message("unused"))
        }
        async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
            Ok(bill.clone())
        }
    }

    #[async_trait]
    impl Store for RecordingStore {
        fn bills(&self) -> &dyn BillsStore {
            self
        }
        async fn login(&self, credentials: &str) -> Result<SessionInfo, StoreError> {
            self.logins.lock().unwrap().push(credentials.to_string());
            let mut refusals = self.refusals.lock().unwrap();
            if *refusals > 0 {
                *refusals -= 1;
                return Err(StoreError::unauthorized());
            }
            Ok(SessionInfo {
                jwt: Some("token".to_string()),
            })
        }
        async fn create_user(&self, user: &str) -> Result<SessionInfo, StoreError> {
            self.users.lock().unwrap().push(user.to_string());
            Ok(SessionInfo::default())
        }
    }

    struct Harness {
        login: Login,
        storage: Arc<MemoryStorage>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness(store: Option<StoreRef>) -> Harness {
        let storage = Arc::new(MemoryStorage::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let login = Login::new(store, SessionContext::new(storage.clone()), navigator.clone());
        Harness {
            login,
            storage,
            navigator,
        }
    }

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_employee_login_saves_session_and_navigates() {
        let store = Arc::new(RecordingStore::default());
        let h = harness(Some(store.clone()));

        let session = h
            .login
            .handle_submit_employee(&form("johndoe@email.com", "azerty"))
            .await
            .unwrap();

        assert_eq!(session.user_type, UserType::Employee);
        assert_eq!(
            h.storage.get_item(USER_KEY).unwrap(),
            r#"{"type":"Employee","email":"johndoe@email.com","password":"azerty","status":"connected"}"#
        );
        assert_eq!(h.storage.get_item(TOKEN_KEY).as_deref(), Some("token"));
        assert_eq!(h.navigator.last(), Some(Route::Bills));
        assert_eq!(
            store.logins.lock().unwrap().as_slice(),
            [r#"{"email":"johndoe@email.com","password":"azerty"}"#.to_string()]
        );
        assert!(store.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_login_navigates_to_dashboard() {
        let h = harness(Some(Arc::new(RecordingStore::default())));
        let session = h
            .login
            .handle_submit_admin(&form("admin@company.tld", "pw"))
            .await
            .unwrap();
        assert!(session.is_admin());
        assert_eq!(h.navigator.last(), Some(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_refused_login_creates_user_then_retries() {
        let store = Arc::new(RecordingStore {
            refusals: Mutex::new(1),
            ..Default::default()
        });
        let h = harness(Some(store.clone()));

        h.login
            .handle_submit_admin(&form("jane.roe@company.tld", "pw"))
            .await
            .unwrap();

        assert_eq!(store.logins.lock().unwrap().len(), 2);
        let users = store.users.lock().unwrap();
        let user: serde_json::Value = serde_json::from_str(&users[0]).unwrap();
        assert_eq!(
            user,
            serde_json::json!({
                "type": "Admin",
                "name": "jane.roe",
                "email": "jane.roe@company.tld",
                "password": "pw",
                "status": "connected"
            })
        );
        assert_eq!(h.navigator.last(), Some(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_second_refusal_keeps_form() {
        let store = Arc::new(RecordingStore {
            refusals: Mutex::new(2),
            ..Default::default()
        });
        let h = harness(Some(store));

        let err = h
            .login
            .handle_submit_employee(&form("e@company.tld", "bad"))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::AuthFailure { message: "Unauthorized".to_string() });
        assert!(h.storage.get_item(USER_KEY).is_none());
        assert!(h.navigator.last().is_none());
    }

    #[tokio::test]
    async fn test_login_without_store() {
        let h = harness(None);
        let err = h.login.handle_submit_employee(&form("e@e", "pw")).await.unwrap_err();
        assert_eq!(err, CoreError::NoStore);
        assert!(h.navigator.last().is_none());
    }

    #[tokio::test]
    async fn test_login_against_memory_store() {
        let seed = StoreSeed {
            users: vec![StoreUser {
                user_type: UserType::Employee,
                email: "employee@test.tld".to_string(),
                password: "employee".to_string(),
                name: "employee".to_string(),
            }],
            bills: Vec::new(),
        };
        let store = Arc::new(MemoryStore::new(seed));
        let h = harness(Some(store.clone()));

        h.login
            .handle_submit_employee(&form("employee@test.tld", "employee"))
            .await
            .unwrap();
        assert_eq!(store.current_user().as_deref(), Some("employee@test.tld"));
        assert!(h.storage.get_item(TOKEN_KEY).is_some());
    }
}
