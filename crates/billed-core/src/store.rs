//! Remote store interface and the in-memory store used by the server

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult, StoreError};
use crate::format::parse_date;
use crate::models::{Bill, Credentials, NewBillPayload, NewUser, SessionInfo};
use crate::types::{BillStatus, UserType};

/// Store reference type
pub type StoreRef = Arc<dyn Store>;

/// Bill collection of the store
#[async_trait]
pub trait BillsStore: Send + Sync {
    /// Bills visible to the logged-in user
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Register a proof file and return the draft bill holding it
    async fn create(&self, payload: NewBillPayload) -> Result<Bill, StoreError>;

    /// Replace a bill, matched by id
    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError>;
}

/// Remote persistence collaborator
#[async_trait]
pub trait Store: Send + Sync {
    fn bills(&self) -> &dyn BillsStore;

    /// Log in with JSON `{email, password}`
    async fn login(&self, credentials: &str) -> Result<SessionInfo, StoreError>;

    /// Register an account from JSON `{type, name, email, password, status}`
    async fn create_user(&self, user: &str) -> Result<SessionInfo, StoreError>;
}

/// Account known to the in-memory store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Initial content of the in-memory store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSeed {
    #[serde(default)]
    pub users: Vec<StoreUser>,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl StoreSeed {
    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        serde_yaml::from_str(content).map_err(|e| CoreError::MalformedResponse {
            message: format!("invalid store seed: {}", e),
        })
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Storage {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }
}

type CurrentUser = Arc<RwLock<Option<StoreUser>>>;

/// Bill collection of [`MemoryStore`]
pub struct MemoryBills {
    bills: RwLock<Vec<Bill>>,
    current: CurrentUser,
}

impl MemoryBills {
    fn current_user(&self) -> Result<StoreUser, StoreError> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(StoreError::unauthorized)
    }
}

#[async_trait]
impl BillsStore for MemoryBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let user = self.current_user()?;
        let bills = self.bills.read().unwrap_or_else(|e| e.into_inner());
        let mut visible: Vec<Bill> = bills
            .iter()
            .filter(|b| user.user_type == UserType::Admin || b.email == user.email)
            .cloned()
            .collect();
        // Unparseable dates come first, in raw order
        visible.sort_by_cached_key(|b| (parse_date(&b.date), b.date.clone()));
        log::debug!("Listing {} bills for {}", visible.len(), user.email);
        Ok(visible)
    }

    async fn create(&self, payload: NewBillPayload) -> Result<Bill, StoreError> {
        self.current_user()?;
        let id = billed_utils::generate_id();
        let bill = Bill {
            file_url: Some(format!("/files/{}/{}", id, payload.file_name)),
            file_name: Some(payload.file_name),
            email: payload.email,
            id,
            expense_type: String::new(),
            name: String::new(),
            date: String::new(),
            amount: 0.0,
            vat: String::new(),
            pct: 20,
            commentary: String::new(),
            comment_admin: String::new(),
            status: BillStatus::Pending,
        };
        self.bills.write().unwrap_or_else(|e| e.into_inner()).push(bill.clone());
        log::info!("Created bill {} for {}", bill.id, bill.email);
        Ok(bill)
    }

    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        self.current_user()?;
        let mut bills = self.bills.write().unwrap_or_else(|e| e.into_inner());
        let slot = bills
            .iter_mut()
            .find(|b| b.id == bill.id)
            .ok_or_else(StoreError::not_found)?;
        *slot = bill.clone();
        log::info!("Updated bill {} (status {})", bill.id, bill.status);
        Ok(bill.clone())
    }
}

/// Store kept in process memory, scoped to the last logged-in user
pub struct MemoryStore {
    bills: MemoryBills,
    users: RwLock<HashMap<String, StoreUser>>,
    current: CurrentUser,
}

impl MemoryStore {
    pub fn new(seed: StoreSeed) -> Self {
        let current: CurrentUser = Arc::new(RwLock::new(None));
        let users = seed
            .users
            .into_iter()
            .map(|u| (u.email.clone(), u))
            .collect();
        Self {
            bills: MemoryBills {
                bills: RwLock::new(seed.bills),
                current: current.clone(),
            },
            users: RwLock::new(users),
            current,
        }
    }

    pub fn empty() -> Self {
        Self::new(StoreSeed::default())
    }

    /// Email of the user the store currently answers for
    pub fn current_user(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|u| u.email.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn bills(&self) -> &dyn BillsStore {
        &self.bills
    }

    async fn login(&self, credentials: &str) -> Result<SessionInfo, StoreError> {
        let credentials: Credentials =
            serde_json::from_str(credentials).map_err(|_| StoreError::new(400, "Bad Request"))?;
        let user = self
            .users
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&credentials.email)
            .filter(|u| u.password == credentials.password)
            .cloned()
            .ok_or_else(StoreError::unauthorized)?;

        log::info!("{} logged in as {}", user.email, user.user_type);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
        Ok(SessionInfo {
            jwt: Some(billed_utils::generate_id()),
        })
    }

    async fn create_user(&self, user: &str) -> Result<SessionInfo, StoreError> {
        let user: NewUser = serde_json::from_str(user).map_err(|_| StoreError::new(400, "Bad Request"))?;
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        if users.contains_key(&user.email) {
            return Err(StoreError::new(409, "Conflict"));
        }
        log::info!("User with {} is created", user.email);
        users.insert(
            user.email.clone(),
            StoreUser {
                user_type: user.user_type,
                email: user.email,
                password: user.password,
                name: user.name,
            },
        );
        Ok(SessionInfo::default())
    }
}
