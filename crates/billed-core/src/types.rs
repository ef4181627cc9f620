//! Basic types shared by the bill and session models

use serde::{Deserialize, Serialize};

/// Bill status in the validation workflow
///
/// Statuses are stored verbatim; anything outside the three known values is
/// kept as `Other` so that a bad record never breaks rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    /// Submitted, waiting for an admin
    Pending,
    /// Validated by an admin
    Accepted,
    /// Refused by an admin
    Refused,
    /// Unknown status code, kept as received
    Other(String),
}

impl BillStatus {
    /// Raw status code as stored
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Other(code) => code,
        }
    }
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Pending
    }
}

impl From<&str> for BillStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            other => BillStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BillStatus {
    fn from(s: String) -> Self {
        BillStatus::from(s.as_str())
    }
}

impl From<BillStatus> for String {
    fn from(status: BillStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of account a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

impl std::str::FromStr for UserType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(UserType::Employee),
            "admin" => Ok(UserType::Admin),
            _ => Err(format!("Invalid user type: {}", s)),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Employee => write!(f, "Employee"),
            UserType::Admin => write!(f, "Admin"),
        }
    }
}

/// One of the three collapsible sections of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusGroup {
    Pending,
    Accepted,
    Refused,
}

impl StatusGroup {
    pub const ALL: [StatusGroup; 3] = [StatusGroup::Pending, StatusGroup::Accepted, StatusGroup::Refused];

    /// Section number used in element ids (1, 2, 3)
    pub fn index(&self) -> u8 {
        match self {
            StatusGroup::Pending => 1,
            StatusGroup::Accepted => 2,
            StatusGroup::Refused => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(StatusGroup::Pending),
            2 => Some(StatusGroup::Accepted),
            3 => Some(StatusGroup::Refused),
            _ => None,
        }
    }

    /// Status of the bills listed in this section
    pub fn status(&self) -> BillStatus {
        match self {
            StatusGroup::Pending => BillStatus::Pending,
            StatusGroup::Accepted => BillStatus::Accepted,
            StatusGroup::Refused => BillStatus::Refused,
        }
    }

    /// Section title
    pub fn label(&self) -> &'static str {
        match self {
            StatusGroup::Pending => "En attente",
            StatusGroup::Accepted => "Validé",
            StatusGroup::Refused => "Refusé",
        }
    }
}
