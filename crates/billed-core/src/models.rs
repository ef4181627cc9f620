//! Core data models: bills, sessions and store payloads

use serde::{Deserialize, Serialize};

use super::types::{BillStatus, UserType};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Expense report record as exchanged with the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Store identifier
    pub id: String,
    /// Email of the employee who filed the bill
    #[serde(default)]
    pub email: String,
    /// Expense category (e.g. "Transports", "Hôtel et logement")
    #[serde(rename = "type", default)]
    pub expense_type: String,
    /// Expense label
    #[serde(default)]
    pub name: String,
    /// Raw date as stored, formatted only for display
    #[serde(default)]
    pub date: String,
    /// Amount including taxes, in euros
    #[serde(default)]
    pub amount: f64,
    /// VAT amount, free text
    #[serde(default)]
    pub vat: String,
    /// VAT percentage
    #[serde(default)]
    pub pct: u32,
    /// Employee comment
    #[serde(default)]
    pub commentary: String,
    /// Admin comment written when accepting or refusing
    #[serde(default)]
    pub comment_admin: String,
    /// URL of the attached proof
    #[serde(default)]
    pub file_url: Option<String>,
    /// File name of the attached proof
    #[serde(default)]
    pub file_name: Option<String>,
    /// Raw workflow status
    pub status: BillStatus,
}

impl Bill {
    /// Whether the attached proof can be shown as an image
    pub fn has_image_proof(&self) -> bool {
        self.file_name
            .as_deref()
            .or(self.file_url.as_deref())
            .map(is_image_file)
            .unwrap_or(false)
    }

    /// First and last name derived from a `first.last@domain` email
    pub fn holder_names(&self) -> (String, String) {
        let local = self.email.split('@').next().unwrap_or_default();
        match local.split_once('.') {
            Some((first, rest)) => {
                let last = rest.split('.').next().unwrap_or_default();
                (first.to_string(), last.to_string())
            }
            None => (String::new(), local.to_string()),
        }
    }
}

/// Whether a file name or URL points at an accepted image type
pub fn is_image_file(name: &str) -> bool {
    let path = name.split(['?', '#']).next().unwrap_or_default();
    path.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Bill with its date and status replaced by their display strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub comment_admin: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: String,
}

/// Locally persisted record of the logged-in user
///
/// The password is kept in clear text, as the login flow has always done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
    pub password: String,
    pub status: String,
}

impl Session {
    pub const CONNECTED: &'static str = "connected";

    /// Session for a user that just submitted the login form
    pub fn connected(user_type: UserType, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
            password: password.into(),
            status: Self::CONNECTED.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    /// Credentials sent to the store's login endpoint
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// Account registration payload derived from this session
    pub fn new_user(&self) -> NewUser {
        NewUser {
            user_type: self.user_type,
            name: self.email.split('@').next().unwrap_or_default().to_string(),
            email: self.email.clone(),
            password: self.password.clone(),
            status: self.status.clone(),
        }
    }
}

/// Store answer to a login or registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub jwt: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: String,
}

/// Payload of `bills().create()`: registers the proof before the bill is filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillPayload {
    pub email: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(email: &str, file_name: Option<&str>) -> Bill {
        Bill {
            id: "b1".to_string(),
            email: email.to_string(),
            expense_type: "Transports".to_string(),
            name: "train".to_string(),
            date: "2024-06-01".to_string(),
            amount: 100.0,
            vat: "20".to_string(),
            pct: 20,
            commentary: String::new(),
            comment_admin: String::new(),
            file_url: file_name.map(|n| format!("/files/b1/{}", n)),
            file_name: file_name.map(|n| n.to_string()),
            status: BillStatus::Pending,
        }
    }

    #[test]
    fn test_bill_deserializes_store_record() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://example.com/preview-facture.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount, 400.0);
        assert!(bill.has_image_proof());
    }

    #[test]
    fn test_holder_names() {
        assert_eq!(
            bill("john.doe@company.tld", None).holder_names(),
            ("john".to_string(), "doe".to_string())
        );
        assert_eq!(bill("a@a", None).holder_names(), (String::new(), "a".to_string()));
    }

    #[test]
    fn test_image_detection() {
        assert!(bill("a@a", Some("photo.PNG")).has_image_proof());
        assert!(!bill("a@a", Some("facture.pdf")).has_image_proof());
        assert!(!bill("a@a", None).has_image_proof());
        assert!(is_image_file("https://host/x.jpeg?token=1"));
    }

    #[test]
    fn test_session_serialization_order() {
        let session = Session::connected(UserType::Employee, "employee@test.tld", "employee");
        assert_eq!(
            serde_json::to_string(&session).unwrap(),
            r#"{"type":"Employee","email":"employee@test.tld","password":"employee","status":"connected"}"#
        );
    }

    #[test]
    fn test_new_user_payload() {
        let session = Session::connected(UserType::Admin, "jane.roe@test.tld", "pw");
        let user = session.new_user();
        assert_eq!(user.name, "jane.roe");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({
                "type": "Admin",
                "name": "jane.roe",
                "email": "jane.roe@test.tld",
                "password": "pw",
                "status": "connected"
            })
        );
    }
}
