//! Error types for billed-core
//!
//! Store rejections are kept as-is in [`StoreError`] so containers can hand
//! them back unchanged; [`CoreError`] classifies everything a container can
//! fail with, and knows how to present itself to the user and to the log.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reason of a store call: an HTTP-like status and a message
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct StoreError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl StoreError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Generic failure without a status code
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    /// Text shown in place of a view that failed to load
    pub fn label(&self) -> String {
        match self.status {
            Some(status) => format!("Erreur {}", status),
            None if self.message.starts_with("Erreur") => self.message.clone(),
            None => format!("Erreur {}", self.message),
        }
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NetworkFailure,
    MalformedResponse,
    ValidationFailure,
    AuthFailure,
    NoStore,
    BillNotFound,
    StorageError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkFailure => write!(f, "NETWORK_FAILURE"),
            ErrorCode::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            ErrorCode::ValidationFailure => write!(f, "VALIDATION_FAILURE"),
            ErrorCode::AuthFailure => write!(f, "AUTH_FAILURE"),
            ErrorCode::NoStore => write!(f, "NO_STORE"),
            ErrorCode::BillNotFound => write!(f, "BILL_NOT_FOUND"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            status: None,
            suggestions: vec![],
        }
    }

    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (status {})", status)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Main error type for billed-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Network failure: {message}")]
    NetworkFailure { status: Option<u16>, message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Validation failure: {message}")]
    ValidationFailure { message: String },

    #[error("Authentication failed: {message}")]
    AuthFailure { message: String },

    #[error("No store configured")]
    NoStore,

    #[error("Bill not found: {id}")]
    BillNotFound { id: String },

    #[error("Session storage error: {message}")]
    Storage { message: String },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NetworkFailure { .. } => ErrorCode::NetworkFailure,
            CoreError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            CoreError::ValidationFailure { .. } => ErrorCode::ValidationFailure,
            CoreError::AuthFailure { .. } => ErrorCode::AuthFailure,
            CoreError::NoStore => ErrorCode::NoStore,
            CoreError::BillNotFound { .. } => ErrorCode::BillNotFound,
            CoreError::Storage { .. } => ErrorCode::StorageError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NetworkFailure { .. } => ErrorSeverity::Error,
            CoreError::MalformedResponse { .. } => ErrorSeverity::Error,
            CoreError::ValidationFailure { .. } => ErrorSeverity::Info,
            CoreError::AuthFailure { .. } => ErrorSeverity::Warning,
            CoreError::NoStore => ErrorSeverity::Warning,
            CoreError::BillNotFound { .. } => ErrorSeverity::Info,
            CoreError::Storage { .. } => ErrorSeverity::Error,
        }
    }

    /// Text shown to the user in place of the failed region
    pub fn label(&self) -> String {
        match self {
            CoreError::NetworkFailure { status: Some(status), .. } => format!("Erreur {}", status),
            CoreError::NetworkFailure { message, .. } if message.starts_with("Erreur") => message.clone(),
            CoreError::NetworkFailure { message, .. }
            | CoreError::MalformedResponse { message }
            | CoreError::ValidationFailure { message }
            | CoreError::AuthFailure { message }
            | CoreError::Storage { message } => format!("Erreur {}", message),
            CoreError::NoStore => "Erreur store indisponible".to_string(),
            CoreError::BillNotFound { id } => format!("Erreur note de frais {} introuvable", id),
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        let status = match self {
            CoreError::NetworkFailure { status, .. } => *status,
            _ => None,
        };
        let mut details = ErrorDetails::new(self.code(), self.to_string()).with_status(status);

        match self {
            CoreError::NetworkFailure { status: Some(500..=599), .. } => {
                details = details.with_suggestion("The store failed; try again later.".to_string());
            }
            CoreError::AuthFailure { .. } => {
                details = details.with_suggestion("Check the email and password.".to_string());
            }
            CoreError::ValidationFailure { message } => {
                details = details.with_suggestion(message.clone());
            }
            CoreError::NoStore => {
                details = details.with_suggestion("Configure a store before loading views.".to_string());
            }
            _ => {}
        }

        details
    }
}

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        match error.status {
            Some(401) | Some(403) => CoreError::AuthFailure { message: error.message },
            status => CoreError::NetworkFailure {
                status,
                message: error.message,
            },
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::MalformedResponse {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// User email (if logged in)
    pub user: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        };
        log::log!(
            target: "billed::error",
            level,
            "{} - Operation: {} - User: {:?}",
            error.to_details(),
            context.operation,
            context.user
        );
    }
}

// ==================== Tests ====================
