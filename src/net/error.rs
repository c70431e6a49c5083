//! Auth error taxonomy and HTTP response classification.
//!
//! ERROR HANDLING
//! ==============
//! Every non-success API response is folded into one [`AuthError`] by
//! [`classify_response`], so pages only ever render `Display` text and never
//! inspect raw status codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// A single field-level problem reported by the API or by local form checks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    /// Form field name (`email`, `password`, ...) or `form` when not field specific.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Failure of an auth/session operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Bad credentials, or a missing/expired/revoked session.
    #[error("{0}")]
    Authentication(String),
    /// Field-level problems; one entry per offending field.
    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldError>),
    /// The account already exists.
    #[error("{0}")]
    Conflict(String),
    /// No response from the server.
    #[error("network error: {0}")]
    Network(String),
    /// Any other non-success status, or a success body that failed to decode.
    #[error("unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl AuthError {
    /// Message for `field`, when this is a validation error that names it.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Validation(errors) => errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Which call produced a response; some statuses mean different things per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    Register,
    Profile,
    Upload,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldIssue>),
}

#[derive(Debug, Deserialize)]
struct FieldIssue {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl FieldIssue {
    /// Last string segment of `loc`, skipping the `body`/`query` prefix.
    fn field(&self) -> String {
        self.loc
            .iter()
            .rev()
            .filter_map(serde_json::Value::as_str)
            .find(|s| !matches!(*s, "body" | "query" | "path"))
            .unwrap_or("form")
            .to_owned()
    }
}

/// Map a non-success HTTP response to an [`AuthError`].
pub fn classify_response(kind: RequestKind, status: u16, body: &str) -> AuthError {
    let detail = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.detail);

    if let Some(ErrorDetail::Fields(issues)) = &detail {
        if matches!(status, 400 | 422) {
            return AuthError::Validation(
                issues.iter().map(|i| FieldError::new(i.field(), i.msg.clone())).collect(),
            );
        }
    }

    let message = match detail {
        Some(ErrorDetail::Message(message)) => Some(message),
        _ => None,
    };

    match status {
        401 | 403 => AuthError::Authentication(message.unwrap_or_else(|| match kind {
            RequestKind::Login => "Incorrect email or password".to_owned(),
            _ => "Session expired, please sign in again".to_owned(),
        })),
        409 => AuthError::Conflict(message.unwrap_or_else(|| "Email already registered".to_owned())),
        400 if kind == RequestKind::Register && message.as_deref().is_some_and(is_duplicate_email) => {
            AuthError::Conflict(message.unwrap_or_default())
        }
        400 | 422 if message.is_some() => {
            AuthError::Validation(vec![FieldError::new("form", message.unwrap_or_default())])
        }
        _ => AuthError::Unexpected {
            status,
            message: message.unwrap_or_else(|| "request failed".to_owned()),
        },
    }
}

fn is_duplicate_email(message: &str) -> bool {
    message.to_ascii_lowercase().contains("already registered")
}
