//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Only `Unauthorized` has side effects beyond the page that saw it (applied
//! by `ApiClient` before the error is returned). Every other variant ends at
//! the page as a notice or an inline form message.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

use super::scope::RequestScope;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Session expired. Please login again.")]
    Unauthorized { scope: RequestScope },
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Text for a user-visible notice.
    ///
    /// Server-provided messages win; transport problems get a generic retry
    /// hint; anything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthorized { .. } | Self::Validation(_) => self.to_string(),
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            Self::Network(_) => "Unable to reach the server. Please check your connection.".to_owned(),
            Self::Timeout(_) => "The server took too long to respond. Please try again.".to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract a displayable message from an error response body.
///
/// Prefers a JSON `message` (then `error`) field; otherwise returns the
/// trimmed body capped at 200 characters.
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return truncate(message.trim());
        }
    }
    truncate(body.trim())
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_CHARS {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(MAX_ERROR_CHARS).collect();
        format!("{cut}...")
    }
}
