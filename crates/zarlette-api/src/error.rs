//! # Client Error Types
//!
//! Error types for REST client operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Client Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │   Server-Rejected       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  (no response,  │  │  NotFound     (404)     │ │
//! │  │  ConfigLoad     │  │   timeout, DNS) │  │  Conflict     (409)     │ │
//! │  │  ConfigSave     │  │                 │  │  Validation (400/422)   │ │
//! │  └─────────────────┘  │  Decode         │  │  Server     (5xx/rest)  │ │
//! │                       └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status-mapped variants carry the server's message body when one was
//! present, because the UI surfaces the server's wording verbatim. Nothing
//! here is retried automatically.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering config, transport, and server failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid API configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Base URL failed to parse or has an unusable scheme.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Failed to load the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (connection refused, DNS,
    /// timeout) or failed at the HTTP layer.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response arrived but its body was not the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    // =========================================================================
    // Server-Rejected Errors (status-mapped)
    // =========================================================================
    /// 401 from the collaborator.
    #[error("Authentication required")]
    Unauthorized { message: Option<String> },

    /// 404 from the collaborator.
    #[error("Not found{}", fmt_suffix(.message))]
    NotFound { message: Option<String> },

    /// 400/422 from the collaborator.
    #[error("Validation error{}", fmt_suffix(.message))]
    Validation { message: Option<String> },

    /// 409 from the collaborator (e.g. category still referenced by
    /// products).
    #[error("Conflict{}", fmt_suffix(.message))]
    Conflict { message: Option<String> },

    /// Any other non-success status.
    #[error("Server error ({status}){}", fmt_suffix(.message))]
    Server { status: u16, message: Option<String> },
}

fn fmt_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// True when the request got no usable response at all: connection
    /// refused, DNS failure, timeout, or a broken body stream.
    pub fn is_network(&self) -> bool {
        match self {
            ClientError::Transport(e) => {
                e.is_connect() || e.is_timeout() || e.is_request() || e.status().is_none()
            }
            _ => false,
        }
    }

    /// True for the 409 "resource still referenced" case.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict { .. })
    }

    /// True when the server rejected the request with a status.
    pub fn is_server_rejected(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized { .. }
                | ClientError::NotFound { .. }
                | ClientError::Validation { .. }
                | ClientError::Conflict { .. }
                | ClientError::Server { .. }
        )
    }

    /// The server-provided message body, when one was present.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message }
            | ClientError::NotFound { message }
            | ClientError::Validation { message }
            | ClientError::Conflict { message }
            | ClientError::Server { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// The message the UI shows the user.
    ///
    /// Server messages win when present; transport failures collapse to the
    /// fixed connectivity message; anything else falls back to the error's
    /// own description.
    pub fn user_message(&self) -> String {
        if let Some(msg) = self.server_message() {
            return msg.to_string();
        }
        if self.is_network() {
            return "No response from server. Check your network connection.".to_string();
        }
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = ClientError::Validation {
            message: Some("The grand_total field is required.".to_string()),
        };
        assert_eq!(err.user_message(), "The grand_total field is required.");
        assert!(err.is_server_rejected());
        assert!(!err.is_network());
    }

    #[test]
    fn test_empty_server_message_falls_back() {
        let err = ClientError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "Server error (500)");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_conflict_detection() {
        let err = ClientError::Conflict { message: None };
        assert!(err.is_conflict());
        assert!(!ClientError::NotFound { message: None }.is_conflict());
    }

    #[test]
    fn test_decode_is_not_network() {
        let err = ClientError::Decode("missing field `sale`".to_string());
        assert!(!err.is_network());
        assert_eq!(err.user_message(), "Invalid response: missing field `sale`");
    }
}
