//! Bucketing of list error messages for the error view.

use shared::error::PROVIDER_UNAVAILABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    Transport,
    Unavailable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    category: ErrorCategory,
    message: String,
}

impl PanelError {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message == PROVIDER_UNAVAILABLE {
            ErrorCategory::Unavailable
        } else if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("session expired")
            || message_lower.contains("invalid token")
        {
            ErrorCategory::Auth
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("offline")
            || message_lower.contains("unreachable")
        {
            ErrorCategory::Transport
        } else {
            ErrorCategory::Unknown
        };

        Self { category, message }
    }

    /// The host should offer a sign-in instead of a plain retry.
    pub fn requires_reauth(&self) -> bool {
        self.category == ErrorCategory::Auth
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_failures() {
        assert_eq!(
            PanelError::from_message(PROVIDER_UNAVAILABLE).category(),
            ErrorCategory::Unavailable
        );
        assert_eq!(
            PanelError::from_message("network timeout").category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            PanelError::from_message("HTTP 401 Unauthorized").category(),
            ErrorCategory::Auth
        );
        assert_eq!(
            PanelError::from_message("Unknown error").category(),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn only_auth_failures_require_reauth() {
        assert!(PanelError::from_message("Session expired").requires_reauth());
        assert!(!PanelError::from_message("connection reset").requires_reauth());
    }
}
