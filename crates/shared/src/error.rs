use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when a failure carries no description of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Shown when the host did not supply a secret data provider.
pub const PROVIDER_UNAVAILABLE: &str = "Secret data provider not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Network,
    RateLimited,
    Internal,
}

/// Wire form of a backend failure, as a provider may receive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }
}

/// Failure of a single page fetch.
///
/// `Cancelled` means the fetch was superseded and is never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fetch cancelled")]
    Cancelled,
    #[error("{}", .description.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Failed {
        code: ErrorCode,
        description: Option<String>,
    },
}

impl FetchError {
    pub fn failed(code: ErrorCode, description: impl Into<String>) -> Self {
        Self::Failed {
            code,
            description: Some(description.into()),
        }
    }

    pub fn undescribed(code: ErrorCode) -> Self {
        Self::Failed {
            code,
            description: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Cancelled => None,
            Self::Failed { code, .. } => Some(*code),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(value: ApiError) -> Self {
        Self::Failed {
            code: value.code,
            description: value.message.filter(|message| !message.trim().is_empty()),
        }
    }
}
