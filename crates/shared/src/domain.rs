use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag that marks a secret as an API key rather than a website login.
pub const API_KEY_TAG: &str = "api_key";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(SecretId);

/// A secret the current user owns or has had shared with them.
///
/// Timestamps are carried as the provider formatted them and are only ever
/// displayed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSummary {
    pub id: SecretId,
    pub website: String,
    pub username: String,
    pub password: String,
    pub is_owner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_by_email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub created_at: String,
}

impl SecretSummary {
    pub fn is_api_key(&self) -> bool {
        self.tags.iter().any(|tag| tag == API_KEY_TAG)
    }

    /// Sharer email, only when the secret is not owned by the current user.
    pub fn shared_by(&self) -> Option<&str> {
        if self.is_owner {
            None
        } else {
            self.shared_by_email.as_deref()
        }
    }

    /// Whether there is anything to show in the expandable details section.
    pub fn has_metadata(&self) -> bool {
        !self.tags.is_empty() || self.notes.is_some() || self.expiration_date.is_some()
    }
}

impl fmt::Debug for SecretSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSummary")
            .field("id", &self.id)
            .field("website", &self.website)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("is_owner", &self.is_owner)
            .field("shared_by_email", &self.shared_by_email)
            .field("tags", &self.tags)
            .field("notes", &self.notes)
            .field("expiration_date", &self.expiration_date)
            .field("created_at", &self.created_at)
            .finish()
    }
}
