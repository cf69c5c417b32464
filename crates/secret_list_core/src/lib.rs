use std::time::Duration;

use async_trait::async_trait;
use shared::{
    domain::SecretSummary,
    error::{ApiError, FetchError},
    protocol::SecretPage,
};

pub mod config;
mod controller;
mod state;

pub use config::ListSettings;
pub use controller::SecretListController;
pub use state::{filter_secrets, is_blank, ListState, StateStore, StateStream, DEFAULT_PAGE_SIZE};

/// Paginated access to the current user's secrets, supplied by the host.
#[async_trait]
pub trait SecretDataProvider: Send + Sync {
    async fn fetch_secrets_page(&self, limit: usize, offset: usize)
        -> Result<SecretPage, FetchError>;
}

/// Serves a fixed list of secrets in offset pages, or replays a backend error.
pub struct InMemorySecretProvider {
    secrets: Vec<SecretSummary>,
    failure: Option<ApiError>,
    latency: Duration,
}

impl InMemorySecretProvider {
    pub fn new(secrets: Vec<SecretSummary>) -> Self {
        Self {
            secrets,
            failure: None,
            latency: Duration::ZERO,
        }
    }

    /// Answer every page request with `error`.
    pub fn failing(error: ApiError) -> Self {
        Self {
            secrets: Vec::new(),
            failure: Some(error),
            latency: Duration::ZERO,
        }
    }

    /// Delay every page by `latency` to mimic a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SecretDataProvider for InMemorySecretProvider {
    async fn fetch_secrets_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<SecretPage, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone().into());
        }

        let total = self.secrets.len();
        let start = offset.min(total);
        let end = offset.saturating_add(limit).min(total);
        Ok(SecretPage::new(self.secrets[start..end].to_vec(), end < total))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
