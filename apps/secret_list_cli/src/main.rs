use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use secret_list_core::{config::load_settings, InMemorySecretProvider, SecretDataProvider};
use secret_panel::{PanelAction, PanelContext, SecretListPanel};
use serde::Deserialize;
use shared::{
    domain::{SecretId, SecretSummary},
    error::ApiError,
};
use tokio::runtime::Handle;
use tracing::info;

mod render;

const BUNDLED_FIXTURE: &str = include_str!("../fixtures/secrets.json");

/// Render the "My Secrets" panel for a fixture of secrets.
#[derive(Parser, Debug)]
struct Args {
    /// JSON array of secrets to serve, or `{"error": {"code", "message"}}` to
    /// answer every page with that backend error. Defaults to the bundled sample.
    #[arg(long)]
    fixture: Option<PathBuf>,
    /// Run as if the host supplied no secret data provider.
    #[arg(long, conflicts_with = "fixture")]
    no_provider: bool,
    #[arg(long)]
    page_size: Option<usize>,
    /// Pagination requests to issue after the first page.
    #[arg(long, default_value_t = 0)]
    pages: usize,
    #[arg(long)]
    query: Option<String>,
    /// Secret ids whose details should be expanded.
    #[arg(long)]
    expand: Vec<String>,
    /// Simulated provider latency per page.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Fixture {
    Secrets(Vec<SecretSummary>),
    Failure { error: ApiError },
}

impl Fixture {
    fn into_provider(self) -> InMemorySecretProvider {
        match self {
            Self::Secrets(secrets) => {
                info!(count = secrets.len(), "serving secrets from fixture");
                InMemorySecretProvider::new(secrets)
            }
            Self::Failure { error } => {
                info!(code = ?error.code, "fixture answers every page with an error");
                InMemorySecretProvider::failing(error)
            }
        }
    }
}

fn load_fixture(path: Option<&Path>) -> Result<Fixture> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture '{}'", path.display()))?,
        None => BUNDLED_FIXTURE.to_string(),
    };
    parse_fixture(&raw)
}

fn parse_fixture(raw: &str) -> Result<Fixture> {
    serde_json::from_str(raw).context("fixture is neither a list of secrets nor an error")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(page_size) = args.page_size.filter(|size| *size > 0) {
        settings.page_size = page_size;
    }

    let provider = if args.no_provider {
        None
    } else {
        let provider = load_fixture(args.fixture.as_deref())?
            .into_provider()
            .with_latency(Duration::from_millis(args.latency_ms));
        Some(Arc::new(provider) as Arc<dyn SecretDataProvider>)
    };

    let panel = SecretListPanel::open(PanelContext {
        provider,
        runtime: Handle::current(),
        settings,
    });

    let mut state = panel.controller().wait_until_idle().await;
    for _ in 0..args.pages {
        if !state.has_more || state.error_message.is_some() {
            break;
        }
        panel.dispatch(PanelAction::LoadMore);
        state = panel.controller().wait_until_idle().await;
    }

    for id in args.expand {
        panel.dispatch(PanelAction::ToggleDetails(SecretId::new(id)));
    }
    if let Some(query) = args.query {
        panel.dispatch(PanelAction::Search(query));
    }

    print!("{}", render::render(&panel.view())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared::error::ErrorCode;

    #[test]
    fn bundled_fixture_is_a_secret_list() {
        let Fixture::Secrets(secrets) = parse_fixture(BUNDLED_FIXTURE).expect("bundled fixture")
        else {
            panic!("bundled fixture should list secrets");
        };
        assert_eq!(secrets.len(), 5);
    }

    #[test]
    fn error_fixture_becomes_backend_failure() {
        let fixture = parse_fixture(r#"{"error": {"code": "unauthorized", "message": "401 Unauthorized"}}"#)
            .expect("error fixture");
        let Fixture::Failure { error } = fixture else {
            panic!("expected failure fixture");
        };
        assert_eq!(error.code, ErrorCode::Unauthorized);
        assert_eq!(error.message.as_deref(), Some("401 Unauthorized"));
    }

    #[test]
    fn malformed_fixture_is_rejected() {
        assert!(parse_fixture(r#"{"secrets": 3}"#).is_err());
    }
}
