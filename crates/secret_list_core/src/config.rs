use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::state::DEFAULT_PAGE_SIZE;

pub const SETTINGS_FILE: &str = "secret_list.toml";
pub const PAGE_SIZE_ENV: &str = "SECRET_LIST_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub page_size: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Settings from `secret_list.toml` in the working directory, then the environment.
pub fn load_settings() -> ListSettings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> ListSettings {
    let page_size_override = std::env::var(PAGE_SIZE_ENV).ok();
    with_override(read_settings_file(path), page_size_override.as_deref())
}

/// Settings from `path` alone; a missing or malformed file yields defaults.
pub fn read_settings_file(path: &Path) -> ListSettings {
    match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring unreadable secret list settings");
            ListSettings::default()
        }),
        Err(_) => ListSettings::default(),
    }
}

pub fn parse_settings(raw: &str) -> anyhow::Result<ListSettings> {
    let settings: ListSettings =
        toml::from_str(raw).context("failed to parse secret list settings")?;
    Ok(sanitize(settings))
}

fn with_override(mut settings: ListSettings, page_size: Option<&str>) -> ListSettings {
    if let Some(raw) = page_size {
        apply_page_size_override(&mut settings, raw);
    }
    sanitize(settings)
}

fn apply_page_size_override(settings: &mut ListSettings, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(parsed) => settings.page_size = parsed,
        Err(_) => warn!(value = raw, "ignoring non-numeric {PAGE_SIZE_ENV}"),
    }
}

fn sanitize(mut settings: ListSettings) -> ListSettings {
    if settings.page_size == 0 {
        warn!("page_size must be positive; using {DEFAULT_PAGE_SIZE}");
        settings.page_size = DEFAULT_PAGE_SIZE;
    }
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
