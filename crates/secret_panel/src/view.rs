//! Toolkit-neutral description of what the panel shows for a snapshot.
//!
//! Nothing here ever carries a password. Copy buttons name a [`CopyField`] and
//! the value is looked up when the button is pressed.

use std::fmt;

use secret_list_core::ListState;
use shared::domain::{SecretId, SecretSummary};

use crate::errors::PanelError;

pub const PANEL_TITLE: &str = "My Secrets";
pub const SEARCH_PLACEHOLDER: &str = "Search by website or username...";
pub const LOADING_LABEL: &str = "Loading your secrets...";
pub const END_OF_LIST_LABEL: &str = "- End of list -";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: &'static str,
    pub refresh_enabled: bool,
    pub search_query: String,
    pub search_placeholder: &'static str,
    pub count_label: String,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Loading,
    Error(PanelError),
    Empty(EmptyView),
    List {
        cards: Vec<SecretCard>,
        footer: ListFooter,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyView {
    pub heading: &'static str,
    pub hint: &'static str,
}

impl EmptyView {
    fn for_query(filtering: bool) -> Self {
        if filtering {
            Self {
                heading: "No results found",
                hint: "Try a different search term",
            }
        } else {
            Self {
                heading: "No secrets found",
                hint: "You don't have any secrets yet, or none have been shared with you.",
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFooter {
    None,
    LoadingMore,
    EndOfList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    ApiKey,
    Login,
}

impl SecretKind {
    pub fn website_label(self) -> &'static str {
        match self {
            Self::ApiKey => "Service",
            Self::Login => "Website",
        }
    }

    pub fn username_label(self) -> &'static str {
        match self {
            Self::ApiKey => "Key Name",
            Self::Login => "Username",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    Shared,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("Owner"),
            Self::Shared => f.write_str("Shared"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyField {
    Password,
    Username,
}

impl CopyField {
    pub fn value_of(self, secret: &SecretSummary) -> &str {
        match self {
            Self::Password => &secret.password,
            Self::Username => &secret.username,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyAction {
    pub label: &'static str,
    pub field: CopyField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Tags(String),
    Notes(String),
    Expires(String),
    Created(String),
}

impl fmt::Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags(tags) => write!(f, "Tags: {tags}"),
            Self::Notes(notes) => write!(f, "Notes: {notes}"),
            Self::Expires(date) => write!(f, "Expires: {date}"),
            Self::Created(date) => write!(f, "Created: {date}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    /// Nothing to expand.
    Unavailable,
    Collapsed,
    Expanded(Vec<DetailLine>),
}

impl Details {
    pub fn toggle_label(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable => None,
            Self::Collapsed => Some("Show Details"),
            Self::Expanded(_) => Some("Hide Details"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretCard {
    pub id: SecretId,
    pub website: String,
    pub username: String,
    pub kind: SecretKind,
    pub ownership: Ownership,
    pub shared_by: Option<String>,
    pub copy_actions: Vec<CopyAction>,
    pub details: Details,
}

impl SecretCard {
    pub fn from_secret(secret: &SecretSummary, expanded: bool) -> Self {
        let kind = if secret.is_api_key() {
            SecretKind::ApiKey
        } else {
            SecretKind::Login
        };

        let copy_actions = match kind {
            SecretKind::ApiKey => vec![
                CopyAction {
                    label: "Copy API Key",
                    field: CopyField::Password,
                },
                CopyAction {
                    label: "Copy Name",
                    field: CopyField::Username,
                },
            ],
            SecretKind::Login => vec![CopyAction {
                label: "Copy Username",
                field: CopyField::Username,
            }],
        };

        let details = if !secret.has_metadata() {
            Details::Unavailable
        } else if expanded {
            Details::Expanded(detail_lines(secret))
        } else {
            Details::Collapsed
        };

        Self {
            id: secret.id.clone(),
            website: secret.website.clone(),
            username: secret.username.clone(),
            kind,
            ownership: if secret.is_owner {
                Ownership::Owner
            } else {
                Ownership::Shared
            },
            shared_by: secret.shared_by().map(str::to_string),
            copy_actions,
            details,
        }
    }
}

fn detail_lines(secret: &SecretSummary) -> Vec<DetailLine> {
    let mut lines = Vec::new();
    if !secret.tags.is_empty() {
        lines.push(DetailLine::Tags(secret.tags.join(", ")));
    }
    if let Some(notes) = &secret.notes {
        lines.push(DetailLine::Notes(notes.clone()));
    }
    if let Some(expiration_date) = &secret.expiration_date {
        lines.push(DetailLine::Expires(expiration_date.clone()));
    }
    lines.push(DetailLine::Created(secret.created_at.clone()));
    lines
}

fn count_label(state: &ListState) -> String {
    let count = state.visible_secrets.len();
    let plural = if count == 1 { "" } else { "s" };
    if state.is_filtering() {
        format!("{count} result{plural} for '{}'", state.search_query)
    } else {
        format!("{count} secret{plural}")
    }
}

impl PanelView {
    pub fn from_state(state: &ListState) -> Self {
        let body = if state.is_loading {
            PanelBody::Loading
        } else if let Some(message) = &state.error_message {
            PanelBody::Error(PanelError::from_message(message.clone()))
        } else if state.visible_secrets.is_empty() {
            PanelBody::Empty(EmptyView::for_query(state.is_filtering()))
        } else {
            let cards = state
                .visible_secrets
                .iter()
                .map(|secret| SecretCard::from_secret(secret, state.is_expanded(&secret.id)))
                .collect();
            let footer = if state.is_loading_more {
                ListFooter::LoadingMore
            } else if !state.has_more {
                ListFooter::EndOfList
            } else {
                ListFooter::None
            };
            PanelBody::List { cards, footer }
        };

        Self {
            title: PANEL_TITLE,
            refresh_enabled: !state.is_loading,
            search_query: state.search_query.clone(),
            search_placeholder: SEARCH_PLACEHOLDER,
            count_label: count_label(state),
            body,
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
