//! User actions from the rendered panel, routed to the list controller.

use secret_list_core::{ListState, SecretListController};
use shared::domain::SecretId;

/// Pagination starts when the last visible row is this close to the end.
pub const LOAD_MORE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Refresh,
    Retry,
    DismissError,
    Search(String),
    ToggleDetails(SecretId),
    LoadMore,
    Scrolled { last_visible_index: usize },
}

impl PanelAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Retry => "retry",
            Self::DismissError => "dismiss_error",
            Self::Search(_) => "search",
            Self::ToggleDetails(_) => "toggle_details",
            Self::LoadMore => "load_more",
            Self::Scrolled { .. } => "scrolled",
        }
    }
}

pub fn should_load_more(state: &ListState, last_visible_index: usize) -> bool {
    state.has_more
        && !state.is_loading_more
        && last_visible_index + LOAD_MORE_THRESHOLD >= state.visible_secrets.len()
}

pub fn dispatch(controller: &SecretListController, action: PanelAction) {
    tracing::debug!(action = action.name(), "secret panel action");

    match action {
        PanelAction::Refresh | PanelAction::Retry => controller.load_secrets(),
        PanelAction::DismissError => controller.clear_error(),
        PanelAction::Search(query) => controller.search_secrets(&query),
        PanelAction::ToggleDetails(id) => controller.toggle_metadata_expanded(&id),
        PanelAction::LoadMore => controller.load_more_secrets(),
        PanelAction::Scrolled { last_visible_index } => {
            if should_load_more(&controller.state(), last_visible_index) {
                controller.load_more_secrets();
            }
        }
    }
}
