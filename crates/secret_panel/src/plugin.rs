//! Registration of the secret list panel with the host console.

use std::sync::Arc;

use secret_list_core::{ListSettings, SecretDataProvider, SecretListController};
use shared::domain::SecretId;
use tokio::runtime::Handle;
use tracing::info;

use crate::{
    actions::{dispatch, PanelAction},
    view::{CopyField, PanelView},
};

/// Identity the plugin reports to the host when it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub url: &'static str,
}

pub const PLUGIN: PluginDescriptor = PluginDescriptor {
    id: "ai.rever.boss.plugin.dynamic.usersecretlist",
    display_name: "My Secrets (Dynamic)",
    version: "1.0.0",
    description: "View your secrets and shared credentials",
    author: "Risa Labs",
    url: "https://github.com/risa-labs-inc/boss-plugin-user-secret-list",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Top,
    Bottom,
}

/// Where the host docks the panel: sidebar, area within it, end of its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub side: Side,
    pub area: Half,
    pub anchor: Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInfo {
    pub id: &'static str,
    pub order: u32,
    pub display_name: &'static str,
    pub default_slot: SlotPosition,
}

pub const SECRET_LIST_PANEL: PanelInfo = PanelInfo {
    id: "user-secret-list",
    order: 25,
    display_name: "My Secrets",
    default_slot: SlotPosition {
        side: Side::Right,
        area: Half::Top,
        anchor: Half::Bottom,
    },
};

/// Everything the host hands a panel when it is opened.
pub struct PanelContext {
    pub provider: Option<Arc<dyn SecretDataProvider>>,
    pub runtime: Handle,
    pub settings: ListSettings,
}

pub type PanelFactory = Box<dyn Fn(PanelContext) -> SecretListPanel + Send + Sync>;

pub trait PanelRegistry {
    fn register_panel(&mut self, info: PanelInfo, factory: PanelFactory);
}

pub fn register(registry: &mut dyn PanelRegistry) {
    info!(
        plugin = PLUGIN.id,
        version = PLUGIN.version,
        author = PLUGIN.author,
        panel = SECRET_LIST_PANEL.id,
        "registering secret list panel"
    );
    registry.register_panel(SECRET_LIST_PANEL, Box::new(SecretListPanel::open));
}

/// One open instance of the panel. Dropping it cancels outstanding fetches.
pub struct SecretListPanel {
    info: PanelInfo,
    controller: SecretListController,
}

impl SecretListPanel {
    pub fn open(ctx: PanelContext) -> Self {
        Self {
            info: SECRET_LIST_PANEL,
            controller: SecretListController::new(ctx.provider, ctx.runtime, &ctx.settings),
        }
    }

    pub fn info(&self) -> PanelInfo {
        self.info
    }

    pub fn controller(&self) -> &SecretListController {
        &self.controller
    }

    pub fn view(&self) -> PanelView {
        PanelView::from_state(&self.controller.state())
    }

    pub fn dispatch(&self, action: PanelAction) {
        dispatch(&self.controller, action);
    }

    /// Clipboard value for a loaded secret, resolved only when asked for.
    pub fn copy_value(&self, id: &SecretId, field: CopyField) -> Option<String> {
        self.controller
            .state()
            .all_secrets
            .iter()
            .find(|secret| &secret.id == id)
            .map(|secret| field.value_of(secret).to_string())
    }
}
