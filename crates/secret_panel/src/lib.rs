//! Host-facing glue for the secret list: registration, view model, and actions.

pub mod actions;
pub mod errors;
pub mod plugin;
pub mod view;

pub use actions::{dispatch, should_load_more, PanelAction};
pub use errors::{ErrorCategory, PanelError};
pub use plugin::{register, PanelContext, PanelInfo, PanelRegistry, SecretListPanel};
pub use view::{PanelBody, PanelView, SecretCard};
