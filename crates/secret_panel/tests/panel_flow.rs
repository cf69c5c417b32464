use std::sync::Arc;

use async_trait::async_trait;
use secret_list_core::{InMemorySecretProvider, ListSettings, SecretDataProvider};
use secret_panel::{
    plugin::{PanelFactory, PLUGIN, SECRET_LIST_PANEL},
    view::{CopyField, Details, ListFooter},
    ErrorCategory, PanelAction, PanelBody, PanelContext, PanelInfo, PanelRegistry,
};
use shared::{
    domain::{SecretId, SecretSummary},
    error::{ErrorCode, FetchError, PROVIDER_UNAVAILABLE},
    protocol::SecretPage,
};
use tokio::runtime::Handle;

#[derive(Default)]
struct RecordingRegistry {
    panels: Vec<(PanelInfo, PanelFactory)>,
}

impl PanelRegistry for RecordingRegistry {
    fn register_panel(&mut self, info: PanelInfo, factory: PanelFactory) {
        self.panels.push((info, factory));
    }
}

struct RejectingProvider;

#[async_trait]
impl SecretDataProvider for RejectingProvider {
    async fn fetch_secrets_page(
        &self,
        _limit: usize,
        _offset: usize,
    ) -> Result<SecretPage, FetchError> {
        Err(FetchError::failed(ErrorCode::Unauthorized, "401 Unauthorized"))
    }
}

fn fixture(count: usize) -> Vec<SecretSummary> {
    (0..count)
        .map(|n| SecretSummary {
            id: SecretId::new(format!("id-{n}")),
            website: format!("site-{n}.example"),
            username: format!("user{n}"),
            password: format!("password-{n}"),
            is_owner: n % 3 != 0,
            shared_by_email: (n % 3 == 0).then(|| format!("friend{n}@example.com")),
            tags: if n == 0 {
                vec!["api_key".to_string()]
            } else {
                Vec::new()
            },
            notes: None,
            expiration_date: None,
            created_at: "2024-07-01".into(),
        })
        .collect()
}

fn open(provider: Option<Arc<dyn SecretDataProvider>>) -> secret_panel::SecretListPanel {
    let mut registry = RecordingRegistry::default();
    secret_panel::register(&mut registry);
    assert_eq!(registry.panels.len(), 1);

    let (info, factory) = registry.panels.remove(0);
    assert_eq!(info, SECRET_LIST_PANEL);
    factory(PanelContext {
        provider,
        runtime: Handle::current(),
        settings: ListSettings::default(),
    })
}

#[test]
fn plugin_identifies_itself_to_the_host() {
    assert_eq!(PLUGIN.id, "ai.rever.boss.plugin.dynamic.usersecretlist");
    assert_eq!(PLUGIN.display_name, "My Secrets (Dynamic)");
    assert_eq!(PLUGIN.version, "1.0.0");
    assert_eq!(PLUGIN.author, "Risa Labs");
    assert_eq!(PLUGIN.description, "View your secrets and shared credentials");
}

#[tokio::test]
async fn scrolling_pages_through_all_secrets() {
    let panel = open(Some(Arc::new(InMemorySecretProvider::new(fixture(60)))));
    panel.controller().wait_until_idle().await;

    let view = panel.view();
    assert_eq!(view.title, "My Secrets");
    assert_eq!(view.count_label, "50 secrets");
    let PanelBody::List { cards, footer } = &view.body else {
        panic!("expected list body, got {:?}", view.body);
    };
    assert_eq!(cards.len(), 50);
    assert_eq!(*footer, ListFooter::None);

    panel.dispatch(PanelAction::Scrolled {
        last_visible_index: 20,
    });
    assert!(!panel.controller().state().is_loading_more);

    panel.dispatch(PanelAction::Scrolled {
        last_visible_index: 48,
    });
    let state = panel.controller().wait_until_idle().await;
    assert_eq!(state.all_secrets.len(), 60);
    assert_eq!(state.next_offset, 60);
    assert!(!state.has_more);

    let view = panel.view();
    assert_eq!(view.count_label, "60 secrets");
    assert!(matches!(
        view.body,
        PanelBody::List {
            footer: ListFooter::EndOfList,
            ..
        }
    ));
}

#[tokio::test]
async fn search_and_details_round_out_the_view() {
    let panel = open(Some(Arc::new(InMemorySecretProvider::new(fixture(12)))));
    panel.controller().wait_until_idle().await;

    panel.dispatch(PanelAction::Search("SITE-1".into()));
    let view = panel.view();
    assert_eq!(view.count_label, "3 results for 'SITE-1'");

    let first = SecretId::new("id-0");
    panel.dispatch(PanelAction::Search(String::new()));
    panel.dispatch(PanelAction::ToggleDetails(first.clone()));
    let PanelBody::List { cards, .. } = panel.view().body else {
        panic!("expected list body");
    };
    assert!(matches!(cards[0].details, Details::Expanded(_)));
    assert_eq!(cards[0].shared_by.as_deref(), Some("friend0@example.com"));

    assert_eq!(
        panel.copy_value(&first, CopyField::Password).as_deref(),
        Some("password-0")
    );
    assert_eq!(panel.copy_value(&SecretId::new("missing"), CopyField::Username), None);
}

#[tokio::test]
async fn rejected_fetch_asks_for_reauth_and_can_be_dismissed() {
    let panel = open(Some(Arc::new(RejectingProvider)));
    panel.controller().wait_until_idle().await;

    let PanelBody::Error(error) = panel.view().body else {
        panic!("expected error body");
    };
    assert_eq!(error.message(), "401 Unauthorized");
    assert!(error.requires_reauth());

    panel.dispatch(PanelAction::DismissError);
    assert!(matches!(panel.view().body, PanelBody::Empty(_)));
}

#[tokio::test]
async fn missing_provider_shows_unavailable_error_on_retry() {
    let panel = open(None);

    let PanelBody::Error(error) = panel.view().body else {
        panic!("expected error body");
    };
    assert_eq!(error.message(), PROVIDER_UNAVAILABLE);
    assert_eq!(error.category(), ErrorCategory::Unavailable);

    panel.dispatch(PanelAction::DismissError);
    panel.dispatch(PanelAction::Retry);
    assert!(matches!(panel.view().body, PanelBody::Error(_)));
}
