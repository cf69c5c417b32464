//! Plain-text rendering of a panel view.

use std::fmt::{self, Write};

use secret_panel::view::{
    Details, ListFooter, PanelBody, PanelView, SecretCard, END_OF_LIST_LABEL, LOADING_LABEL,
};

pub fn render(view: &PanelView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_view(&mut out, view)?;
    Ok(out)
}

fn write_view(out: &mut impl Write, view: &PanelView) -> fmt::Result {
    writeln!(out, "== {} ==", view.title)?;
    if view.search_query.is_empty() {
        writeln!(out, "[{}]", view.search_placeholder)?;
    } else {
        writeln!(out, "[search: {}]", view.search_query)?;
    }
    writeln!(out, "{}", view.count_label)?;
    writeln!(out)?;

    match &view.body {
        PanelBody::Loading => writeln!(out, "{LOADING_LABEL}"),
        PanelBody::Error(error) => {
            writeln!(out, "Error: {}", error.message())?;
            if error.requires_reauth() {
                writeln!(out, "(sign in again, then Retry)")
            } else {
                writeln!(out, "[Retry] [Dismiss]")
            }
        }
        PanelBody::Empty(empty) => {
            writeln!(out, "{}", empty.heading)?;
            writeln!(out, "{}", empty.hint)
        }
        PanelBody::List { cards, footer } => {
            for card in cards {
                write_card(out, card)?;
            }
            match footer {
                ListFooter::LoadingMore => writeln!(out, "loading more..."),
                ListFooter::EndOfList => writeln!(out, "{END_OF_LIST_LABEL}"),
                ListFooter::None => Ok(()),
            }
        }
    }
}

fn write_card(out: &mut impl Write, card: &SecretCard) -> fmt::Result {
    writeln!(
        out,
        "* {} ({}) [{}]",
        card.website, card.username, card.ownership
    )?;
    if let Some(shared_by) = &card.shared_by {
        writeln!(out, "    Shared by: {shared_by}")?;
    }
    let actions = card
        .copy_actions
        .iter()
        .map(|action| format!("[{}]", action.label))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "    {actions}")?;
    if let Some(label) = card.details.toggle_label() {
        writeln!(out, "    {label}")?;
    }
    if let Details::Expanded(lines) = &card.details {
        for line in lines {
            writeln!(out, "      {line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use secret_list_core::ListState;
    use shared::domain::{SecretId, SecretSummary};

    #[test]
    fn renders_cards_without_passwords() {
        let secret = SecretSummary {
            id: SecretId::new("a"),
            website: "github.com".into(),
            username: "octocat".into(),
            password: "do-not-print".into(),
            is_owner: false,
            shared_by_email: Some("lead@example.com".into()),
            tags: vec!["api_key".into()],
            notes: None,
            expiration_date: None,
            created_at: "2024-01-01".into(),
        };
        let mut state = ListState {
            all_secrets: vec![secret.clone()],
            visible_secrets: vec![secret],
            has_more: false,
            ..ListState::default()
        };
        state.expanded_ids.insert(SecretId::new("a"));

        let text = render(&PanelView::from_state(&state)).expect("render view");
        assert!(text.contains("* github.com (octocat) [Shared]"));
        assert!(text.contains("Shared by: lead@example.com"));
        assert!(text.contains("[Copy API Key] [Copy Name]"));
        assert!(text.contains("Tags: api_key"));
        assert!(text.contains(END_OF_LIST_LABEL));
        assert!(!text.contains("do-not-print"));
    }
}
