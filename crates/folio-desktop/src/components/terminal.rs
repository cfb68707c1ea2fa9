//! Command widget in the contact section

use dioxus::prelude::*;
use folio_core::site::{open_admin_when_due, EntryKind, Terminal, TerminalOutcome};

use crate::state::AppState;
use crate::theme::PALETTE;

const fn entry_color(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Success => PALETTE.success,
        EntryKind::Info => PALETTE.text_secondary,
        EntryKind::Error => PALETTE.error,
    }
}

#[component]
pub fn TerminalWidget() -> Element {
    let state = use_context::<AppState>();
    let mut terminal = use_signal(Terminal::default);
    let mut input = use_signal(String::new);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() != Key::Enter {
            return;
        }
        let line = input();
        input.set(String::new());

        let outcome = terminal.write().submit(&line);
        if matches!(outcome, TerminalOutcome::OpenAdmin { .. }) {
            let mut state = state.clone();
            spawn(async move {
                open_admin_when_due(outcome, move || state.open_admin()).await;
            });
        }
    };

    let history = terminal.read().history().to_vec();

    rsx! {
        div {
            class: "terminal",
            style: "
                margin-top: 20px;
                border-radius: 10px;
                border: 1px solid {PALETTE.border};
                background: {PALETTE.bg_secondary};
                font-family: 'JetBrains Mono', ui-monospace, monospace;
                font-size: 13px;
                overflow: hidden;
            ",
            div {
                style: "padding: 8px 12px; border-bottom: 1px solid {PALETTE.border}; color: {PALETTE.text_muted};",
                "visitor@folio: ~"
            }
            div { style: "padding: 12px; min-height: 140px; max-height: 260px; overflow-y: auto;",
                div { style: "color: {PALETTE.text_muted}; margin-bottom: 8px;",
                    "Type 'help' to see what this thing can do."
                }
                for (index, entry) in history.iter().enumerate() {
                    {
                        let color = entry_color(entry.kind);
                        rsx! {
                            div { key: "{index}", style: "margin-bottom: 6px;",
                                div { style: "color: {PALETTE.text_primary};", "$ {entry.command}" }
                                div { style: "color: {color};", "{entry.response}" }
                            }
                        }
                    }
                }
                div { style: "display: flex; gap: 8px; color: {PALETTE.accent};",
                    span { "$" }
                    input {
                        class: "terminal-input",
                        r#type: "text",
                        spellcheck: "false",
                        autocomplete: "off",
                        value: "{input}",
                        style: "flex: 1; background: transparent; border: none; color: {PALETTE.text_primary}; font: inherit;",
                        oninput: move |evt| input.set(evt.value()),
                        onkeydown: handle_keydown,
                    }
                }
            }
        }
    }
}
