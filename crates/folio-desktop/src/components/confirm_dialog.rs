//! Delete confirmation dialog

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::PALETTE;

/// Asks before a project is deleted. Nothing is sent until "Delete" is pressed.
#[component]
pub fn ConfirmDeleteDialog() -> Element {
    let state = use_context::<AppState>();
    let mut pending_delete = state.pending_delete;
    let _ = state.track();

    let Some(pending) = pending_delete() else {
        return rsx! {};
    };
    let busy = state.panel.list.snapshot().busy;

    let confirm = {
        let pending = pending.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            let pending = pending.clone();
            pending_delete.set(None);
            spawn(async move {
                if let Err(error) = state.panel.list.confirm_delete(pending).await {
                    tracing::error!("Failed to delete project: {}", error);
                }
                state.after_action();
            });
        }
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            style: "
                position: fixed;
                inset: 0;
                background: {PALETTE.overlay};
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 50;
            ",
            div {
                role: "alertdialog",
                style: "
                    width: 380px;
                    padding: 24px;
                    border-radius: 12px;
                    background: {PALETTE.bg_secondary};
                    border: 1px solid {PALETTE.border};
                ",
                h3 { style: "margin: 0 0 8px 0;", "Delete project?" }
                p { style: "color: {PALETTE.text_secondary}; margin: 0 0 20px 0;",
                    "\"{pending.title}\" will be removed permanently."
                }
                div { style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        class: "btn",
                        style: "padding: 8px 14px; border-radius: 6px; border: 1px solid {PALETTE.border}; background: transparent; color: {PALETTE.text_primary}; cursor: pointer;",
                        onclick: move |_| pending_delete.set(None),
                        "Cancel"
                    }
                    button {
                        class: "btn",
                        disabled: busy,
                        style: "padding: 8px 14px; border-radius: 6px; border: none; background: {PALETTE.error}; color: {PALETTE.text_primary}; cursor: pointer;",
                        onclick: confirm,
                        "Delete"
                    }
                }
            }
        }
    }
}
