//! Admin overlay
//!
//! Gated by the session guard: a login form until an admin is signed in,
//! then the project dashboard.

mod login;
mod project_form;
mod project_rows;

use dioxus::prelude::*;
use folio_core::admin::GuardState;

use super::{ConfirmDeleteDialog, Toast};
use crate::state::AppState;
use crate::theme::PALETTE;
use login::LoginForm;
use project_form::ProjectFormView;
use project_rows::ProjectRows;

#[component]
pub fn AdminOverlay() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let guard_state = (state.guard_state)();

    let handle_keydown = {
        let mut state = state.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Escape {
                evt.stop_propagation();
                state.close_admin();
            }
        }
    };

    rsx! {
        div {
            class: "admin-backdrop",
            tabindex: "-1",
            onkeydown: handle_keydown,
            style: "
                position: fixed;
                inset: 0;
                background: {PALETTE.overlay};
                display: flex;
                justify-content: center;
                align-items: flex-start;
                padding: 48px 16px;
                overflow-y: auto;
                z-index: 40;
            ",

            {
                match guard_state {
                    GuardState::Loading => rsx! {
                        div { style: "margin-top: 20vh; color: {PALETTE.text_secondary};", "Checking session..." }
                    },
                    GuardState::Unauthenticated { error } => rsx! {
                        LoginForm { error }
                    },
                    GuardState::Authenticated(session) => rsx! {
                        Dashboard { identity: session.identity().to_string() }
                    },
                }
            }
        }

        Toast {}
        ConfirmDeleteDialog {}
    }
}

#[component]
fn Dashboard(identity: String) -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let form_open = state.panel.form.mode().is_open();

    let sign_out = {
        let state = state.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            spawn(async move {
                if let Err(error) = state.panel.sign_out().await {
                    tracing::warn!("Sign out failed: {}", error);
                }
                state.after_action();
            });
        }
    };

    let add_project = {
        let mut state = state.clone();
        move |_: MouseEvent| {
            state.panel.form.open_create();
            state.touch();
        }
    };

    let close = {
        let mut state = state.clone();
        move |_: MouseEvent| state.close_admin()
    };

    rsx! {
        div {
            style: "
                width: min(960px, 100%);
                background: {PALETTE.bg_secondary};
                border: 1px solid {PALETTE.border};
                border-radius: 14px;
                padding: 24px;
            ",
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 20px;",
                div { style: "flex: 1;",
                    h2 { style: "margin: 0;", "Projects" }
                    div { style: "color: {PALETTE.text_muted}; font-size: 13px;", "Signed in as {identity}" }
                }
                if !form_open {
                    button { class: "btn", style: PRIMARY_BUTTON, onclick: add_project, "Add project" }
                }
                button { class: "btn", style: SECONDARY_BUTTON, onclick: sign_out, "Sign out" }
                button { class: "btn", style: SECONDARY_BUTTON, onclick: close, "Close" }
            }

            if form_open {
                ProjectFormView {}
            } else {
                ProjectRows {}
            }
        }
    }
}

const PRIMARY_BUTTON: &str = "
    padding: 8px 14px;
    border-radius: 6px;
    border: none;
    background: #4f8cff;
    color: #0b0f17;
    font-weight: 600;
    cursor: pointer;
";

const SECONDARY_BUTTON: &str = "
    padding: 8px 14px;
    border-radius: 6px;
    border: 1px solid #26304a;
    background: transparent;
    color: #e6e9ef;
    cursor: pointer;
";

const INPUT_STYLE: &str = "
    width: 100%;
    padding: 8px 10px;
    border-radius: 6px;
    border: 1px solid #26304a;
    background: #0b0f17;
    color: #e6e9ef;
    font: inherit;
";
