//! Admin sign-in form

use dioxus::prelude::*;

use super::{INPUT_STYLE, PRIMARY_BUTTON};
use crate::services::{BackendMode, PREVIEW_ADMIN_EMAIL, PREVIEW_ADMIN_PASSWORD};
use crate::state::AppState;
use crate::theme::PALETTE;

#[component]
pub(super) fn LoginForm(error: Option<String>) -> Element {
    let state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut working = use_signal(|| false);
    let preview = state.mode == BackendMode::Preview;

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if working() {
            return;
        }
        working.set(true);
        let mut state = state.clone();
        let (address, secret) = (email(), password());
        spawn(async move {
            match state.panel.sign_in(address.trim(), &secret).await {
                Ok(_) => {
                    password.set(String::new());
                    // A failed load shows up as the list error
                    let _ = state.panel.list.refresh().await;
                }
                Err(error) => tracing::warn!("Sign in failed: {}", error),
            }
            working.set(false);
            state.after_action();
        });
    };

    rsx! {
        form {
            onsubmit: submit,
            style: "
                margin-top: 12vh;
                width: 360px;
                display: flex;
                flex-direction: column;
                gap: 12px;
                padding: 28px;
                border-radius: 14px;
                background: {PALETTE.bg_secondary};
                border: 1px solid {PALETTE.border};
            ",
            h2 { style: "margin: 0 0 4px 0;", "Admin sign in" }

            input {
                r#type: "email",
                placeholder: "Email",
                required: true,
                value: "{email}",
                disabled: working(),
                style: INPUT_STYLE,
                oninput: move |evt| email.set(evt.value()),
            }
            input {
                r#type: "password",
                placeholder: "Password",
                required: true,
                value: "{password}",
                disabled: working(),
                style: INPUT_STYLE,
                oninput: move |evt| password.set(evt.value()),
            }

            if let Some(error) = error {
                div { style: "color: {PALETTE.error}; font-size: 13px;", "{error}" }
            }

            button {
                r#type: "submit",
                class: "btn",
                disabled: working(),
                style: PRIMARY_BUTTON,
                if working() { "Signing in..." } else { "Sign in" }
            }

            if preview {
                div { style: "color: {PALETTE.text_muted}; font-size: 12px;",
                    "Offline preview. Sign in with {PREVIEW_ADMIN_EMAIL} / {PREVIEW_ADMIN_PASSWORD}."
                }
            }
        }
    }
}
