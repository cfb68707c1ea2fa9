//! Main application component

use std::sync::atomic::Ordering;
use std::time::Duration;

use dioxus::prelude::*;
use folio_core::site::{is_admin_chord, Modifiers as ChordModifiers};

use crate::components::AdminOverlay;
use crate::services::connect;
use crate::state::AppState;
use crate::theme::{BASE_CSS, PALETTE};
use crate::views::Home;
use crate::ADMIN_HOTKEY_TRIGGERED;

/// Root application component
#[component]
pub fn App() -> Element {
    let state = use_context_provider(|| {
        let (gateway, mode) = connect();
        AppState::new(gateway, mode)
    });

    // Load the landing page projects once
    use_hook({
        let state = state.clone();
        move || state.refresh_showcase()
    });

    // Mirror the session guard into a signal
    use_future({
        let state = state.clone();
        move || {
            let mut state = state.clone();
            async move {
                let mut receiver = state.panel.guard.watch();
                loop {
                    let current = receiver.borrow_and_update().clone();
                    state.guard_state.set(current);
                    state.touch();
                    if receiver.changed().await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Poll for the global hotkey
    use_future({
        let state = state.clone();
        move || {
            let mut state = state.clone();
            async move {
                loop {
                    if ADMIN_HOTKEY_TRIGGERED.swap(false, Ordering::SeqCst) {
                        state.open_admin();
                    }
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
            }
        }
    });

    let handle_keydown = {
        let mut state = state.clone();
        move |evt: Event<KeyboardData>| {
            let pressed = evt.modifiers();
            let modifiers = ChordModifiers {
                ctrl: pressed.ctrl(),
                meta: pressed.meta(),
                shift: pressed.shift(),
                alt: pressed.alt(),
            };
            if is_admin_chord(&evt.key().to_string(), modifiers) {
                evt.prevent_default();
                state.open_admin();
            }
        }
    };

    let admin_open = (state.admin_open)();

    rsx! {
        style { {BASE_CSS} }

        div {
            class: "app-container",
            tabindex: "0",
            onkeydown: handle_keydown,
            style: "
                min-height: 100vh;
                font-family: 'Inter', system-ui, -apple-system, sans-serif;
                font-size: 15px;
                background: {PALETTE.bg_primary};
                color: {PALETTE.text_primary};
                outline: none;
            ",
            Home {}

            if admin_open {
                AdminOverlay {}
            }
        }
    }
}
