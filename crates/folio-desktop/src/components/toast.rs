//! Toast for admin notices

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::notice_colors;

/// Shows the current notice; clicking it dismisses it early.
#[component]
pub fn Toast() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();

    let Some(notice) = state.panel.notices.current() else {
        return rsx! {};
    };
    let (background, color) = notice_colors(notice.kind);
    let notice_id = notice.id;

    rsx! {
        div {
            class: "toast",
            role: "status",
            style: "
                position: fixed;
                right: 24px;
                bottom: 24px;
                max-width: 360px;
                padding: 12px 16px;
                border-radius: 8px;
                background: {background};
                color: {color};
                box-shadow: 0 8px 24px rgba(0, 0, 0, 0.35);
                cursor: pointer;
                z-index: 60;
            ",
            onclick: move |_| {
                let mut state = state.clone();
                if state.panel.notices.dismiss(notice_id) {
                    state.touch();
                }
            },
            "{notice.text}"
        }
    }
}
