//! Project table in the admin dashboard

use dioxus::prelude::*;
use folio_core::Project;

use super::SECONDARY_BUTTON;
use crate::state::AppState;
use crate::theme::PALETTE;

#[component]
pub(super) fn ProjectRows() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let snapshot = state.panel.list.snapshot();

    let retry = {
        let state = state.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            spawn(async move {
                let _ = state.panel.list.refresh().await;
                state.touch();
            });
        }
    };

    rsx! {
        if let Some(error) = snapshot.error {
            div { style: "display: flex; align-items: center; gap: 12px; color: {PALETTE.error}; margin-bottom: 12px;",
                span { "{error}" }
                button { class: "btn", style: SECONDARY_BUTTON, onclick: retry, "Retry" }
            }
        }

        if snapshot.loading && snapshot.projects.is_empty() {
            div { style: "color: {PALETTE.text_muted};", "Loading projects..." }
        } else if snapshot.projects.is_empty() {
            div { style: "color: {PALETTE.text_muted};", "No projects yet. Add the first one." }
        } else {
            div { style: "display: flex; flex-direction: column;",
                for project in snapshot.projects {
                    ProjectRow { key: "{project.id}", project, busy: snapshot.busy }
                }
            }
        }
    }
}

#[component]
fn ProjectRow(project: Project, busy: bool) -> Element {
    let state = use_context::<AppState>();
    let created = project.created_at.format("%Y-%m-%d").to_string();
    let feature_label = if project.featured { "Unfeature" } else { "Feature" };
    let tags = project.tags.join(", ");

    let edit = {
        let mut state = state.clone();
        let project = project.clone();
        move |_: MouseEvent| {
            state.panel.form.open_edit(project.clone());
            state.touch();
        }
    };

    let toggle_featured = {
        let state = state.clone();
        let project = project.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            let project = project.clone();
            spawn(async move {
                match state.panel.list.toggle_featured(&project).await {
                    Ok(updated) => tracing::info!(
                        "Project {} featured: {}",
                        updated.id,
                        updated.featured
                    ),
                    Err(error) => tracing::warn!("Featured toggle failed: {}", error),
                }
                state.after_action();
            });
        }
    };

    let request_delete = {
        let mut pending_delete = state.pending_delete;
        let list = state.panel.list.clone();
        let project = project.clone();
        move |_: MouseEvent| pending_delete.set(Some(list.request_delete(&project)))
    };

    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 12px 0;
                border-bottom: 1px solid {PALETTE.border};
            ",
            span { style: "width: 16px; color: {PALETTE.accent};",
                if project.featured { "★" }
            }
            div { style: "flex: 1; min-width: 0;",
                div { style: "font-weight: 600;", "{project.title}" }
                div { style: "color: {PALETTE.text_muted}; font-size: 12px;",
                    "{created}"
                    if !tags.is_empty() {
                        " · {tags}"
                    }
                }
            }
            button { class: "btn", style: SECONDARY_BUTTON, onclick: edit, "Edit" }
            button { class: "btn", style: SECONDARY_BUTTON, disabled: busy, onclick: toggle_featured, "{feature_label}" }
            button {
                class: "btn",
                style: "{SECONDARY_BUTTON} color: {PALETTE.error};",
                disabled: busy,
                onclick: request_delete,
                "Delete"
            }
        }
    }
}
