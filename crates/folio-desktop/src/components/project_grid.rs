//! Project cards on the landing page

use dioxus::prelude::*;
use folio_core::Project;

use crate::state::AppState;
use crate::theme::PALETTE;

/// Grid of every project, featured ones first.
#[component]
pub fn ProjectGrid() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let snapshot = state.showcase.snapshot();

    if snapshot.loading && snapshot.projects.is_empty() {
        return rsx! {
            p { style: "color: {PALETTE.text_muted};", "Loading projects..." }
        };
    }

    if let Some(error) = snapshot.error {
        return rsx! {
            p { style: "color: {PALETTE.error};", "{error}" }
        };
    }

    if snapshot.projects.is_empty() {
        return rsx! {
            p { style: "color: {PALETTE.text_muted};", "No projects yet." }
        };
    }

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px;",
            for project in snapshot.projects {
                ProjectCard { key: "{project.id}", project }
            }
        }
    }
}

#[component]
fn ProjectCard(project: Project) -> Element {
    let state = use_context::<AppState>();
    let mut selected_project = state.selected_project;
    let cover = project.all_images().into_iter().next();
    let border = if project.featured {
        PALETTE.accent
    } else {
        PALETTE.border
    };

    rsx! {
        div {
            class: "project-card",
            style: "
                background: {PALETTE.bg_secondary};
                border: 1px solid {border};
                border-radius: 12px;
                overflow: hidden;
                cursor: pointer;
            ",
            onclick: {
                let project = project.clone();
                move |_| selected_project.set(Some(project.clone()))
            },

            if let Some(cover) = cover {
                img {
                    src: "{cover}",
                    alt: "{project.title}",
                    style: "width: 100%; height: 180px; object-fit: cover; display: block;",
                }
            }

            div { style: "padding: 16px;",
                div { style: "display: flex; align-items: center; gap: 8px;",
                    h3 { style: "margin: 0; font-size: 18px;", "{project.title}" }
                    if project.featured {
                        span { style: "font-size: 12px; color: {PALETTE.accent};", "★ Featured" }
                    }
                }
                p {
                    style: "
                        color: {PALETTE.text_secondary};
                        margin: 8px 0 12px 0;
                        display: -webkit-box;
                        -webkit-line-clamp: 3;
                        -webkit-box-orient: vertical;
                        overflow: hidden;
                    ",
                    "{project.description}"
                }
                div {
                    for tag in project.tags.iter() {
                        span {
                            key: "{tag}",
                            style: "display: inline-block; margin: 0 6px 6px 0; padding: 2px 8px; border-radius: 999px; background: {PALETTE.bg_tertiary}; font-size: 12px;",
                            "{tag}"
                        }
                    }
                }
            }
        }
    }
}
