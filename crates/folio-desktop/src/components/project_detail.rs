//! Project detail overlay with an image carousel

use dioxus::prelude::*;
use folio_core::models::Carousel;

use crate::state::AppState;
use crate::theme::PALETTE;

#[component]
pub fn ProjectDetail() -> Element {
    let state = use_context::<AppState>();
    let mut selected_project = state.selected_project;
    let selected = selected_project();
    let images = selected
        .as_ref()
        .map(folio_core::Project::all_images)
        .unwrap_or_default();
    let mut carousel = use_signal(|| Carousel::new(images.len()));

    let Some(project) = selected else {
        return rsx! {};
    };
    let current = carousel().current();
    let current_image = current.and_then(|index| images.get(index).cloned());
    let created = project.created_at.format("%B %Y").to_string();

    rsx! {
        div {
            class: "detail-backdrop",
            style: "
                position: fixed;
                inset: 0;
                background: {PALETTE.overlay};
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 30;
            ",
            onclick: move |_| selected_project.set(None),

            div {
                style: "
                    width: min(860px, 92vw);
                    max-height: 88vh;
                    overflow-y: auto;
                    background: {PALETTE.bg_secondary};
                    border: 1px solid {PALETTE.border};
                    border-radius: 14px;
                ",
                onclick: move |evt| evt.stop_propagation(),

                if let Some(image) = current_image {
                    div { style: "position: relative; background: {PALETTE.bg_primary};",
                        img {
                            src: "{image}",
                            alt: "{project.title}",
                            style: "width: 100%; max-height: 460px; object-fit: contain; display: block;",
                        }
                        if images.len() > 1 {
                            button {
                                style: "position: absolute; left: 12px; top: 50%; {ARROW_STYLE}",
                                onclick: move |_| carousel.write().prev(),
                                "‹"
                            }
                            button {
                                style: "position: absolute; right: 12px; top: 50%; {ARROW_STYLE}",
                                onclick: move |_| carousel.write().next(),
                                "›"
                            }
                        }
                    }
                    if images.len() > 1 {
                        div { style: "display: flex; justify-content: center; gap: 6px; padding: 10px;",
                            for index in 0..images.len() {
                                {
                                    let color = if current == Some(index) { PALETTE.accent } else { PALETTE.border };
                                    rsx! {
                                        span {
                                            key: "{index}",
                                            style: "width: 8px; height: 8px; border-radius: 50%; background: {color}; cursor: pointer;",
                                            onclick: move |_| carousel.write().select(index),
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { style: "padding: 24px;",
                    div { style: "display: flex; justify-content: space-between; align-items: baseline;",
                        h2 { style: "margin: 0;", "{project.title}" }
                        span { style: "color: {PALETTE.text_muted}; font-size: 13px;", "{created}" }
                    }
                    p { style: "color: {PALETTE.text_secondary}; line-height: 1.6; white-space: pre-wrap;",
                        "{project.description}"
                    }
                    div { style: "margin-bottom: 16px;",
                        for tag in project.tags.iter() {
                            span {
                                key: "{tag}",
                                style: "display: inline-block; margin: 0 6px 6px 0; padding: 2px 8px; border-radius: 999px; background: {PALETTE.bg_tertiary}; font-size: 12px;",
                                "{tag}"
                            }
                        }
                    }
                    div { style: "display: flex; gap: 16px;",
                        if let Some(github) = project.github.as_ref() {
                            a { href: "{github}", target: "_blank", style: "color: {PALETTE.accent};", "GitHub" }
                        }
                        if let Some(live) = project.live.as_ref() {
                            a { href: "{live}", target: "_blank", style: "color: {PALETTE.accent};", "Live demo" }
                        }
                        button {
                            style: "margin-left: auto; padding: 6px 14px; border-radius: 6px; border: 1px solid {PALETTE.border}; background: transparent; color: {PALETTE.text_primary}; cursor: pointer;",
                            onclick: move |_| selected_project.set(None),
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

const ARROW_STYLE: &str = "
    transform: translateY(-50%);
    width: 36px;
    height: 36px;
    border-radius: 50%;
    border: none;
    background: rgba(0, 0, 0, 0.55);
    color: #fff;
    font-size: 20px;
    cursor: pointer;
";
