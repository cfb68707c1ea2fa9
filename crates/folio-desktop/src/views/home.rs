//! Home view - the landing page

use std::collections::HashMap;

use dioxus::prelude::*;
use folio_core::site::{header_is_scrolled, SectionSpan, SectionTracker, NAV_SECTIONS};
use serde::Deserialize;

use super::content::{
    section_label, TimelineEntry, ABOUT, CONTACT_EMAIL, EDUCATION, EXPERIENCE, HEADLINE,
    OWNER_NAME, SKILLS,
};
use crate::components::{ProjectDetail, ProjectGrid, TerminalWidget};
use crate::state::AppState;
use crate::theme::PALETTE;

/// Scroll position and section geometry reported by the page
#[derive(Debug, Deserialize)]
struct ScrollReport {
    scroll_y: f64,
    /// Section id to `(top, height)`
    spans: HashMap<String, (f64, f64)>,
}

const REMOVE_SCROLL_LISTENER_JS: &str = "
    if (window.__folioScroll) {
        window.removeEventListener('scroll', window.__folioScroll);
        window.removeEventListener('resize', window.__folioScroll);
        window.__folioScroll = undefined;
    }
";

fn scroll_listener_js() -> String {
    let ids = serde_json::to_string(&NAV_SECTIONS).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{REMOVE_SCROLL_LISTENER_JS}
        const ids = {ids};
        const report = () => {{
            const spans = {{}};
            for (const id of ids) {{
                const el = document.getElementById(id);
                if (el) spans[id] = [el.offsetTop, el.offsetHeight];
            }}
            dioxus.send({{ scroll_y: window.scrollY, spans }});
        }};
        window.__folioScroll = report;
        window.addEventListener('scroll', report, {{ passive: true }});
        window.addEventListener('resize', report);
        report();"
    )
}

fn scroll_to(id: &str) {
    let _ = document::eval(&format!(
        "document.getElementById('{id}')?.scrollIntoView({{ behavior: 'smooth' }});"
    ));
}

/// Home view component - the landing page sections
#[component]
pub fn Home() -> Element {
    let state = use_context::<AppState>();
    let mut active_section = state.active_section;
    let mut header_scrolled = state.header_scrolled;

    use_future(move || async move {
        let mut listener = document::eval(&scroll_listener_js());
        let mut tracker = SectionTracker::default();
        while let Ok(report) = listener.recv::<ScrollReport>().await {
            header_scrolled.set(header_is_scrolled(report.scroll_y));
            let active = tracker.on_scroll(report.scroll_y, |id| {
                report
                    .spans
                    .get(id)
                    .map(|&(top, height)| SectionSpan::new(top, height))
            });
            if *active_section.peek() != active {
                active_section.set(active.to_string());
            }
        }
    });

    use_drop(|| {
        let _ = document::eval(REMOVE_SCROLL_LISTENER_JS);
    });

    let has_selection = (state.selected_project)().is_some();

    rsx! {
        Header {}

        main {
            Section { id: "home",
                div {
                    style: "min-height: 80vh; display: flex; flex-direction: column; justify-content: center;",
                    h1 { style: "font-size: 48px; margin: 0;", "{OWNER_NAME}" }
                    p { style: "font-size: 20px; color: {PALETTE.text_secondary};", "{HEADLINE}" }
                    div { style: "display: flex; gap: 12px; margin-top: 16px;",
                        PillButton { label: "See projects", target: "projects" }
                        PillButton { label: "Get in touch", target: "contact" }
                    }
                }
            }
            Section { id: "about", title: "About",
                p { style: "max-width: 720px; line-height: 1.6; color: {PALETTE.text_secondary};", "{ABOUT}" }
            }
            Section { id: "experience", title: "Experience",
                Timeline { entries: &EXPERIENCE }
            }
            Section { id: "education", title: "Education",
                Timeline { entries: &EDUCATION }
            }
            Section { id: "skills", title: "Skills",
                div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px;",
                    for (group, items) in SKILLS {
                        div {
                            key: "{group}",
                            style: "background: {PALETTE.bg_secondary}; border: 1px solid {PALETTE.border}; border-radius: 10px; padding: 16px;",
                            h3 { style: "margin: 0 0 8px 0;", "{group}" }
                            for item in items.iter() {
                                span {
                                    key: "{item}",
                                    style: "display: inline-block; margin: 0 6px 6px 0; padding: 2px 10px; border-radius: 999px; background: {PALETTE.bg_tertiary}; font-size: 13px;",
                                    "{item}"
                                }
                            }
                        }
                    }
                }
            }
            Section { id: "projects", title: "Projects",
                ProjectGrid {}
            }
            Section { id: "contact", title: "Contact",
                p { style: "color: {PALETTE.text_secondary};",
                    "Write to "
                    a { href: "mailto:{CONTACT_EMAIL}", style: "color: {PALETTE.accent};", "{CONTACT_EMAIL}" }
                    " or poke the terminal below."
                }
                TerminalWidget {}
            }
        }

        if has_selection {
            ProjectDetail {}
        }
    }
}

#[component]
fn Header() -> Element {
    let state = use_context::<AppState>();
    let active = (state.active_section)();
    let scrolled = (state.header_scrolled)();
    let background = if scrolled { PALETTE.bg_secondary } else { "transparent" };
    let border = if scrolled { PALETTE.border } else { "transparent" };

    rsx! {
        header {
            style: "
                position: fixed;
                top: 0;
                left: 0;
                right: 0;
                height: 64px;
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 0 40px;
                background: {background};
                border-bottom: 1px solid {border};
                transition: background 0.2s;
                z-index: 10;
            ",
            strong { "{OWNER_NAME}" }
            nav { style: "display: flex; gap: 20px;",
                for id in NAV_SECTIONS {
                    {
                        let color = if active == id { PALETTE.accent } else { PALETTE.text_secondary };
                        let label = section_label(id);
                        rsx! {
                            a {
                                key: "{id}",
                                class: "nav-link",
                                style: "cursor: pointer; color: {color};",
                                onclick: move |_| scroll_to(id),
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Section(id: &'static str, title: Option<&'static str>, children: Element) -> Element {
    rsx! {
        section {
            id: "{id}",
            style: "padding: 96px 40px 48px 40px; max-width: 1100px; margin: 0 auto;",
            if let Some(title) = title {
                h2 { style: "font-size: 28px; margin: 0 0 24px 0;", "{title}" }
            }
            {children}
        }
    }
}

#[component]
fn PillButton(label: &'static str, target: &'static str) -> Element {
    rsx! {
        button {
            style: "
                padding: 10px 20px;
                border-radius: 999px;
                border: 1px solid {PALETTE.accent};
                background: transparent;
                color: {PALETTE.text_primary};
                cursor: pointer;
            ",
            onclick: move |_| scroll_to(target),
            "{label}"
        }
    }
}

#[component]
fn Timeline(entries: &'static [TimelineEntry]) -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px;",
            for entry in entries {
                div {
                    key: "{entry.title}",
                    style: "border-left: 2px solid {PALETTE.accent}; padding-left: 16px;",
                    div { style: "font-weight: 600;", "{entry.title}" }
                    div { style: "color: {PALETTE.text_secondary}; font-size: 13px;",
                        "{entry.place} · {entry.period}"
                    }
                    p { style: "margin: 6px 0 0 0; color: {PALETTE.text_secondary};", "{entry.summary}" }
                }
            }
        }
    }
}
