//! Create and edit form for a project

use dioxus::prelude::*;
use folio_core::admin::{Draft, FormMode, ImageInputMode};

use super::{INPUT_STYLE, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::components::image_picker::{pick_image, pick_images};
use crate::state::AppState;
use crate::theme::PALETTE;

/// Input handler writing the typed value into the form's draft.
fn draft_input(state: &AppState, apply: fn(&mut Draft, String)) -> impl FnMut(FormEvent) + 'static {
    let mut state = state.clone();
    move |evt: FormEvent| {
        let value = evt.value();
        state.panel.form.edit_draft(|draft| apply(draft, value));
        state.touch();
    }
}

#[component]
pub(super) fn ProjectFormView() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let snapshot = state.panel.form.snapshot();
    let draft = snapshot.draft.clone();
    let heading = match snapshot.mode {
        FormMode::Editing(_) => "Edit project",
        FormMode::Creating | FormMode::Closed => "New project",
    };
    let uploading = snapshot.uploading_image || snapshot.uploading_gallery;

    let save = {
        let state = state.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let mut state = state.clone();
            spawn(async move {
                state.touch();
                match state.panel.form.save().await {
                    Ok(project) => tracing::info!("Saved project {}", project.id),
                    Err(error) => tracing::warn!("Save failed: {}", error),
                }
                state.after_action();
            });
        }
    };

    let cancel = {
        let mut state = state.clone();
        move |_: MouseEvent| {
            state.panel.form.cancel();
            state.touch();
        }
    };

    let toggle_featured = {
        let mut state = state.clone();
        move |_: FormEvent| {
            state
                .panel
                .form
                .edit_draft(|draft| draft.featured = !draft.featured);
            state.touch();
        }
    };

    rsx! {
        form {
            onsubmit: save,
            style: "display: flex; flex-direction: column; gap: 14px;",
            h3 { style: "margin: 0;", "{heading}" }

            Field { label: "Title",
                input {
                    r#type: "text",
                    required: true,
                    value: "{draft.title}",
                    style: INPUT_STYLE,
                    oninput: draft_input(&state, |draft, value| draft.title = value),
                }
            }
            Field { label: "Description",
                textarea {
                    rows: "5",
                    value: "{draft.description}",
                    style: INPUT_STYLE,
                    oninput: draft_input(&state, |draft, value| draft.description = value),
                }
            }

            ImageField {}
            GalleryField {}

            Field { label: "Tags (comma separated)",
                input {
                    r#type: "text",
                    placeholder: "Rust, Dioxus, Supabase",
                    value: "{draft.tags}",
                    style: INPUT_STYLE,
                    oninput: draft_input(&state, |draft, value| draft.tags = value),
                }
            }
            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                Field { label: "GitHub URL",
                    input {
                        r#type: "url",
                        value: "{draft.github}",
                        style: INPUT_STYLE,
                        oninput: draft_input(&state, |draft, value| draft.github = value),
                    }
                }
                Field { label: "Live URL",
                    input {
                        r#type: "url",
                        value: "{draft.live}",
                        style: INPUT_STYLE,
                        oninput: draft_input(&state, |draft, value| draft.live = value),
                    }
                }
            }
            label { style: "display: flex; align-items: center; gap: 8px;",
                input {
                    r#type: "checkbox",
                    checked: draft.featured,
                    onchange: toggle_featured,
                }
                "Featured"
            }

            if let Some(error) = snapshot.last_error {
                div { style: "color: {PALETTE.error}; font-size: 13px;", "{error}" }
            }

            div { style: "display: flex; justify-content: flex-end; gap: 8px;",
                button {
                    r#type: "button",
                    class: "btn",
                    style: SECONDARY_BUTTON,
                    disabled: snapshot.saving,
                    onclick: cancel,
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "btn",
                    style: PRIMARY_BUTTON,
                    disabled: snapshot.saving || uploading,
                    if snapshot.saving { "Saving..." } else { "Save project" }
                }
            }
        }
    }
}

#[component]
fn Field(label: &'static str, children: Element) -> Element {
    rsx! {
        label { style: "display: flex; flex-direction: column; gap: 6px; font-size: 13px; color: {PALETTE.text_secondary};",
            "{label}"
            {children}
        }
    }
}

/// Primary image, entered as a URL or uploaded from disk.
#[component]
fn ImageField() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let snapshot = state.panel.form.snapshot();
    let image = snapshot.draft.image.clone();

    let set_mode = |mode: ImageInputMode| {
        let mut state = state.clone();
        move |_: MouseEvent| {
            state.panel.form.set_image_input(mode);
            state.touch();
        }
    };

    let upload = {
        let state = state.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            spawn(async move {
                let Some(file) = pick_image().await else {
                    return;
                };
                state.touch();
                if let Err(error) = state.panel.form.upload_image(file).await {
                    tracing::warn!("Image upload failed: {}", error);
                }
                state.after_action();
            });
        }
    };

    let tab_style = |active: bool| {
        let background = if active { PALETTE.bg_tertiary } else { "transparent" };
        format!("{SECONDARY_BUTTON} padding: 4px 10px; background: {background};")
    };
    let url_tab = tab_style(snapshot.image_input == ImageInputMode::Url);
    let upload_tab = tab_style(snapshot.image_input == ImageInputMode::Upload);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 6px; font-size: 13px; color: {PALETTE.text_secondary};",
            div { style: "display: flex; align-items: center; gap: 8px;",
                span { style: "flex: 1;", "Main image" }
                button { r#type: "button", style: "{url_tab}", onclick: set_mode(ImageInputMode::Url), "URL" }
                button { r#type: "button", style: "{upload_tab}", onclick: set_mode(ImageInputMode::Upload), "Upload" }
            }

            {
                match snapshot.image_input {
                    ImageInputMode::Url => rsx! {
                        input {
                            r#type: "url",
                            placeholder: "https://",
                            value: "{image}",
                            style: INPUT_STYLE,
                            oninput: draft_input(&state, |draft, value| draft.image = value),
                        }
                    },
                    ImageInputMode::Upload => rsx! {
                        button {
                            r#type: "button",
                            class: "btn",
                            style: SECONDARY_BUTTON,
                            disabled: snapshot.uploading_image,
                            onclick: upload,
                            if snapshot.uploading_image { "Uploading..." } else { "Choose image" }
                        }
                    },
                }
            }

            if !image.trim().is_empty() {
                img {
                    src: "{image}",
                    style: "max-width: 240px; max-height: 140px; object-fit: cover; border-radius: 6px; border: 1px solid {PALETTE.border};",
                }
            }
        }
    }
}

#[component]
fn GalleryField() -> Element {
    let state = use_context::<AppState>();
    let _ = state.track();
    let snapshot = state.panel.form.snapshot();

    let add_images = {
        let state = state.clone();
        move |_: MouseEvent| {
            let mut state = state.clone();
            spawn(async move {
                let files = pick_images().await;
                if files.is_empty() {
                    return;
                }
                state.touch();
                if let Err(error) = state.panel.form.upload_gallery(files).await {
                    tracing::warn!("Gallery upload failed: {}", error);
                }
                state.after_action();
            });
        }
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 6px; font-size: 13px; color: {PALETTE.text_secondary};",
            div { style: "display: flex; align-items: center; gap: 8px;",
                span { style: "flex: 1;", "Gallery" }
                button {
                    r#type: "button",
                    class: "btn",
                    style: SECONDARY_BUTTON,
                    disabled: snapshot.uploading_gallery,
                    onclick: add_images,
                    if snapshot.uploading_gallery { "Uploading..." } else { "Add images" }
                }
            }
            if snapshot.draft.images.is_empty() {
                span { style: "color: {PALETTE.text_muted};", "No gallery images" }
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                for url in snapshot.draft.images {
                    GalleryThumb { key: "{url}", url }
                }
            }
        }
    }
}

#[component]
fn GalleryThumb(url: String) -> Element {
    let state = use_context::<AppState>();

    let remove = {
        let mut state = state.clone();
        let url = url.clone();
        move |_: MouseEvent| {
            state.panel.form.remove_gallery_image(&url);
            state.touch();
        }
    };

    rsx! {
        div { style: "position: relative;",
            img {
                src: "{url}",
                style: "width: 96px; height: 72px; object-fit: cover; border-radius: 6px; border: 1px solid {PALETTE.border};",
            }
            button {
                r#type: "button",
                title: "Remove",
                style: "position: absolute; top: 2px; right: 2px; border: none; border-radius: 50%; width: 20px; height: 20px; background: rgba(0, 0, 0, 0.65); color: #fff; cursor: pointer;",
                onclick: remove,
                "×"
            }
        }
    }
}
