//! End-to-end admin workflow against the in-memory backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use folio_core::admin::{AdminPanel, FormMode, GuardState, NoticeKind};
use folio_core::backend::{MemoryBackend, Operation, Services};
use folio_core::models::parse_tags;
use folio_core::site::{
    open_admin_when_due, SectionSpan, SectionTracker, Terminal, TerminalOutcome,
};
use folio_core::{Error, Gateway, ImageFile, ProjectFields};
use pretty_assertions::assert_eq;

const MIB: usize = 1024 * 1024;

fn fields(title: &str, featured: bool) -> ProjectFields {
    ProjectFields {
        title: title.to_string(),
        description: format!("{title} description"),
        featured,
        ..ProjectFields::default()
    }
}

fn png(name: &str, size: usize) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0; size])
}

fn signed_in_backend() -> MemoryBackend {
    let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
    backend.sign_in_as("admin@example.com");
    backend
}

async fn open_panel(backend: &MemoryBackend) -> AdminPanel {
    let panel = AdminPanel::new(Gateway::from_backend(backend.clone()));
    panel.open().await.unwrap();
    backend.reset_calls();
    panel
}

#[tokio::test]
async fn update_preserves_identity_and_creation_time() {
    let backend = signed_in_backend();
    let gateway = Gateway::from_backend(backend.clone());

    let created = gateway.create_project(fields("Folio", false)).await.unwrap();
    let replacement = ProjectFields {
        title: "Folio 2".to_string(),
        description: "Rewritten".to_string(),
        tags: vec!["Rust".to_string()],
        live: Some("https://example.com".to_string()),
        featured: true,
        ..ProjectFields::default()
    };
    gateway
        .update_project(&created.id, replacement.clone())
        .await
        .unwrap();

    let fetched = gateway.get_project(&created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(fetched.fields(), replacement);
}

#[tokio::test]
async fn update_clears_optional_fields_left_out() {
    let backend = signed_in_backend();
    let gateway = Gateway::from_backend(backend.clone());
    let created = gateway
        .create_project(ProjectFields {
            github: Some("https://github.com/example/folio".to_string()),
            ..fields("Folio", false)
        })
        .await
        .unwrap();

    let updated = gateway
        .update_project(&created.id, fields("Folio", false))
        .await
        .unwrap();
    assert_eq!(updated.github, None);
}

#[tokio::test]
async fn deleted_project_is_gone_from_list() {
    let backend = signed_in_backend();
    let gateway = Gateway::from_backend(backend.clone());
    let keep = gateway.create_project(fields("keep", false)).await.unwrap();
    let doomed = gateway.create_project(fields("doomed", false)).await.unwrap();

    gateway.delete_project(&doomed.id).await.unwrap();

    let ids: Vec<_> = gateway
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|project| project.id)
        .collect();
    assert_eq!(ids, vec![keep.id]);
    assert!(matches!(
        gateway.delete_project(&doomed.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn list_puts_featured_first_then_newest() {
    let backend = MemoryBackend::new();
    backend.seed(fields("t1", false));
    backend.seed(fields("t2", true));
    backend.seed(fields("t3", false));

    let titles: Vec<String> = Gateway::from_backend(backend)
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|project| project.title)
        .collect();
    assert_eq!(titles, vec!["t2", "t3", "t1"]);
}

#[test]
fn tag_string_is_split_trimmed_and_filtered() {
    assert_eq!(
        parse_tags("React, , TypeScript ,Node.js"),
        vec!["React", "TypeScript", "Node.js"]
    );
}

#[tokio::test]
async fn save_with_empty_title_makes_no_calls() {
    let backend = signed_in_backend();
    let panel = open_panel(&backend).await;

    panel.form.open_create();
    panel.form.edit_draft(|draft| {
        draft.title = "   ".to_string();
        draft.description = "Has a description".to_string();
    });

    let error = panel.form.save().await.unwrap_err();
    assert!(matches!(error, Error::Validation(_)));
    assert_eq!(error.to_string(), "Title and description are required");
    assert_eq!(backend.total_calls(), 0);
    assert_eq!(panel.form.mode(), FormMode::Creating);
}

#[tokio::test]
async fn save_creates_refreshes_and_closes() {
    let backend = signed_in_backend();
    let panel = open_panel(&backend).await;

    panel.form.open_create();
    panel.form.edit_draft(|draft| {
        draft.title = "Folio".to_string();
        draft.description = "Portfolio site".to_string();
        draft.tags = "Rust, , Dioxus ".to_string();
        draft.github = "  ".to_string();
    });
    let project = panel.form.save().await.unwrap();

    assert_eq!(project.tags, vec!["Rust", "Dioxus"]);
    assert_eq!(project.github, None);
    assert_eq!(backend.calls(Operation::Insert), 1);
    assert_eq!(backend.calls(Operation::List), 1);
    assert_eq!(panel.list.projects(), vec![project]);
    assert_eq!(panel.form.mode(), FormMode::Closed);

    let notice = panel.notices.current().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Project created successfully!");
}

#[tokio::test]
async fn save_in_edit_mode_updates_record() {
    let backend = signed_in_backend();
    let original = backend.seed(ProjectFields {
        tags: vec!["Rust".to_string(), "CLI".to_string()],
        ..fields("Folio", false)
    });
    let panel = open_panel(&backend).await;

    panel.form.open_edit(original.clone());
    assert_eq!(panel.form.draft().tags, "Rust, CLI");
    panel
        .form
        .edit_draft(|draft| draft.description = "Updated".to_string());
    let saved = panel.form.save().await.unwrap();

    assert_eq!(saved.id, original.id);
    assert_eq!(saved.description, "Updated");
    assert_eq!(saved.tags, original.tags);
    assert_eq!(backend.calls(Operation::Update), 1);
    assert_eq!(backend.calls(Operation::Insert), 0);
    assert_eq!(
        panel.notices.current().unwrap().text,
        "Project updated successfully!"
    );
}

#[tokio::test]
async fn wrong_type_and_oversized_uploads_never_reach_storage() {
    let backend = signed_in_backend();
    let gateway = Gateway::from_backend(backend.clone());

    let text = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());
    let error = gateway.upload_image(&text).await.unwrap_err();
    assert_eq!(error.to_string(), "Please select an image file");

    let huge = png("huge.png", 6 * MIB);
    let error = gateway.upload_image(&huge).await.unwrap_err();
    assert!(matches!(error, Error::Validation(_)));
    assert_eq!(error.to_string(), "Image must be less than 5MB");
    assert_eq!(backend.calls(Operation::Put), 0);

    let url = gateway.upload_image(&png("shot.png", 4 * MIB)).await.unwrap();
    assert!(url.starts_with("memory://images/project-images/"));
    assert!(url.ends_with(".png"));
    assert_eq!(backend.calls(Operation::Put), 1);
}

#[tokio::test]
async fn gallery_with_one_oversized_file_uploads_nothing() {
    let backend = signed_in_backend();
    let panel = open_panel(&backend).await;
    panel.form.open_create();

    let files = vec![
        png("one.png", MIB),
        png("two.png", 6 * MIB),
        png("three.png", MIB),
    ];
    let error = panel.form.upload_gallery(files).await.unwrap_err();

    assert!(matches!(error, Error::Validation(_)));
    assert_eq!(error.to_string(), "two.png is larger than 5MB");
    assert_eq!(backend.calls(Operation::Put), 0);
    assert!(panel.form.draft().images.is_empty());

    let notice = panel.notices.current().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "two.png is larger than 5MB");
}

#[tokio::test]
async fn toggling_featured_changes_only_that_field() {
    let backend = signed_in_backend();
    let project = backend.seed(ProjectFields {
        image: Some("https://example.com/a.png".to_string()),
        images: vec!["https://example.com/b.png".to_string()],
        tags: vec!["Rust".to_string()],
        github: Some("https://github.com/example/folio".to_string()),
        ..fields("Folio", false)
    });
    let panel = open_panel(&backend).await;

    let updated = panel.list.toggle_featured(&project).await.unwrap();

    assert!(updated.featured);
    assert_eq!(updated.id, project.id);
    assert_eq!(updated.created_at, project.created_at);
    let mut expected = project.fields();
    expected.featured = true;
    assert_eq!(updated.fields(), expected);
    assert_eq!(backend.calls(Operation::List), 1);
    assert!(!panel.list.snapshot().busy);
}

#[tokio::test(start_paused = true)]
async fn single_and_gallery_uploads_overlap_but_not_themselves() {
    let backend = signed_in_backend().with_latency(Duration::from_millis(200));
    let panel = open_panel(&backend).await;
    panel.form.open_create();

    let single = tokio::spawn({
        let form = panel.form.clone();
        async move { form.upload_image(png("cover.png", 1024)).await }
    });
    let gallery = tokio::spawn({
        let form = panel.form.clone();
        async move {
            form.upload_gallery(vec![png("a.png", 1024), png("b.png", 1024)])
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshot = panel.form.snapshot();
    assert!(snapshot.uploading_image);
    assert!(snapshot.uploading_gallery);
    assert!(matches!(
        panel.form.upload_image(png("again.png", 1024)).await,
        Err(Error::InProgress(_))
    ));

    let cover = single.await.unwrap().unwrap();
    let urls = gallery.await.unwrap().unwrap();
    let draft = panel.form.draft();
    assert_eq!(draft.image, cover);
    assert_eq!(draft.images, urls);
    assert_eq!(backend.calls(Operation::Put), 3);
}

#[tokio::test(start_paused = true)]
async fn double_save_is_rejected_while_first_is_in_flight() {
    let backend = signed_in_backend().with_latency(Duration::from_millis(200));
    let panel = open_panel(&backend).await;
    panel.form.open_create();
    panel.form.edit_draft(|draft| {
        draft.title = "Folio".to_string();
        draft.description = "Portfolio".to_string();
    });

    let first = tokio::spawn({
        let form = panel.form.clone();
        async move { form.save().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(panel.form.snapshot().saving);

    let error = panel.form.save().await.unwrap_err();
    assert_eq!(error.to_string(), "Save is already in progress");

    first.await.unwrap().unwrap();
    assert_eq!(backend.projects().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn session_loss_aborts_pending_save() {
    let auth = signed_in_backend();
    let slow = auth.clone().with_latency(Duration::from_millis(200));
    let gateway = Gateway::new(Services {
        auth: Arc::new(auth),
        projects: Arc::new(slow.clone()),
        blobs: Arc::new(slow.clone()),
    });
    let panel = AdminPanel::new(gateway);
    assert!(panel.open().await.unwrap().is_authenticated());
    panel.form.open_create();
    panel.form.edit_draft(|draft| {
        draft.title = "Folio".to_string();
        draft.description = "Portfolio".to_string();
    });

    let save = tokio::spawn({
        let form = panel.form.clone();
        async move { form.save().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(panel.form.snapshot().saving);
    panel.guard.sign_out().await.unwrap();

    let error = save.await.unwrap().unwrap_err();
    assert!(error.is_session_loss());
    assert_eq!(panel.form.mode(), FormMode::Closed);
    assert!(!panel.form.snapshot().saving);
    assert_eq!(panel.guard.state(), GuardState::Unauthenticated { error: None });
    assert_eq!(panel.notices.current().unwrap().kind, NoticeKind::Error);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(slow.projects().is_empty());
}

#[tokio::test]
async fn expired_session_closes_form_and_returns_to_login() {
    let backend = signed_in_backend();
    let panel = open_panel(&backend).await;
    panel.form.open_create();
    panel.form.edit_draft(|draft| {
        draft.title = "Folio".to_string();
        draft.description = "Portfolio".to_string();
    });
    backend.expire_session();

    let error = panel.form.save().await.unwrap_err();
    assert!(error.is_session_loss());
    assert_eq!(panel.form.mode(), FormMode::Closed);
    assert!(!panel.guard.is_authenticated());
}

#[tokio::test]
async fn login_then_manage() {
    let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
    backend.seed(fields("existing", false));
    let panel = AdminPanel::new(Gateway::from_backend(backend.clone()));

    assert_eq!(
        panel.open().await.unwrap(),
        GuardState::Unauthenticated { error: None }
    );
    assert!(panel.list.projects().is_empty());

    panel
        .guard
        .sign_in("admin@example.com", "secret")
        .await
        .unwrap();
    assert!(panel.guard.is_authenticated());
    panel.list.refresh().await.unwrap();
    assert_eq!(panel.list.projects().len(), 1);

    panel.close();
}

#[test]
fn tracker_follows_scroll_and_keeps_last_match() {
    let spans = |id: &str| match id {
        "home" => Some(SectionSpan::new(0.0, 500.0)),
        "about" => Some(SectionSpan::new(500.0, 700.0)),
        _ => None,
    };
    let mut tracker = SectionTracker::new(["home", "about"]);

    // 500 + the 100px header offset = 600
    assert_eq!(tracker.on_scroll(500.0, spans), "about");
    // 1200 + 100 = 1300, past every section
    assert_eq!(tracker.on_scroll(1_200.0, spans), "about");
}

#[tokio::test(start_paused = true)]
async fn admin_command_opens_panel_after_delay() {
    let mut terminal = Terminal::default();
    let outcome = terminal.submit("admin");
    assert_eq!(
        outcome,
        TerminalOutcome::OpenAdmin {
            after: Duration::from_millis(500)
        }
    );

    let opened = Arc::new(AtomicBool::new(false));
    let task = tokio::spawn({
        let opened = Arc::clone(&opened);
        async move { open_admin_when_due(outcome, move || opened.store(true, Ordering::SeqCst)).await }
    });

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert!(!opened.load(Ordering::SeqCst));
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(opened.load(Ordering::SeqCst));
    assert!(task.await.unwrap());
}

#[tokio::test]
async fn unknown_command_keeps_panel_closed() {
    let mut terminal = Terminal::default();
    let outcome = terminal.submit("xyz");

    let mut opened = false;
    assert!(!open_admin_when_due(outcome, || opened = true).await);
    assert!(!opened);
    assert!(terminal.history()[0].response.contains("not found"));
}
