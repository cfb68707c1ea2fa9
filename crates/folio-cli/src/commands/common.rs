use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use folio_core::admin::{AdminPanel, Draft, GuardState};
use folio_core::{Gateway, ImageFile, Project};

use crate::auth::SessionStore;
use crate::cli::ProjectArgs;
use crate::config_profiles::{resolve_backend_config, CliProfilesConfig};
use crate::error::CliError;

/// Resolve the profile and build a gateway whose session lives in that
/// profile's keychain entry.
pub fn open_gateway(global_profile: Option<&str>) -> Result<(String, Gateway), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(global_profile);
    let backend = resolve_backend_config(&config, &profile_name)?.ok_or(CliError::NotConfigured)?;
    tracing::debug!("Using profile '{}' against {}", profile_name, backend.base_url());
    let gateway = Gateway::supabase(&backend, SessionStore::new(&profile_name))?;
    Ok((profile_name, gateway))
}

/// Open the admin panel for the current profile; writes need a signed-in admin.
pub async fn open_admin(global_profile: Option<&str>) -> Result<AdminPanel, CliError> {
    let (_, gateway) = open_gateway(global_profile)?;
    require_admin(AdminPanel::new(gateway)).await
}

pub async fn require_admin(panel: AdminPanel) -> Result<AdminPanel, CliError> {
    match panel.open().await? {
        GuardState::Authenticated(session) => {
            tracing::debug!("Admin session for {}", session.identity());
            Ok(panel)
        }
        GuardState::Unauthenticated { error: Some(error) } => Err(CliError::Auth(error)),
        GuardState::Unauthenticated { error: None } | GuardState::Loading => {
            Err(CliError::NotSignedIn)
        }
    }
}

pub fn normalize_project_identifier(id: &str) -> Result<String, CliError> {
    let normalized = id.trim();
    if normalized.is_empty() {
        return Err(CliError::EmptyProjectId);
    }
    Ok(normalized.to_string())
}

/// Find a project by exact id or unique id prefix.
pub fn resolve_project<'a>(query: &str, projects: &'a [Project]) -> Result<&'a Project, CliError> {
    let query = normalize_project_identifier(query)?;
    if let Some(project) = projects.iter().find(|project| project.id.as_str() == query) {
        return Ok(project);
    }

    let matches = projects
        .iter()
        .filter(|project| project.id.as_str().starts_with(&query))
        .collect::<Vec<_>>();
    match matches.as_slice() {
        [] => Err(CliError::ProjectNotFound(query)),
        [project] => Ok(project),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|project| short_id(project))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousProjectId(format!(
                "Project id prefix '{query}' is ambiguous. Matches: {options}"
            )))
        }
    }
}

pub fn short_id(project: &Project) -> String {
    project.id.as_str().chars().take(8).collect()
}

pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d").to_string()
}

pub fn format_project_lines(projects: &[Project]) -> Vec<String> {
    if projects.is_empty() {
        return vec!["No projects yet.".to_string()];
    }
    projects
        .iter()
        .map(|project| {
            let marker = if project.featured { "★" } else { " " };
            let tags = if project.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", project.tags.join(", "))
            };
            format!(
                "{marker} {}  {}  {}{tags}",
                short_id(project),
                format_created_at(project.created_at),
                project.title
            )
        })
        .collect()
}

pub fn format_project_details(project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("{}{}", project.title, if project.featured { " ★" } else { "" }),
        format!("id:       {}", project.id),
        format!("created:  {}", project.created_at.to_rfc3339()),
    ];
    if !project.tags.is_empty() {
        lines.push(format!("tags:     {}", project.tags.join(", ")));
    }
    if let Some(github) = &project.github {
        lines.push(format!("github:   {github}"));
    }
    if let Some(live) = &project.live {
        lines.push(format!("live:     {live}"));
    }
    for (index, image) in project.all_images().iter().enumerate() {
        lines.push(format!("image {}:  {image}", index + 1));
    }
    lines.push(String::new());
    lines.push(project.description.clone());
    lines
}

/// Copy the flags that were given into the draft; absent flags leave it alone.
pub fn apply_project_args(draft: &mut Draft, args: ProjectArgs) {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(image) = args.image {
        draft.image = image;
    }
    if !args.gallery.is_empty() {
        draft.images = args.gallery;
    }
    if let Some(tags) = args.tags {
        draft.tags = tags;
    }
    if let Some(github) = args.github {
        draft.github = github;
    }
    if let Some(live) = args.live {
        draft.live = live;
    }
    if args.featured {
        draft.featured = true;
    } else if args.unfeatured {
        draft.featured = false;
    }
}

/// Read an image from disk, guessing its content type from the extension.
pub fn read_image_file(path: &Path) -> Result<ImageFile, CliError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(ImageFile::new(name, content_type, bytes))
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` declines.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
