use folio_core::admin::{AdminPanel, Notices, ProjectList};
use folio_core::{Gateway, Project};

use crate::cli::{ProjectArgs, ProjectCommands};
use crate::commands::common::{
    apply_project_args, confirm, format_project_details, format_project_lines, open_admin,
    open_gateway, resolve_project, short_id,
};
use crate::error::CliError;

pub async fn run_projects(
    command: ProjectCommands,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ProjectCommands::List { json } => {
            let (_, gateway) = open_gateway(global_profile)?;
            let projects = load_projects(gateway).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else {
                for line in format_project_lines(&projects) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        ProjectCommands::Show { id, json } => {
            let (_, gateway) = open_gateway(global_profile)?;
            let projects = load_projects(gateway).await?;
            let project = resolve_project(&id, &projects)?;
            if json {
                println!("{}", serde_json::to_string_pretty(project)?);
            } else {
                for line in format_project_details(project) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        ProjectCommands::Add { fields } => {
            let panel = open_admin(global_profile).await?;
            let project = add_project(&panel, fields).await?;
            println!("{}", project.id);
            Ok(())
        }
        ProjectCommands::Edit { id, fields } => {
            let panel = open_admin(global_profile).await?;
            let project = edit_project(&panel, &id, fields).await?;
            println!("{}", project.id);
            Ok(())
        }
        ProjectCommands::Delete { id, yes } => {
            let panel = open_admin(global_profile).await?;
            let projects = panel.list.projects();
            let project = resolve_project(&id, &projects)?;
            if !yes && !confirm(&format!("Delete '{}' ({})?", project.title, short_id(project)))? {
                println!("Cancelled");
                return Ok(());
            }
            delete_project(&panel, &id).await?;
            print_notice(&panel);
            Ok(())
        }
        ProjectCommands::Feature { id } => {
            let panel = open_admin(global_profile).await?;
            let project = toggle_featured(&panel, &id).await?;
            let state = if project.featured { "featured" } else { "not featured" };
            println!("'{}' is now {state}", project.title);
            Ok(())
        }
    }
}

/// Load the list the way the landing page does, featured first.
pub async fn load_projects(gateway: Gateway) -> Result<Vec<Project>, CliError> {
    let list = ProjectList::new(gateway, Notices::default());
    list.refresh().await?;
    Ok(list.projects())
}

pub async fn add_project(panel: &AdminPanel, fields: ProjectArgs) -> Result<Project, CliError> {
    panel.form.open_create();
    panel.form.edit_draft(|draft| apply_project_args(draft, fields));
    Ok(panel.form.save().await?)
}

pub async fn edit_project(
    panel: &AdminPanel,
    query: &str,
    fields: ProjectArgs,
) -> Result<Project, CliError> {
    let projects = panel.list.projects();
    let project = resolve_project(query, &projects)?;
    panel.form.open_edit(project.clone());
    panel.form.edit_draft(|draft| apply_project_args(draft, fields));
    Ok(panel.form.save().await?)
}

pub async fn delete_project(panel: &AdminPanel, query: &str) -> Result<(), CliError> {
    let projects = panel.list.projects();
    let pending = panel.list.request_delete(resolve_project(query, &projects)?);
    panel.list.confirm_delete(pending).await?;
    Ok(())
}

pub async fn toggle_featured(panel: &AdminPanel, query: &str) -> Result<Project, CliError> {
    let projects = panel.list.projects();
    let project = resolve_project(query, &projects)?;
    Ok(panel.list.toggle_featured(project).await?)
}

fn print_notice(panel: &AdminPanel) {
    if let Some(notice) = panel.notices.current() {
        println!("{}", notice.text);
    }
}
