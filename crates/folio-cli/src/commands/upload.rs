use std::path::PathBuf;

use folio_core::admin::AdminPanel;
use folio_core::ImageFile;

use crate::commands::common::{open_admin, read_image_file, resolve_project};
use crate::error::CliError;

pub async fn run_upload(
    paths: &[PathBuf],
    project: Option<&str>,
    gallery: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let files = paths
        .iter()
        .map(|path| read_image_file(path))
        .collect::<Result<Vec<_>, _>>()?;
    let panel = open_admin(global_profile).await?;

    let urls = match project {
        Some(query) => attach_images(&panel, query, files, gallery).await?,
        None => upload_images(&panel, files, gallery).await?,
    };
    for url in urls {
        println!("{url}");
    }
    Ok(())
}

/// Upload without touching any project; more than one file goes up as a batch.
pub async fn upload_images(
    panel: &AdminPanel,
    files: Vec<ImageFile>,
    gallery: bool,
) -> Result<Vec<String>, CliError> {
    let gateway = panel.guard.gateway();
    match files.as_slice() {
        [file] if !gallery => Ok(vec![gateway.upload_image(file).await?]),
        _ => Ok(gateway.upload_gallery(&files).await?),
    }
}

/// Upload through the project form and save the project with the new URLs.
///
/// Without `gallery` the single file replaces the main image.
pub async fn attach_images(
    panel: &AdminPanel,
    query: &str,
    mut files: Vec<ImageFile>,
    gallery: bool,
) -> Result<Vec<String>, CliError> {
    if !gallery && files.len() != 1 {
        return Err(CliError::Config(
            "Pass --gallery to attach more than one image".to_string(),
        ));
    }
    let projects = panel.list.projects();
    let project = resolve_project(query, &projects)?;
    panel.form.open_edit(project.clone());

    let uploaded = if gallery {
        panel.form.upload_gallery(files).await
    } else {
        match files.pop() {
            Some(file) => panel.form.upload_image(file).await.map(|url| vec![url]),
            None => Ok(Vec::new()),
        }
    };
    let urls = match uploaded {
        Ok(urls) => urls,
        Err(error) => {
            panel.form.cancel();
            return Err(error.into());
        }
    };

    let saved = panel.form.save().await?;
    tracing::info!("Attached {} image(s) to {}", urls.len(), saved.id);
    Ok(urls)
}
