//! Native file picking for project images

use folio_core::ImageFile;
use rfd::{AsyncFileDialog, FileHandle};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

fn image_dialog() -> AsyncFileDialog {
    AsyncFileDialog::new().add_filter("Images", &IMAGE_EXTENSIONS)
}

async fn read_image(handle: FileHandle) -> ImageFile {
    let name = handle.file_name();
    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let bytes = handle.read().await;
    ImageFile::new(name, content_type, bytes)
}

/// Ask for one image. `None` when the dialog was dismissed.
pub async fn pick_image() -> Option<ImageFile> {
    let handle = image_dialog().pick_file().await?;
    Some(read_image(handle).await)
}

/// Ask for any number of images.
pub async fn pick_images() -> Vec<ImageFile> {
    let Some(handles) = image_dialog().pick_files().await else {
        return Vec::new();
    };
    let mut files = Vec::with_capacity(handles.len());
    for handle in handles {
        files.push(read_image(handle).await);
    }
    files
}
