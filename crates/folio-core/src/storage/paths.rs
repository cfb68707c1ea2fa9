//! Storage path helpers.

use chrono::Utc;
use uuid::Uuid;

use crate::models::ImageFile;

const RANDOM_SUFFIX_LEN: usize = 12;

/// Build a collision-resistant object path for an uploaded image.
///
/// Layout: `{folder}/{unix-ms}-{random}.{ext}`; the extension comes from the
/// original file name and is dropped when it has none.
pub fn build_object_path(folder: &str, file: &ImageFile) -> String {
    let folder = folder.trim().trim_matches('/');
    let ts = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    let random = &random[..RANDOM_SUFFIX_LEN];
    let ext = file.extension().map(clean_extension).unwrap_or_default();

    let file_name = if ext.is_empty() {
        format!("{ts}-{random}")
    } else {
        format!("{ts}-{random}.{ext}")
    };

    if folder.is_empty() {
        file_name
    } else {
        format!("{folder}/{file_name}")
    }
}

/// Lowercased ASCII alphanumerics of `ext`; anything else is dropped.
fn clean_extension(ext: &str) -> String {
    ext.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Recover the object path from a public URL of `bucket`.
///
/// Returns `None` when the URL does not point into the bucket.
pub fn object_path_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/{}/", bucket.trim_matches('/'));
    let (_, path) = url.trim().split_once(&marker)?;
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_object_path_keeps_folder_and_extension() {
        let file = ImageFile::new("My Shot.PNG", "image/png", Vec::new());
        let path = build_object_path("/project-images/", &file);
        assert!(path.starts_with("project-images/"));
        assert!(path.ends_with(".png"));

        let name = path.trim_start_matches("project-images/");
        let (ts, rest) = name.split_once('-').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert_eq!(rest.trim_end_matches(".png").len(), RANDOM_SUFFIX_LEN);
    }

    #[test]
    fn build_object_path_is_unique_per_call() {
        let file = ImageFile::new("a.jpg", "image/jpeg", Vec::new());
        assert_ne!(
            build_object_path("images", &file),
            build_object_path("images", &file)
        );
    }

    #[test]
    fn build_object_path_without_extension() {
        let file = ImageFile::new("snapshot", "image/png", Vec::new());
        let path = build_object_path("", &file);
        assert!(!path.contains('.'));
        assert!(!path.contains('/'));
    }

    #[test]
    fn build_object_path_drops_odd_extension_chars() {
        let file = ImageFile::new("shot.we bp?", "image/webp", Vec::new());
        assert!(build_object_path("images", &file).ends_with(".webp"));
    }

    #[test]
    fn object_path_from_public_url_strips_bucket_prefix() {
        let url = "https://demo.supabase.co/storage/v1/object/public/images/project-images/1-abc.png";
        assert_eq!(
            object_path_from_public_url(url, "images").as_deref(),
            Some("project-images/1-abc.png")
        );
    }

    #[test]
    fn object_path_from_public_url_rejects_foreign_urls() {
        assert_eq!(
            object_path_from_public_url("https://cdn.example.com/pic.png", "images"),
            None
        );
        assert_eq!(
            object_path_from_public_url("https://x/storage/v1/object/public/images/", "images"),
            None
        );
    }
}
