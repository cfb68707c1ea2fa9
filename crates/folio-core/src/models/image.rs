//! Image files selected for upload

use std::fmt;

use crate::error::{Error, Result};

/// Largest accepted image upload (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image picked by the admin, held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, used for the stored extension and in messages
    pub name: String,
    /// MIME type reported for the file
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    /// Extension of the original file name, if it has one
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.name.trim().rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }

    /// Checks applied before a single upload reaches the blob store
    pub fn validate(&self) -> Result<()> {
        if !self.is_image() {
            return Err(Error::Validation("Please select an image file".to_string()));
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(Error::Validation("Image must be less than 5MB".to_string()));
        }
        Ok(())
    }

    /// Same checks as [`validate`](Self::validate), with messages naming the file
    pub fn validate_in_batch(&self) -> Result<()> {
        if !self.is_image() {
            return Err(Error::Validation(format!(
                "{} is not an image file",
                self.name
            )));
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(Error::Validation(format!(
                "{} is larger than 5MB",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}
