//! Project model

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::normalize_text_option;

/// Backend-assigned project identifier.
///
/// The record store may hand out text (uuid) or integer keys; both are kept
/// as their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wrap an identifier returned by the backend
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Create a fresh time-sortable identifier (used by in-process backends)
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("Project ID cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

/// A portfolio project as stored in the `projects` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Primary image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Gallery image URLs
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Source code link
    #[serde(default)]
    pub github: Option<String>,
    /// Live demo link
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a stored project from its fields (identity and timestamp come from the store)
    #[must_use]
    pub fn from_fields(id: ProjectId, created_at: DateTime<Utc>, fields: ProjectFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            image: fields.image,
            images: fields.images,
            tags: fields.tags,
            github: fields.github,
            live: fields.live,
            featured: fields.featured,
            created_at,
        }
    }

    /// The writable fields of this record, as resupplied on update
    #[must_use]
    pub fn fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            images: self.images.clone(),
            tags: self.tags.clone(),
            github: self.github.clone(),
            live: self.live.clone(),
            featured: self.featured,
        }
    }

    /// Primary image followed by gallery images, without duplicates
    #[must_use]
    pub fn all_images(&self) -> Vec<String> {
        let mut all = Vec::with_capacity(self.images.len() + 1);
        if let Some(image) = self.image.as_ref().filter(|image| !image.trim().is_empty()) {
            all.push(image.clone());
        }
        for image in &self.images {
            if !all.contains(image) {
                all.push(image.clone());
            }
        }
        all
    }
}

/// Writable project fields exchanged with the record store.
///
/// Updates always send every field; absent optionals are written as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub github: Option<String>,
    pub live: Option<String>,
    pub featured: bool,
}

impl ProjectFields {
    /// Reject records missing a title or description
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(Error::Validation(
                "Title and description are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Trim text fields and turn blank optionals into `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: normalize_text_option(self.image),
            images: self
                .images
                .into_iter()
                .filter_map(|image| normalize_text_option(Some(image)))
                .collect(),
            tags: self
                .tags
                .into_iter()
                .filter_map(|tag| normalize_text_option(Some(tag)))
                .collect(),
            github: normalize_text_option(self.github),
            live: normalize_text_option(self.live),
            featured: self.featured,
        }
    }
}

/// Listing order: featured first, then newest first
#[must_use]
pub fn display_order(a: &Project, b: &Project) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Split a comma separated tag string, trimming entries and dropping empties
///
/// # Examples
///
/// ```
/// use folio_core::models::parse_tags;
///
/// let tags = parse_tags("React, , TypeScript ,Node.js");
/// assert_eq!(tags, vec!["React", "TypeScript", "Node.js"]);
/// ```
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Join tags back into the editable comma separated form
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
