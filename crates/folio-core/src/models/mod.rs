//! Data models for Folio

mod gallery;
mod image;
mod project;

pub use gallery::Carousel;
pub use image::{ImageFile, MAX_IMAGE_BYTES};
pub use project::{display_order, join_tags, parse_tags, Project, ProjectFields, ProjectId};
