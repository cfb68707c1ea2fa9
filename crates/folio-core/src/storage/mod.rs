//! Object storage for uploaded project images.

mod paths;
mod supabase;

pub use paths::{build_object_path, object_path_from_public_url};
pub(crate) use supabase::status_error;
pub use supabase::SupabaseStorage;
