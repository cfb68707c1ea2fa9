//! UI Components
//!
//! Landing page widgets and the admin overlay.

mod admin;
mod confirm_dialog;
mod image_picker;
mod project_detail;
mod project_grid;
mod terminal;
mod toast;

pub use admin::AdminOverlay;
pub use confirm_dialog::ConfirmDeleteDialog;
pub use project_detail::ProjectDetail;
pub use project_grid::ProjectGrid;
pub use terminal::TerminalWidget;
pub use toast::Toast;
