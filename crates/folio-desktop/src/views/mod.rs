//! Application views

mod content;
mod home;

pub use home::Home;
