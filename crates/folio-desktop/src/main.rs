//! Folio Desktop Application
//!
//! The portfolio landing page and its projects admin panel in a native window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod bootstrap_config;
mod components;
mod hotkey;
mod services;
mod state;
mod theme;
mod views;

use std::sync::atomic::AtomicBool;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use hotkey::AdminHotkey;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Set by the global hotkey handler, consumed by the UI loop
pub static ADMIN_HOTKEY_TRIGGERED: AtomicBool = AtomicBool::new(false);

fn main() {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "folio=debug".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Folio...");

    // Dropping the registration would unregister the shortcut
    let _admin_hotkey = match AdminHotkey::install(&ADMIN_HOTKEY_TRIGGERED) {
        Ok(hotkey) => Some(hotkey),
        Err(error) => {
            tracing::error!("Failed to register hotkey: {}", error);
            None
        }
    };

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Folio")
            .with_inner_size(LogicalSize::new(1200.0, 820.0)),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
