//! Application state management
//!
//! Global state accessible via Dioxus context providers. The admin
//! controllers own their data; signals here only tell the UI when to re-read
//! their snapshots.

use dioxus::prelude::*;
use folio_core::admin::{AdminPanel, GuardState, Notices, PendingDelete, ProjectList};
use folio_core::site::NAV_SECTIONS;
use folio_core::{Gateway, Project};

use crate::services::BackendMode;

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub mode: BackendMode,
    /// Controllers behind the admin overlay
    pub panel: AdminPanel,
    /// Projects shown on the landing page
    pub showcase: ProjectList,
    /// Bumped whenever a controller changed state the UI shows
    pub revision: Signal<u64>,
    pub admin_open: Signal<bool>,
    pub guard_state: Signal<GuardState>,
    pub active_section: Signal<String>,
    pub header_scrolled: Signal<bool>,
    /// Project shown in the detail overlay
    pub selected_project: Signal<Option<Project>>,
    /// Delete awaiting confirmation
    pub pending_delete: Signal<Option<PendingDelete>>,
}

impl AppState {
    pub fn new(gateway: Gateway, mode: BackendMode) -> Self {
        Self {
            panel: AdminPanel::new(gateway.clone()),
            showcase: ProjectList::new(gateway.clone(), Notices::default()),
            gateway,
            mode,
            revision: Signal::new(0),
            admin_open: Signal::new(false),
            guard_state: Signal::new(GuardState::Loading),
            active_section: Signal::new(NAV_SECTIONS[0].to_string()),
            header_scrolled: Signal::new(false),
            selected_project: Signal::new(None),
            pending_delete: Signal::new(None),
        }
    }

    /// Re-render everything that reads controller snapshots.
    pub fn touch(&mut self) {
        *self.revision.write() += 1;
    }

    /// Subscribe the calling component to controller changes.
    pub fn track(&self) -> u64 {
        (self.revision)()
    }

    pub fn refresh_showcase(&self) {
        let mut state = self.clone();
        spawn(async move {
            if let Err(error) = state.showcase.refresh().await {
                tracing::warn!("Failed to load projects: {}", error);
            }
            state.touch();
        });
    }

    pub fn open_admin(&mut self) {
        if (self.admin_open)() {
            return;
        }
        tracing::info!("Opening admin panel");
        self.admin_open.set(true);
        let mut state = self.clone();
        spawn(async move {
            if let Err(error) = state.panel.open().await {
                tracing::warn!("Admin panel opened without projects: {}", error);
            }
            state.touch();
        });
    }

    pub fn close_admin(&mut self) {
        self.panel.close();
        self.panel.notices.clear();
        self.pending_delete.set(None);
        self.admin_open.set(false);
        self.touch();
        self.refresh_showcase();
    }

    /// Re-render now and dismiss whatever notice is up once its time passes.
    pub fn after_action(&mut self) {
        self.touch();
        let Some(notice) = self.panel.notices.current() else {
            return;
        };
        let mut state = self.clone();
        spawn(async move {
            if state.panel.notices.dismiss_after_ttl(notice.id).await {
                state.touch();
            }
        });
    }
}
