//! System-wide admin shortcut.

use std::sync::atomic::{AtomicBool, Ordering};

use folio_core::site::admin_chord_label;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

#[cfg(target_os = "macos")]
const PRIMARY: Modifiers = Modifiers::META;
#[cfg(not(target_os = "macos"))]
const PRIMARY: Modifiers = Modifiers::CONTROL;

/// Registration of the admin shortcut; unregistered when dropped.
pub struct AdminHotkey {
    _manager: GlobalHotKeyManager,
}

impl AdminHotkey {
    /// Register the shortcut and raise `pressed` every time it fires.
    ///
    /// Must be called on the main thread.
    pub fn install(pressed: &'static AtomicBool) -> Result<Self, global_hotkey::Error> {
        let manager = GlobalHotKeyManager::new()?;
        let hotkey = HotKey::new(Some(PRIMARY | Modifiers::SHIFT), Code::KeyA);
        manager.register(hotkey)?;

        let id = hotkey.id();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id == id && event.state == HotKeyState::Pressed {
                tracing::debug!("Admin hotkey pressed");
                pressed.store(true, Ordering::SeqCst);
            }
        }));

        tracing::info!("Registered global hotkey: {}", admin_chord_label());
        Ok(Self { _manager: manager })
    }
}
