//! Keyboard shortcut that opens the admin panel.

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Command on macOS, Super elsewhere
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Ctrl+Shift+A, or Cmd+Shift+A on macOS.
#[must_use]
pub fn is_admin_chord(key: &str, modifiers: Modifiers) -> bool {
    (modifiers.ctrl || modifiers.meta)
        && modifiers.shift
        && !modifiers.alt
        && key.eq_ignore_ascii_case("a")
}

/// Human-readable chord for the current platform.
#[must_use]
pub const fn admin_chord_label() -> &'static str {
    if cfg!(target_os = "macos") {
        "⌘⇧A"
    } else {
        "Ctrl+Shift+A"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_or_meta_with_shift_matches() {
        let ctrl = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        };
        let meta = Modifiers {
            meta: true,
            shift: true,
            ..Modifiers::default()
        };
        assert!(is_admin_chord("A", ctrl));
        assert!(is_admin_chord("a", meta));
    }

    #[test]
    fn partial_chords_do_not_match() {
        let shift_only = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        let ctrl_only = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let with_alt = Modifiers {
            ctrl: true,
            shift: true,
            alt: true,
            ..Modifiers::default()
        };
        assert!(!is_admin_chord("a", shift_only));
        assert!(!is_admin_chord("a", ctrl_only));
        assert!(!is_admin_chord("a", with_alt));
        assert!(!is_admin_chord("b", Modifiers { ctrl: true, shift: true, ..Modifiers::default() }));
    }
}
