//! Landing page behavior: navigation tracking, the command widget and the
//! admin shortcut.

pub mod shortcut;
pub mod terminal;
pub mod tracker;

pub use shortcut::{admin_chord_label, is_admin_chord, Modifiers};
pub use terminal::{
    open_admin_when_due, Command, EntryKind, Terminal, TerminalEntry, TerminalOutcome,
    ADMIN_OPEN_DELAY, DEFAULT_IDENTITY,
};
pub use tracker::{header_is_scrolled, SectionSpan, SectionTracker, HEADER_OFFSET, NAV_SECTIONS};
