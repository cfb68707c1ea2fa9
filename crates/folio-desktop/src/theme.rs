//! Colors and base styles for the desktop app

/// Color palette shared by all components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub overlay: &'static str,
}

pub const PALETTE: Palette = Palette {
    bg_primary: "#0b0f17",
    bg_secondary: "#121826",
    bg_tertiary: "#1b2335",
    text_primary: "#e6e9ef",
    text_secondary: "#a9b1c3",
    text_muted: "#6b7489",
    border: "#26304a",
    accent: "#4f8cff",
    success: "#3fb984",
    error: "#ef5b5b",
    overlay: "rgba(5, 8, 14, 0.78)",
};

/// Page-wide rules that inline styles cannot express.
pub const BASE_CSS: &str = r"
html { scroll-behavior: smooth; }
body { margin: 0; }
* { box-sizing: border-box; }
.nav-link { transition: color 0.15s; }
.nav-link:hover { color: #e6e9ef; }
.project-card { transition: transform 0.15s, border-color 0.15s; }
.project-card:hover { transform: translateY(-2px); border-color: #4f8cff; }
.terminal-input:focus { outline: none; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
";

/// Background and text color for a notice of `kind`.
#[must_use]
pub const fn notice_colors(kind: folio_core::admin::NoticeKind) -> (&'static str, &'static str) {
    match kind {
        folio_core::admin::NoticeKind::Success => (PALETTE.success, PALETTE.bg_primary),
        folio_core::admin::NoticeKind::Error => (PALETTE.error, PALETTE.text_primary),
        folio_core::admin::NoticeKind::Info => (PALETTE.bg_tertiary, PALETTE.text_primary),
    }
}
