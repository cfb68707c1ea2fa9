//! The small command widget in the contact section.
//!
//! Commands are exact, case-insensitive words; there is no argument parsing.

use std::time::Duration;

/// Delay between the `admin` command and the admin panel opening
pub const ADMIN_OPEN_DELAY: Duration = Duration::from_millis(500);

pub const DEFAULT_IDENTITY: &str = "visitor@hyscop.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Admin,
    Help,
    Clear,
    Whoami,
    Status,
}

impl Command {
    /// Recognise a trimmed, case-insensitive command word.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "help" => Some(Self::Help),
            "clear" => Some(Self::Clear),
            "whoami" => Some(Self::Whoami),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Success,
    Info,
    Error,
}

/// One submitted command and the widget's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalEntry {
    /// Input as typed
    pub command: String,
    pub response: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    /// Blank input
    Ignored,
    Cleared,
    Responded,
    /// Open the admin panel once `after` has elapsed
    OpenAdmin { after: Duration },
}

#[derive(Debug, Clone)]
pub struct Terminal {
    identity: String,
    history: Vec<TerminalEntry>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY)
    }
}

impl Terminal {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &[TerminalEntry] {
        &self.history
    }

    pub fn submit(&mut self, input: &str) -> TerminalOutcome {
        if input.trim().is_empty() {
            return TerminalOutcome::Ignored;
        }

        let (response, kind, outcome) = match Command::parse(input) {
            Some(Command::Clear) => {
                self.history.clear();
                return TerminalOutcome::Cleared;
            }
            Some(Command::Admin) => (
                "Access granted. Opening admin panel...".to_string(),
                EntryKind::Success,
                TerminalOutcome::OpenAdmin {
                    after: ADMIN_OPEN_DELAY,
                },
            ),
            Some(Command::Help) => (
                "Available commands: help, clear, whoami, status".to_string(),
                EntryKind::Info,
                TerminalOutcome::Responded,
            ),
            Some(Command::Whoami) => (
                self.identity.clone(),
                EntryKind::Info,
                TerminalOutcome::Responded,
            ),
            Some(Command::Status) => (
                "All systems operational ✓".to_string(),
                EntryKind::Success,
                TerminalOutcome::Responded,
            ),
            None => (
                format!("bash: {input}: command not found"),
                EntryKind::Error,
                TerminalOutcome::Responded,
            ),
        };

        self.history.push(TerminalEntry {
            command: input.to_string(),
            response,
            kind,
        });
        outcome
    }
}

/// Run `open` once the delay requested by `outcome` has passed.
///
/// Returns `false` without waiting when the outcome does not open the panel.
pub async fn open_admin_when_due(outcome: TerminalOutcome, open: impl FnOnce()) -> bool {
    let TerminalOutcome::OpenAdmin { after } = outcome else {
        return false;
    };
    tokio::time::sleep(after).await;
    open();
    true
}
