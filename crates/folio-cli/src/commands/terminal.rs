use folio_core::admin::{AdminPanel, GuardState, LOAD_ERROR};
use folio_core::site::{open_admin_when_due, EntryKind, Terminal, TerminalEntry, TerminalOutcome};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::commands::common::{format_project_lines, open_gateway};
use crate::error::CliError;

const PROMPT: &str = "$ ";

pub async fn run_terminal(global_profile: Option<&str>) -> Result<(), CliError> {
    let mut terminal = Terminal::default();
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    println!("Type 'help' for commands, Ctrl+D to quit.");
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = terminal.submit(&line);
        if let Some(entry) = last_entry(&terminal, outcome) {
            println!("{}", render_entry(entry));
        }

        if open_admin_when_due(outcome, || tracing::debug!("Opening admin panel")).await {
            for line in admin_summary(global_profile).await {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn last_entry(terminal: &Terminal, outcome: TerminalOutcome) -> Option<&TerminalEntry> {
    match outcome {
        TerminalOutcome::Ignored | TerminalOutcome::Cleared => None,
        TerminalOutcome::Responded | TerminalOutcome::OpenAdmin { .. } => {
            terminal.history().last()
        }
    }
}

pub fn render_entry(entry: &TerminalEntry) -> String {
    let marker = match entry.kind {
        EntryKind::Success => "✓",
        EntryKind::Info => "›",
        EntryKind::Error => "✗",
    };
    format!("{marker} {}", entry.response)
}

async fn admin_summary(global_profile: Option<&str>) -> Vec<String> {
    match open_gateway(global_profile) {
        Ok((profile_name, gateway)) => {
            let panel = AdminPanel::new(gateway);
            let lines = describe_admin(&panel, &profile_name).await;
            panel.close();
            lines
        }
        Err(error) => vec![format!("Error: {error}")],
    }
}

/// What the admin panel shows right after opening.
pub async fn describe_admin(panel: &AdminPanel, profile_name: &str) -> Vec<String> {
    match panel.open().await {
        Ok(GuardState::Authenticated(session)) => {
            let mut lines = vec![format!(
                "Admin panel ({profile_name}) signed in as {}",
                session.identity()
            )];
            lines.extend(format_project_lines(&panel.list.projects()));
            lines
        }
        Ok(GuardState::Unauthenticated { error }) => {
            let mut lines = vec![format!(
                "Admin panel ({profile_name}) requires sign-in. Run `folio auth login --email <EMAIL> --password <PASSWORD>`."
            )];
            lines.extend(error);
            lines
        }
        Ok(GuardState::Loading) => vec!["Admin panel is still loading".to_string()],
        Err(error) => vec![format!(
            "Admin panel ({profile_name}): {LOAD_ERROR} ({error})"
        )],
    }
}
