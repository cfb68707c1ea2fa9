use std::fs::File;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
        }
    }
}

/// Print the completion script, or write it to `output_path`.
pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    let shell = Shell::from(shell);

    let Some(path) = output_path else {
        clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
        return Ok(());
    };

    let mut file = File::create(path)?;
    clap_complete::generate(shell, &mut command, bin_name, &mut file);
    tracing::info!("Wrote {} completions to {}", shell, path.display());
    println!("{}", path.display());
    Ok(())
}
