use folio_core::admin::{GuardState, SessionGuard};
use folio_core::Gateway;

use crate::auth::{clear_stored_session, load_stored_session};
use crate::cli::AuthCommands;
use crate::commands::common::open_gateway;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            profile,
            email,
            password,
        } => login(profile.as_deref().or(global_profile), &email, &password).await,
        AuthCommands::Status { profile } => status(profile.as_deref().or(global_profile)).await,
        AuthCommands::Logout { profile } => logout(profile.as_deref().or(global_profile)).await,
    }
}

fn auth_failure(error: impl ToString) -> CliError {
    CliError::Auth(error.to_string())
}

/// Opens the profile's gateway, or `None` with the resolved name when the
/// profile has no Supabase settings yet.
fn open_optional(profile: Option<&str>) -> Result<(String, Option<Gateway>), CliError> {
    match open_gateway(profile) {
        Ok((name, gateway)) => Ok((name, Some(gateway))),
        Err(CliError::NotConfigured) => {
            let name = CliProfilesConfig::load()?.resolve_profile_name(profile);
            Ok((name, None))
        }
        Err(error) => Err(error),
    }
}

async fn login(profile: Option<&str>, email: &str, password: &str) -> Result<(), CliError> {
    let (name, gateway) = open_gateway(profile)?;
    let guard = SessionGuard::new(gateway);
    let signed_in = guard.sign_in(email, password).await;
    guard.teardown();
    let session = signed_in.map_err(auth_failure)?;
    println!("[{name}] signed in as {}", session.identity());
    Ok(())
}

async fn status(profile: Option<&str>) -> Result<(), CliError> {
    let (name, gateway) = open_optional(profile)?;
    let Some(gateway) = gateway else {
        println!("[{name}] no Supabase project configured");
        return Ok(());
    };

    let guard = SessionGuard::new(gateway);
    let line = match guard.mount().await {
        GuardState::Authenticated(session) => format!(
            "[{name}] signed in as {} until {}",
            session.identity(),
            session.expires_at
        ),
        GuardState::Unauthenticated { error: Some(error) } => {
            format!("[{name}] signed out ({error})")
        }
        GuardState::Unauthenticated { error: None } | GuardState::Loading => {
            format!("[{name}] signed out")
        }
    };
    guard.teardown();
    println!("{line}");
    Ok(())
}

async fn logout(profile: Option<&str>) -> Result<(), CliError> {
    let (name, gateway) = open_optional(profile)?;
    if let Some(gateway) = gateway {
        if load_stored_session(&name).map_err(auth_failure)?.is_some() {
            let guard = SessionGuard::new(gateway);
            if let Err(error) = guard.sign_out().await {
                tracing::warn!(profile = %name, "Remote sign out failed: {}", error);
            }
            guard.teardown();
        }
    }
    clear_stored_session(&name).map_err(auth_failure)?;
    println!("[{name}] session cleared");
    Ok(())
}
