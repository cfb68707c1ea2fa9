use std::env;

use folio_core::util::{is_http_url, normalize_text_option};

use crate::cli::ConfigCommands;
use crate::config_profiles::{default_config_path, CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Values passed to `config init`; each falls back to the environment, then
/// to what the profile already holds.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub storage_bucket: Option<String>,
    pub storage_folder: Option<String>,
    pub projects_table: Option<String>,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            supabase_url,
            supabase_anon_key,
            storage_bucket,
            storage_folder,
            projects_table,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            ProfileInput {
                supabase_url,
                supabase_anon_key,
                storage_bucket,
                storage_folder,
                projects_table,
            },
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    input: ProfileInput,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing = config.profile(&profile_name).cloned().unwrap_or_default();
    let merged = merge_profile(&existing, input, |key| env::var(key).ok());
    validate_profile(&merged)?;

    *config.profile_mut_or_default(&profile_name) = merged;
    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save()?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config
        .profiles
        .get(&profile_name)
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    let missing_fields = missing_fields(profile);
    if missing_fields.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `folio auth login --email <email> --password <password>`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

fn run_config_show(global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(global_profile);
    let path = default_config_path()?;
    println!("config:  {}", path.display());
    println!("profile: {profile_name}");

    let Some(profile) = config.profile(&profile_name) else {
        println!("Profile '{profile_name}' is not configured.");
        return Ok(());
    };
    match profile.backend_config()? {
        Some(backend) => {
            println!("supabase_url:   {}", backend.supabase_url);
            println!("storage_bucket: {}", backend.storage_bucket);
            println!("storage_folder: {}", backend.storage_folder);
            println!("projects_table: {}", backend.projects_table);
        }
        None => println!("Profile '{profile_name}' has no Supabase settings."),
    }
    Ok(())
}

/// Explicit values win, then environment variables, then the existing profile.
pub fn merge_profile(
    existing: &CliProfile,
    input: ProfileInput,
    env: impl Fn(&str) -> Option<String>,
) -> CliProfile {
    let pick = |explicit: Option<String>, key: &str, current: Option<&str>| {
        normalize_text_option(explicit)
            .or_else(|| normalize_text_option(env(key)))
            .or_else(|| normalize_text_option(current.map(str::to_string)))
    };

    CliProfile {
        supabase_url: pick(
            input.supabase_url,
            "SUPABASE_URL",
            existing.supabase_url.as_deref(),
        ),
        supabase_anon_key: pick(
            input.supabase_anon_key,
            "SUPABASE_ANON_KEY",
            existing.supabase_anon_key.as_deref(),
        ),
        storage_bucket: pick(
            input.storage_bucket,
            "FOLIO_STORAGE_BUCKET",
            existing.storage_bucket.as_deref(),
        ),
        storage_folder: pick(
            input.storage_folder,
            "FOLIO_STORAGE_FOLDER",
            existing.storage_folder.as_deref(),
        ),
        projects_table: pick(
            input.projects_table,
            "FOLIO_PROJECTS_TABLE",
            existing.projects_table.as_deref(),
        ),
    }
}

pub fn validate_profile(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}

fn missing_fields(profile: &CliProfile) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if profile.supabase_url().is_none() {
        missing.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing.push("supabase_anon_key");
    }
    missing
}
