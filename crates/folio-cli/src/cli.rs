use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Manage portfolio projects from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name holding the Supabase configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List, inspect and edit portfolio projects
    #[command(alias = "p")]
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Upload images to storage, optionally attaching them to a project
    Upload {
        /// Image files to upload
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
        /// Attach the uploads to this project
        #[arg(long, value_name = "ID")]
        project: Option<String>,
        /// Append to the project's gallery instead of replacing its main image
        #[arg(long)]
        gallery: bool,
    },
    /// Interactive command prompt from the contact section
    Terminal,
    /// Print a completion script for your shell
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign the profile in or out of the admin account
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects, featured first
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one project
    Show {
        /// Project ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a project
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Edit a project; omitted flags keep their current value
    Edit {
        /// Project ID or unique ID prefix
        id: String,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Delete a project
    #[command(alias = "rm")]
    Delete {
        /// Project ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Flip a project's featured flag
    Feature {
        /// Project ID or unique ID prefix
        id: String,
    },
}

/// Project fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Main image URL; pass an empty string to clear it
    #[arg(long, value_name = "URL")]
    pub image: Option<String>,
    /// Gallery image URL, repeatable; replaces the gallery
    #[arg(long = "gallery-image", value_name = "URL")]
    pub gallery: Vec<String>,
    /// Comma separated tags, e.g. "React, TypeScript"
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long, value_name = "URL")]
    pub github: Option<String>,
    #[arg(long, value_name = "URL")]
    pub live: Option<String>,
    /// Feature the project on the landing page
    #[arg(long, conflicts_with = "unfeatured")]
    pub featured: bool,
    #[arg(long)]
    pub unfeatured: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create a profile or update its settings
    Init {
        /// Profile to write (defaults to the active one)
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Storage bucket holding project images
        #[arg(long, value_name = "NAME")]
        storage_bucket: Option<String>,
        /// Folder inside the bucket for new uploads
        #[arg(long, value_name = "PATH")]
        storage_folder: Option<String>,
        /// Table holding project records
        #[arg(long, value_name = "NAME")]
        projects_table: Option<String>,
        /// Do not switch the active profile to this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile config
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in as the site admin and keep the session in the OS keychain
    Login {
        /// Profile to use instead of the active one
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Admin account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Admin account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Report whether the profile holds a live admin session
    Status {
        /// Profile to use instead of the active one
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout {
        /// Profile to use instead of the active one
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
