//! Clap derive structures for the `featctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// featctl -- command-line console for a feature-store registry
#[derive(Debug, Parser)]
#[command(
    name = "featctl",
    version,
    about = "Browse and manage feature-store registry entries",
    long_about = "A CLI for a feature-store registry.\n\n\
        Lists, inspects, creates, updates and deletes feature definitions\n\
        through the registry's HTTP API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Registry profile to use
    #[arg(long, short = 'p', env = "FEATCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Registry base URL (overrides profile)
    #[arg(long, short = 'r', env = "FEATCTL_REGISTRY", global = true)]
    pub registry: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FEATCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FEATCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FEATCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

/// Coarse ownership filter for `features list`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    /// Features owned by the current user
    My,
    /// Every feature in the store
    All,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage feature definitions
    #[command(alias = "feat", alias = "f")]
    Features(FeaturesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Features ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FeaturesArgs {
    #[command(subcommand)]
    pub command: FeaturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeaturesCommand {
    /// List features, paginated and searchable
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Rows per page
        #[arg(long, default_value = "10")]
        limit: u32,

        /// Search keyword to filter by
        #[arg(long, short = 's', default_value = "")]
        keyword: String,

        /// Ownership tab to list from
        #[arg(long, value_enum, default_value = "my")]
        tab: TabArg,
    },

    /// Show a single feature
    Get {
        /// Feature id
        id: String,
    },

    /// Create a new feature
    Create {
        /// Feature name (required unless --from-file)
        #[arg(long)]
        name: Option<String>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Lifecycle status
        #[arg(long)]
        status: Option<String>,

        /// Value type of the feature
        #[arg(long)]
        feature_type: Option<String>,

        /// Upstream data source
        #[arg(long)]
        data_source: Option<String>,

        /// Comma-separated owners
        #[arg(long)]
        owners: Option<String>,

        /// Read the feature definition from a JSON file
        #[arg(long, value_name = "FILE", conflicts_with = "name")]
        from_file: Option<PathBuf>,
    },

    /// Update an existing feature
    Update {
        /// Feature id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        feature_type: Option<String>,

        #[arg(long)]
        data_source: Option<String>,

        #[arg(long)]
        owners: Option<String>,

        /// Read replacement fields from a JSON file
        #[arg(long, value_name = "FILE")]
        from_file: Option<PathBuf>,
    },

    /// Delete a feature
    #[command(alias = "rm")]
    Delete {
        /// Feature id
        id: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively create a profile
    Init,

    /// Print the resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
