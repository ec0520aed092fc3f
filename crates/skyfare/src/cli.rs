//! Clap derive structures for the `skyfare` CLI.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it for
//! man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// skyfare -- search flights and airports from the command line
#[derive(Debug, Parser)]
#[command(
    name = "skyfare",
    version,
    about = "Search flights and airports from the command line",
    long_about = "Look up airport suggestions from the location service and run\n\
        flight searches with the same rules as the skyfare terminal app.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c', env = "SKYFARE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Location service base URL (overrides config)
    #[arg(long, short = 'u', env = "SKYFARE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "SKYFARE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SKYFARE_OUTPUT",
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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up airport and city suggestions
    #[command(alias = "loc", alias = "l")]
    Locations(LocationsArgs),

    /// Search for flight offers
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Origin,
    Destination,
}

#[derive(Debug, Args)]
pub struct LocationsArgs {
    /// City or airport name (at least 3 characters by default)
    pub keyword: String,

    /// Which form field the lookup is for
    #[arg(long, short = 'f', default_value = "origin")]
    pub field: FieldArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TripArg {
    RoundTrip,
    OneWay,
    MultiCity,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CabinArg {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Origin IATA code
    #[arg(long)]
    pub from: Option<String>,

    /// Destination IATA code
    #[arg(long)]
    pub to: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub depart: Option<String>,

    /// Return date (YYYY-MM-DD, round trips only)
    #[arg(long = "return")]
    pub return_date: Option<String>,

    /// Trip type
    #[arg(long, default_value = "round-trip")]
    pub trip: TripArg,

    /// Number of adult passengers
    #[arg(long, default_value = "1")]
    pub adults: u32,

    /// Cabin class (falls back to search.default_cabin)
    #[arg(long)]
    pub class: Option<CabinArg>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Interactive setup wizard
    Init,

    /// Store the API key in the system keyring
    SetKey,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
