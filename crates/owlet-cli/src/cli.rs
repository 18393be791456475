//! Clap derive structures for the `owlet` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// owlet -- read and control Owlet baby monitors from the command line
#[derive(Debug, Parser)]
#[command(
    name = "owlet",
    version,
    about = "Read and control Owlet baby monitors from the command line",
    long_about = "A CLI for the Owlet baby monitor cloud.\n\n\
        Logs in with your Owlet account, lists registered devices, shows\n\
        live sock readings, and toggles the base station.",
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
    /// Owlet account email
    #[arg(long, short = 'e', env = "OWLET_EMAIL", global = true)]
    pub email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OWLET_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "OWLET_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,

    /// Identity endpoint base URL (for testing against a mock cloud)
    #[arg(long, env = "OWLET_USER_URL", hide = true, global = true)]
    pub user_url: Option<String>,

    /// Device-data endpoint base URL (for testing against a mock cloud)
    #[arg(long, env = "OWLET_ADS_URL", hide = true, global = true)]
    pub ads_url: Option<String>,
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
    /// List devices registered to the account
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// Show the current sock readings for a device
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Turn the base station on or off
    #[command(name = "base-station", alias = "bs")]
    BaseStation(BaseStationArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Device serial number (DSN), as shown by `owlet devices`
    pub dsn: String,
}

#[derive(Debug, Args)]
pub struct BaseStationArgs {
    /// Device serial number (DSN)
    pub dsn: String,

    /// Desired power state
    #[arg(value_enum)]
    pub state: PowerState,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively create the config file and store credentials
    Init,
    /// Print the effective configuration (password redacted)
    Show,
    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
