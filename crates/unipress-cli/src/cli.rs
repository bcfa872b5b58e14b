//! Clap derive structures for the `unipress` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This
//! module must only depend on `clap` + `clap_complete` so `build.rs` can
//! include it for man-page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unipress -- press-button actions for UniFi consoles
#[derive(Debug, Parser)]
#[command(
    name = "unipress",
    version,
    about = "Press UniFi console actions from the command line",
    long_about = "Enumerate and press the actions a UniFi console exposes:\n\
        device restarts, PoE port power cycles, Protect chime rings, and\n\
        PTZ patrol start/stop.\n\n\
        Talks to the official Network and Protect Integration APIs.",
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
    /// Console profile to use
    #[arg(long, short = 'p', env = "UNIPRESS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Console URL (overrides profile)
    #[arg(long, short = 'c', env = "UNIPRESS_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Integration API key
    #[arg(long, env = "UNIPRESS_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "UNIPRESS_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "UNIPRESS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30, or the profile's value]
    #[arg(long, env = "UNIPRESS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Probe the Protect application (default)
    #[arg(long, global = true, overrides_with = "no_protect")]
    pub protect: bool,

    /// Skip the Protect application probe
    #[arg(long, global = true, overrides_with = "protect")]
    pub no_protect: bool,
}

impl GlobalOpts {
    /// Tri-state Protect override: `--protect` forces the probe on,
    /// `--no-protect` forces it off, neither defers to the profile.
    pub fn protect_override(&self) -> Option<bool> {
        if self.protect {
            Some(true)
        } else if self.no_protect {
            Some(false)
        } else {
            None
        }
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one unique id per line (scripting)
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
    /// Show console application versions
    Info,

    /// List pressable targets on the console
    #[command(alias = "ls")]
    Targets(TargetsArgs),

    /// Press a target by its unique id
    #[command(alias = "p")]
    Press {
        /// Unique id, as listed by `targets` (e.g. `site-1_abc_device_restart`)
        unique_id: String,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TARGETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TargetsArgs {
    /// Only targets within this site id
    #[arg(long, short = 's')]
    pub site: Option<String>,

    /// Only targets that are currently available
    #[arg(long, short = 'a')]
    pub available: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Config key (e.g., "controller", "insecure", "protect")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
