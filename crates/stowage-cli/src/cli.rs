use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stowage",
    version,
    about = "Inspect and edit backup schedules through wizard settings",
    after_help = "\
Configuration file lookup order:
  1. --config <path>                (explicit flag)
  2. $STOWAGE_CONFIG                (environment variable)
  3. ./stowage.yaml                 (project)
  4. Platform user config dir + /stowage/config.yaml

Without a configuration file, bare speed limits are read as kb and bare
sizes as mb."
)]
pub(crate) struct Cli {
    /// Path to configuration file (overrides STOWAGE_CONFIG and default search)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert a size expression such as "10gb" to bytes
    Size {
        /// Size expression (number with optional b/kb/mb/gb suffix)
        expr: String,

        /// Unit applied when the expression has none
        #[arg(short = 'u', long = "default-unit")]
        default_unit: Option<String>,
    },

    /// Show the wizard settings a schedule file maps to
    Inspect {
        /// Schedule file (YAML)
        schedule: String,
    },

    /// Change wizard settings and write them back to a schedule file
    Edit {
        /// Schedule file (YAML)
        schedule: String,

        /// Setting to change, as Key=Value (repeatable), e.g. --set MaxFullBackups=4
        #[arg(short, long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,

        /// Write the updated schedule here instead of overwriting the input
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Commands {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Commands::Size { .. } => "size",
            Commands::Inspect { .. } => "inspect",
            Commands::Edit { .. } => "edit",
        }
    }
}
