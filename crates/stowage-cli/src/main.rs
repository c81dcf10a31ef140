mod cli;
mod cmd;
mod table;

use clap::Parser;

use stowage_core::config;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match config::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(command = cli.command.name(), "running");

    let result = match &cli.command {
        Commands::Size { expr, default_unit } => {
            cmd::size::run_size(expr, default_unit.as_deref())
        }
        Commands::Inspect { schedule } => cmd::inspect::run_inspect(&cfg, schedule),
        Commands::Edit {
            schedule,
            set,
            output,
        } => cmd::edit::run_edit(schedule, set, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
