pub mod commands;
pub mod demo;
pub mod view;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ordina_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "ordina",
    about = "Ordina operator CLI",
    long_about = "Operate Ordina menu rendering, scripted ordering sessions, readiness checks, and config inspection.",
    after_help = "Examples:\n  ordina menu --demo\n  ordina order --script order.toml --demo\n  ordina check --json\n  ordina config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render the configured menu with current amounts and prices")]
    Menu {
        #[arg(long, help = "Use the built-in demo catalog instead of the configured file")]
        demo: bool,
    },
    #[command(about = "Replay a scripted ordering session and report per-step results")]
    Order {
        #[arg(long, help = "TOML script with the ordering steps to replay")]
        script: PathBuf,
        #[arg(long, help = "Use the built-in demo catalog instead of the configured file")]
        demo: bool,
        #[arg(long, help = "Emit only the machine-readable JSON report")]
        json: bool,
    },
    #[command(about = "Validate config and catalog readiness and return structured status output")]
    Check {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Menu { demo } => commands::menu::run(commands::menu::MenuOptions { demo }),
        Command::Order { script, demo, json } => {
            commands::order::run(commands::order::OrderOptions { script, demo, json })
        }
        Command::Check { json } => {
            commands::CommandResult { exit_code: 0, output: commands::check::run(json) }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Reports go to stdout; diagnostics go to stderr so the machine-readable
/// output stays parseable.
fn init_logging() {
    use ordina_core::config::LogFormat::*;
    use tracing::Level;

    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}
