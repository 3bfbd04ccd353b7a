use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Rates => fxconv::AppCommand::Rates,
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => fxconv::AppCommand::Convert {
                amount,
                from,
                to,
                swap,
            },
            Commands::History => fxconv::AppCommand::History,
            Commands::Clear => fxconv::AppCommand::Clear,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the latest exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code (defaults to `default_from` in the config)
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code (defaults to `default_to` in the config)
        #[arg(short, long)]
        to: Option<String>,
        /// Swap source and target currencies
        #[arg(short, long)]
        swap: bool,
    },
    /// Show past conversions
    History,
    /// Delete all past conversions
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
