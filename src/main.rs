use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use convertor::core::log::init_logging;

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

impl From<Commands> for convertor::AppCommand {
    fn from(cmd: Commands) -> convertor::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                json,
            } => convertor::AppCommand::Convert {
                amount,
                from,
                to,
                json,
            },
            Commands::Interactive => convertor::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert, comma or dot as decimal separator
        amount: String,
        /// Currency to convert from (defaults to the configured one)
        from: Option<String>,
        /// Currency to convert to (defaults to the configured one)
        to: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive converter session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => convertor::cli::setup::setup(),
        Some(cmd) => convertor::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
