pub mod cli;
pub mod core;
pub mod providers;

use crate::core::ConversionController;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        json: bool,
    },
    Interactive,
}

/// Builds a controller wired to the configured rate provider.
pub fn build_controller(config: &AppConfig) -> Result<ConversionController> {
    let provider = providers::FrankfurterProvider::new(
        config.frankfurter_url(),
        config.request_timeout(),
    )?;
    let form = crate::core::ConversionForm::new("", &config.defaults.from, &config.defaults.to);
    Ok(ConversionController::with_form(Arc::new(provider), form))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency Convertor starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut controller = build_controller(&config)?;

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            json,
        } => {
            cli::convert::run(
                &mut controller,
                &amount,
                from.as_deref(),
                to.as_deref(),
                json,
            )
            .await
        }
        AppCommand::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::interactive::run(&mut controller, stdin, std::io::stdout()).await
        }
    }
}
