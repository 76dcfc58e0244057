//! SharePoint Agent CLI
//!
//! Asks an Azure AI Foundry agent grounded on a SharePoint connection about
//! the documents in that site.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use spf_core::Config;

use crate::cli::Cli;
use crate::logging::LogConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    };

    // Logging depends on the config, so it starts after the config is read
    match &config {
        Ok(config) => logging::init(&LogConfig::from_config(config, cli.debug)),
        Err(_) => logging::init(&LogConfig::fallback(cli.debug)),
    }

    let result = match config {
        Ok(config) => {
            info!(
                "Using project {} with SharePoint connection '{}'",
                config.project_endpoint, config.sharepoint_resource_name
            );
            commands::dispatch(cli.command.unwrap_or_default(), &config).await
        }
        Err(e) => Err(e.into()),
    };

    exit_code(result)
}

/// Report a fatal error and turn the outcome into the process exit code
fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
