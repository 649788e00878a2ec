pub mod api_key;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod model_gateway;
pub mod providers;
pub mod repl;
pub mod request;
pub mod session;
pub mod transcript;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

use cli::Cli;
use config::{Config, RunMode};
use model_gateway::OpenAiGateway;
use repl::{TerminalInput, run_repl};
use session::Session;

/// Parses arguments, validates configuration and runs one session.
/// Help and argument errors exit directly through clap.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = match Config::from_cli(cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "invalid startup configuration");
            eprintln!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(
        model = %cfg.model,
        api_base_url = %cfg.api_base_url,
        max_history = cfg.max_history,
        transcript = cfg.log_path.is_some(),
        "loaded runtime configuration"
    );

    let client = build_client(&cfg)?;
    let mut session = Session::new(&cfg, OpenAiGateway::new(&client, &cfg));

    match &cfg.mode {
        RunMode::OneShot(prompt) => match session.run_turn(prompt).await {
            Ok(reply) => {
                println!("{}", reply.trim());
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                error!(error = %err, "one-shot request failed");
                eprintln!("Error: {err}");
                Ok(ExitCode::FAILURE)
            }
        },
        RunMode::Interactive => {
            let mut input = TerminalInput::new()?;
            run_repl(&mut session, &mut input).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_client(cfg: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = cfg.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to initialize HTTP client")
}
