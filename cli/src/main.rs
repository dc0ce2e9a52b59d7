// localci-cli/src/main.rs

mod config;
mod errors;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;

use localci::{ensure_supported_os, go_pipeline, RunOutcome, Supervisor, SystemLauncher};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  // Logs go to stderr; stdout carries only the step success lines.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // Allow RUST_LOG override
    .with_writer(std::io::stderr)
    .init();

  match run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!(error = %e, "An error occurred.");
      eprintln!("An error: {}", e);
      ExitCode::from(e.exit_code())
    }
  }
}

async fn run() -> AppResult<()> {
  ensure_supported_os()?;
  let config = AppConfig::load()?;

  let pipeline = go_pipeline(config.project()?, &config.preset_options(), Arc::new(SystemLauncher))?;
  tracing::info!(project = %config.project_dir.display(), steps = ?pipeline.step_names(), "Starting local CI run.");

  let supervisor = Supervisor::new(pipeline);
  let mut stdout = std::io::stdout().lock();
  let result = supervisor.run(&mut stdout).await;

  tracing::info!(outcome = ?RunOutcome::of(&result), "Local CI run finished.");
  result.map_err(Into::into)
}
