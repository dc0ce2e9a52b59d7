// localci-cli/src/config.rs

use crate::errors::{AppError, Result};
use clap::Parser;
use localci::{validate_project_dir, PresetOptions};
use std::path::PathBuf;
use std::time::Duration;

/// Build, test, format-check and push a Go project, stopping at the first failure.
#[derive(Debug, Clone, Parser)]
#[command(name = "localci", version, about)]
pub struct Args {
  /// Project directory
  #[arg(short = 'p', long = "project", env = "LOCALCI_PROJECT", default_value = "")]
  pub project: String,

  /// Deadline for `git push`, in seconds (0 uses the 30s step default)
  #[arg(long, env = "LOCALCI_PUSH_TIMEOUT", default_value_t = 10)]
  pub push_timeout: u64,

  /// Remote to push to
  #[arg(long, env = "LOCALCI_REMOTE", default_value = "origin")]
  pub remote: String,

  /// Branch to push
  #[arg(long, env = "LOCALCI_BRANCH", default_value = "master")]
  pub branch: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub project_dir: PathBuf,
  pub push_timeout: Duration,
  pub remote: String,
  pub branch: String,
}

impl AppConfig {
  /// Loads `.env` (if present), then parses flags with environment fallbacks.
  pub fn load() -> Result<Self> {
    dotenvy::dotenv().ok(); // Load .env file if present
    Self::from_args(Args::parse())
  }

  pub fn from_args(args: Args) -> Result<Self> {
    validate_project_dir(&args.project)?;

    let project_dir = PathBuf::from(&args.project);
    if !project_dir.is_dir() {
      return Err(AppError::from(localci::CiError::Validation(format!(
        "Project directory '{}' does not exist",
        project_dir.display()
      ))));
    }
    if args.remote.trim().is_empty() || args.branch.trim().is_empty() {
      return Err(AppError::Config("Remote and branch must not be empty".to_string()));
    }

    tracing::debug!(project = %project_dir.display(), push_timeout_secs = args.push_timeout, "Configuration loaded.");

    Ok(Self {
      project_dir,
      push_timeout: Duration::from_secs(args.push_timeout),
      remote: args.remote,
      branch: args.branch,
    })
  }

  pub fn project(&self) -> Result<&str> {
    self
      .project_dir
      .to_str()
      .ok_or_else(|| AppError::Config(format!("Project path is not valid UTF-8: {}", self.project_dir.display())))
  }

  pub fn preset_options(&self) -> PresetOptions {
    PresetOptions {
      push_timeout: Some(self.push_timeout),
      remote: self.remote.clone(),
      branch: self.branch.clone(),
    }
  }
}
