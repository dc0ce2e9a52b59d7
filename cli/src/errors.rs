// localci-cli/src/errors.rs

use localci::CiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("{source}")]
  Pipeline {
    #[from] // Allows conversion from localci::CiError
    source: CiError,
  },
}

impl AppError {
  /// Process exit status for this error.
  pub fn exit_code(&self) -> u8 {
    match self {
      AppError::Config(_) => 2,
      AppError::Pipeline {
        source: CiError::Validation(_),
      } => 2,
      AppError::Pipeline {
        source: CiError::Signal { .. },
      } => 130,
      _ => 1,
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
