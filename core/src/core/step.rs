// localci/src/core/step.rs

//! Defines the step descriptor and the execution contract shared by every step variant.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::process::CommandSpec;
use crate::error::StepError;

/// Description of one external command run as a pipeline step.
///
/// `name` is the identity used for error matching; `message` is the line
/// written to the sink when the step succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub program: String,
  pub args: Vec<String>,
  pub dir: PathBuf,
  pub message: String,
}

impl StepDef {
  pub fn new<I, S>(
    name: impl Into<String>,
    program: impl Into<String>,
    message: impl Into<String>,
    dir: impl AsRef<Path>,
    args: I,
  ) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: name.into(),
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
      dir: dir.as_ref().to_path_buf(),
      message: message.into(),
    }
  }

  /// The command this step runs. Standard output is not captured.
  pub fn command(&self) -> CommandSpec {
    CommandSpec {
      program: self.program.clone(),
      args: self.args.clone(),
      dir: self.dir.clone(),
      capture_stdout: false,
    }
  }
}

/// The execution contract every step satisfies.
///
/// Returns the success message, or a [`StepError`] naming this step.
#[async_trait]
pub trait Execute: Send + Sync {
  fn name(&self) -> &str;

  async fn execute(&self) -> Result<String, StepError>;
}
