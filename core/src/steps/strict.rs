// localci/src/steps/strict.rs

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{event, Level};

use super::exit_code_outcome;
use crate::core::{Execute, Launcher, StepDef};
use crate::error::StepError;

/// Runs a command and fails on any non-zero exit. No deadline of its own.
pub struct StrictStep {
  def: StepDef,
  launcher: Arc<dyn Launcher>,
}

impl StrictStep {
  pub fn new(def: StepDef, launcher: Arc<dyn Launcher>) -> Self {
    Self { def, launcher }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }
}

#[async_trait]
impl Execute for StrictStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> Result<String, StepError> {
    event!(Level::DEBUG, program = %self.def.program, "Executing strict step.");
    let launched = self.launcher.launch(&self.def.command()).await;
    exit_code_outcome(&self.def, launched)
  }
}

impl std::fmt::Debug for StrictStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StrictStep").field("def", &self.def).finish()
  }
}
