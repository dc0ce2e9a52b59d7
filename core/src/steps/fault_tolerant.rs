// localci/src/steps/fault_tolerant.rs

//! Steps for checks that report findings instead of crashing.
//!
//! Tools like `gofmt -l` exit 0 whether or not they found anything and print
//! the offending files on stdout. For these steps:
//!
//! - spawn error or non-zero exit: execution failure (`"failed to execute: "` + stderr),
//! - zero exit with a non-empty stdout report: failure with a
//!   [`StepCause::Findings`] cause listing the report,
//! - zero exit and nothing reported: success.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{event, Level};

use super::execution_failure;
use crate::core::{Execute, Launcher, StepDef};
use crate::error::{StepCause, StepError};

pub struct FaultTolerantStep {
  def: StepDef,
  launcher: Arc<dyn Launcher>,
}

impl FaultTolerantStep {
  pub fn new(def: StepDef, launcher: Arc<dyn Launcher>) -> Self {
    Self { def, launcher }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }
}

#[async_trait]
impl Execute for FaultTolerantStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> Result<String, StepError> {
    let mut command = self.def.command();
    command.capture_stdout = true;
    event!(Level::DEBUG, program = %self.def.program, "Executing fault-tolerant step.");

    let output = match self.launcher.launch(&command).await {
      Ok(output) => output,
      Err(e) => return Err(execution_failure(&self.def, "", StepCause::Spawn(e))),
    };
    if !output.success() {
      return Err(execution_failure(&self.def, &output.stderr, StepCause::Exit { code: output.code }));
    }

    let report = output.stdout.trim();
    if !report.is_empty() {
      let findings: Vec<&str> = report.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
      event!(Level::WARN, findings = findings.len(), "Check reported findings.");
      return Err(StepError::new(
        self.def.name.as_str(),
        format!("found unformatted files: {}", findings.join(", ")),
        Some(StepCause::Findings {
          report: report.to_string(),
        }),
      ));
    }

    Ok(self.def.message.clone())
  }
}

impl std::fmt::Debug for FaultTolerantStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FaultTolerantStep").field("def", &self.def).finish()
  }
}
