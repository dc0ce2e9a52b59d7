// localci/src/steps/time_bounded.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{event, Level};

use super::exit_code_outcome;
use crate::core::{Execute, Launcher, StepDef};
use crate::error::{StepCause, StepError};

/// Deadline used when a time-bounded step is built without one (or with zero).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A strict step with a deadline. The command is killed when the deadline
/// passes and the step fails with [`StepCause::DeadlineExceeded`].
pub struct TimeBoundedStep {
  def: StepDef,
  timeout: Duration,
  launcher: Arc<dyn Launcher>,
}

impl TimeBoundedStep {
  /// `None` or a zero duration falls back to [`DEFAULT_TIMEOUT`].
  pub fn new(def: StepDef, timeout: Option<Duration>, launcher: Arc<dyn Launcher>) -> Self {
    let timeout = match timeout {
      Some(t) if !t.is_zero() => t,
      _ => DEFAULT_TIMEOUT,
    };
    Self { def, timeout, launcher }
  }

  pub fn def(&self) -> &StepDef {
    &self.def
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

#[async_trait]
impl Execute for TimeBoundedStep {
  fn name(&self) -> &str {
    &self.def.name
  }

  async fn execute(&self) -> Result<String, StepError> {
    event!(
      Level::DEBUG,
      program = %self.def.program,
      timeout_ms = self.timeout.as_millis() as u64,
      "Executing time-bounded step."
    );
    let command = self.def.command();

    // Dropping the launch future on expiry kills the child.
    match tokio::time::timeout(self.timeout, self.launcher.launch(&command)).await {
      Ok(launched) => exit_code_outcome(&self.def, launched),
      Err(_elapsed) => {
        event!(Level::WARN, timeout_ms = self.timeout.as_millis() as u64, "Step exceeded its deadline.");
        Err(StepError::new(
          self.def.name.as_str(),
          "failed time out",
          Some(StepCause::DeadlineExceeded),
        ))
      }
    }
  }
}

impl std::fmt::Debug for TimeBoundedStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TimeBoundedStep")
      .field("def", &self.def)
      .field("timeout", &self.timeout)
      .finish()
  }
}
