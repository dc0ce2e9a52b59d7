// localci/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, which executes the steps in order and
//! writes each success message to a sink.

use std::io::Write;

use tracing::{event, instrument, Instrument, Level};

use crate::error::{CiError, CiResult};
use crate::pipeline::definition::Pipeline;

impl Pipeline {
  /// Executes every step in order, writing `message\n` to `out` after each success.
  ///
  /// Stops at the first failing step and returns its error unchanged; nothing
  /// is written for the failing step or any step after it. A failed write to
  /// `out` ends the run with [`CiError::Sink`].
  #[instrument(name = "Pipeline::run", skip_all, fields(num_steps = self.steps.len()), err(Display))]
  pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> CiResult<()> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_span = tracing::span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step.name(),
        step_index = step_idx
      );

      let message = match step.execute().instrument(step_span.clone()).await {
        Ok(message) => message,
        Err(e) => {
          step_span.in_scope(|| event!(Level::ERROR, error = %e, "Step failed."));
          return Err(CiError::Step(e));
        }
      };

      writeln!(out, "{}", message).map_err(CiError::Sink)?;
      step_span.in_scope(|| event!(Level::INFO, "Step finished successfully."));
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(())
  }
}
