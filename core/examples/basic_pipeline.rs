// localci/examples/basic_pipeline.rs
//
// Runs three shell steps in the current directory under the signal supervisor.
// Try pressing Ctrl-C while the last step sleeps.

use localci::{
  FaultTolerantStep, Pipeline, RunOutcome, StepDef, StrictStep, Supervisor, SystemLauncher, TimeBoundedStep,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  let launcher = Arc::new(SystemLauncher);

  let pipeline = Pipeline::new()
    .with_step(StrictStep::new(
      StepDef::new("list", "ls", "List: SUCCESS", ".", ["-la"]),
      launcher.clone(),
    ))
    .with_step(FaultTolerantStep::new(
      StepDef::new("lint", "sh", "Lint: SUCCESS", ".", ["-c", "true"]),
      launcher.clone(),
    ))
    .with_step(TimeBoundedStep::new(
      StepDef::new("wait", "sleep", "Wait: SUCCESS", ".", ["3"]),
      Some(Duration::from_secs(5)),
      launcher,
    ));

  info!(steps = ?pipeline.step_names(), "Running pipeline");
  let supervisor = Supervisor::new(pipeline);
  let mut stdout = std::io::stdout();
  let result = supervisor.run(&mut stdout).await;

  match RunOutcome::of(&result) {
    RunOutcome::Completed => info!("All steps succeeded"),
    outcome => error!(?outcome, error = %result.unwrap_err(), "Pipeline did not complete"),
  }
}

