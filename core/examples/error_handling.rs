// localci/examples/error_handling.rs

use anyhow::Context;
use localci::{error_is, is_deadline_exceeded, CiError, Pipeline, StepDef, StrictStep, SystemLauncher, TimeBoundedStep};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: a step exits non-zero
  info!("\nScenario 1: failing step");
  let pipeline = Pipeline::new()
    .with_step(StrictStep::new(
      StepDef::new("prepare", "true", "Prepare: SUCCESS", ".", Vec::<String>::new()),
      Arc::new(SystemLauncher),
    ))
    .with_step(StrictStep::new(
      StepDef::new("compile", "sh", "Compile: SUCCESS", ".", ["-c", "echo 'no main package' >&2; exit 1"]),
      Arc::new(SystemLauncher),
    ));
  report(run(pipeline).await);

  // Scenario 2: a step runs past its deadline
  info!("\nScenario 2: deadline");
  let pipeline = Pipeline::new().with_step(TimeBoundedStep::new(
    StepDef::new("publish", "sleep", "Publish: SUCCESS", ".", ["10"]),
    Some(Duration::from_millis(500)),
    Arc::new(SystemLauncher),
  ));
  report(run(pipeline).await);
}

async fn run(pipeline: Pipeline) -> anyhow::Result<()> {
  let mut out = std::io::stdout();
  pipeline.run(&mut out).await.context("example pipeline failed")
}

fn report(result: anyhow::Result<()>) {
  let Err(err) = result else {
    info!("Pipeline succeeded");
    return;
  };
  if is_deadline_exceeded(err.as_ref()) {
    warn!(error = %format!("{:#}", err), "A step timed out");
  } else if error_is(err.as_ref(), &CiError::step_failed("compile")) {
    warn!(error = %format!("{:#}", err), "The compile step failed");
  } else {
    warn!(error = %format!("{:#}", err), "Unexpected failure");
  }
}
