// localci/src/pipeline/presets.rs

//! Ready-made pipelines.

use std::sync::Arc;
use std::time::Duration;

use super::definition::{validate_project_dir, Pipeline};
use crate::core::{Launcher, StepDef};
use crate::error::CiResult;
use crate::steps::{FaultTolerantStep, StrictStep, TimeBoundedStep};

/// Knobs for [`go_pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetOptions {
  /// Deadline for `git push`. `None` or zero uses the step default.
  pub push_timeout: Option<Duration>,
  pub remote: String,
  pub branch: String,
}

impl Default for PresetOptions {
  fn default() -> Self {
    Self {
      push_timeout: Some(Duration::from_secs(10)),
      remote: "origin".to_string(),
      branch: "master".to_string(),
    }
  }
}

/// Build, test, format-check and publish a Go project:
///
/// 1. `go build . errors`
/// 2. `go test -v`
/// 3. `gofmt -l .` (fault-tolerant: any listed file fails the step)
/// 4. `git push <remote> <branch>` (time-bounded)
///
/// Fails with a validation error if `project` is empty.
pub fn go_pipeline(project: &str, options: &PresetOptions, launcher: Arc<dyn Launcher>) -> CiResult<Pipeline> {
  validate_project_dir(project)?;

  let pipeline = Pipeline::new()
    .with_step(StrictStep::new(
      StepDef::new("go build", "go", "Go Build: SUCCESS", project, ["build", ".", "errors"]),
      launcher.clone(),
    ))
    .with_step(StrictStep::new(
      StepDef::new("go test", "go", "Go Test: SUCCESS", project, ["test", "-v"]),
      launcher.clone(),
    ))
    .with_step(FaultTolerantStep::new(
      StepDef::new("go fmt", "gofmt", "Gofmt: SUCCESS", project, ["-l", "."]),
      launcher.clone(),
    ))
    .with_step(TimeBoundedStep::new(
      StepDef::new(
        "git push",
        "git",
        "Git Push: SUCCESS",
        project,
        ["push", options.remote.as_str(), options.branch.as_str()],
      ),
      options.push_timeout,
      launcher,
    ));

  Ok(pipeline)
}
