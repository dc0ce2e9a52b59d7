// localci/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and methods for its construction.

use crate::core::step::Execute;
use crate::error::{CiError, CiResult};

/// An ordered, fixed sequence of steps.
///
/// The pipeline only sees the [`Execute`] contract; it never inspects which
/// variant a step is. Steps are not mutated once added.
#[derive(Default)]
pub struct Pipeline {
  pub(crate) steps: Vec<Box<dyn Execute>>,
}

impl Pipeline {
  /// Creates an empty pipeline.
  pub fn new() -> Self {
    Self { steps: Vec::new() }
  }

  /// Appends a step, builder style.
  pub fn with_step<S: Execute + 'static>(mut self, step: S) -> Self {
    self.push_step(step);
    self
  }

  pub fn push_step<S: Execute + 'static>(&mut self, step: S) {
    self.steps.push(Box::new(step));
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline").field("steps", &self.step_names()).finish()
  }
}

/// Fails with [`CiError::Validation`] when no project directory was given.
pub fn validate_project_dir(project: &str) -> CiResult<()> {
  if project.trim().is_empty() {
    return Err(CiError::Validation("The project directory is required".to_string()));
  }
  Ok(())
}
