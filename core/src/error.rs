// localci/src/error.rs

//! Error model for pipeline runs.
//!
//! A failing step produces a [`StepError`] carrying the step's name, a human
//! readable message (usually with the captured stderr) and an optional
//! [`StepCause`]. Everything the runner or the supervisor can return is a
//! [`CiError`].
//!
//! Matching is by identity rather than by text: two step errors are "the same"
//! when they name the same step, whatever their message or cause. Use
//! [`CiError::is`] on a bare value, or [`error_is`] to search through a chain
//! of wrappers (e.g. `anyhow` context).

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::core::control::Signal;

#[derive(Debug, Error)]
pub enum CiError {
  /// Bad input, e.g. a missing project directory. Raised before any process starts.
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("This OS is not supported: {0}")]
  UnsupportedOs(String),

  #[error("{0}")]
  Step(#[from] StepError),

  /// The run was aborted by an external termination signal.
  #[error("{signal}: Exiting: Received a signal")]
  Signal { signal: Signal },

  /// Writing a success line to the output sink failed.
  #[error("Failed to write step output: {0}")]
  Sink(#[source] std::io::Error),

  #[error("Failed to register signal handlers: {0}")]
  SignalSetup(#[source] std::io::Error),
}

impl CiError {
  /// The "Is" relation.
  ///
  /// Step errors match when their step names are equal; every other variant
  /// matches any value of the same variant (payloads are ignored, so
  /// `CiError::Validation(String::new())` works as a sentinel).
  pub fn is(&self, target: &CiError) -> bool {
    match (self, target) {
      (CiError::Step(a), CiError::Step(b)) => a == b,
      (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
    }
  }

  /// Name of the failing step, if this is a step failure.
  pub fn step_name(&self) -> Option<&str> {
    match self {
      CiError::Step(e) => Some(e.step()),
      _ => None,
    }
  }

  /// Sentinel for [`CiError::Validation`], for use with [`error_is`].
  pub fn validation() -> Self {
    CiError::Validation(String::new())
  }

  /// Sentinel for [`CiError::Signal`], for use with [`error_is`].
  pub fn interrupted() -> Self {
    CiError::Signal {
      signal: Signal::Interrupt,
    }
  }

  /// Sentinel matching any failure of the step called `step`.
  pub fn step_failed(step: impl Into<String>) -> Self {
    CiError::Step(StepError::new(step, "", None))
  }
}

/// Failure of a single named step. Immutable once built.
#[derive(Debug)]
pub struct StepError {
  step: String,
  message: String,
  cause: Option<StepCause>,
}

impl StepError {
  pub fn new(step: impl Into<String>, message: impl Into<String>, cause: Option<StepCause>) -> Self {
    Self {
      step: step.into(),
      message: message.into(),
      cause,
    }
  }

  pub fn step(&self) -> &str {
    &self.step
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  /// The nested cause, if any.
  pub fn cause(&self) -> Option<&StepCause> {
    self.cause.as_ref()
  }

  pub fn is_deadline_exceeded(&self) -> bool {
    matches!(self.cause, Some(StepCause::DeadlineExceeded))
  }
}

impl fmt::Display for StepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Step: {:?}: {}", self.step, self.message)?;
    match &self.cause {
      Some(cause) => write!(f, ": Cause: {}", cause),
      None => Ok(()),
    }
  }
}

impl StdError for StepError {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    self.cause.as_ref().map(|c| c as &(dyn StdError + 'static))
  }
}

// Identity is the step name only.
impl PartialEq for StepError {
  fn eq(&self, other: &Self) -> bool {
    self.step == other.step
  }
}

impl Eq for StepError {}

/// Why a step failed.
#[derive(Debug, Error)]
pub enum StepCause {
  /// The step ran past its deadline and was killed.
  #[error("context deadline exceeded")]
  DeadlineExceeded,

  /// The command could not be started (executable not found, bad directory, ...).
  #[error("{0}")]
  Spawn(#[source] std::io::Error),

  #[error("{}", describe_exit(.code))]
  Exit { code: Option<i32> },

  /// A fault-tolerant check exited cleanly but reported findings.
  #[error("check reported findings")]
  Findings { report: String },
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit status {}", code),
    None => "terminated by signal".to_string(),
  }
}

pub type CiResult<T, E = CiError> = std::result::Result<T, E>;

/// Walks `err` and its `source()` chain, returning true if any level is a
/// [`CiError`] or [`StepError`] that matches `target` under [`CiError::is`].
pub fn error_is(err: &(dyn StdError + 'static), target: &CiError) -> bool {
  let mut current = Some(err);
  while let Some(e) = current {
    if let Some(ci) = e.downcast_ref::<CiError>() {
      if ci.is(target) {
        return true;
      }
    } else if let (Some(step_err), CiError::Step(wanted)) = (e.downcast_ref::<StepError>(), target) {
      if step_err == wanted {
        return true;
      }
    }
    current = e.source();
  }
  false
}

/// Walks the chain looking for the deadline sentinel.
pub fn is_deadline_exceeded(err: &(dyn StdError + 'static)) -> bool {
  let mut current = Some(err);
  while let Some(e) = current {
    if matches!(e.downcast_ref::<StepCause>(), Some(StepCause::DeadlineExceeded)) {
      return true;
    }
    current = e.source();
  }
  false
}
