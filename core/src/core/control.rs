// localci/src/core/control.rs

//! Defines the outcome of a supervised run and the signals that can end one.

use std::fmt;

use crate::error::{CiError, CiResult};

/// External termination signal that can interrupt a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
  /// SIGINT (Ctrl-C).
  Interrupt,
  /// SIGTERM.
  Terminate,
}

impl fmt::Display for Signal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Signal::Interrupt => f.write_str("interrupt"),
      Signal::Terminate => f.write_str("terminated"),
    }
  }
}

/// Terminal state of a supervised run. Exactly one applies to any result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
  /// Every step succeeded.
  Completed,
  /// A step (or the output sink) failed; nothing after it ran.
  StepFailed,
  /// An external signal arrived first.
  Interrupted,
}

impl RunOutcome {
  /// Classifies the result returned by the supervisor.
  ///
  /// Validation and setup errors are reported as `StepFailed`: the run ended
  /// on an error that was not a signal.
  pub fn of(result: &CiResult<()>) -> Self {
    match result {
      Ok(()) => RunOutcome::Completed,
      Err(CiError::Signal { .. }) => RunOutcome::Interrupted,
      Err(_) => RunOutcome::StepFailed,
    }
  }
}
