// localci/src/steps/mod.rs

//! The step variants: strict, fault-tolerant and time-bounded.
//!
//! All three implement [`Execute`](crate::core::Execute) and differ only in how
//! they turn a raw process outcome into a success message or a [`StepError`].

pub mod fault_tolerant;
pub mod strict;
pub mod time_bounded;

pub use fault_tolerant::FaultTolerantStep;
pub use strict::StrictStep;
pub use time_bounded::{TimeBoundedStep, DEFAULT_TIMEOUT};

use crate::core::{ProcessOutput, StepDef};
use crate::error::{StepCause, StepError};

/// Maps a launch result the strict way: only the exit code decides.
pub(crate) fn exit_code_outcome(def: &StepDef, launched: std::io::Result<ProcessOutput>) -> Result<String, StepError> {
  match launched {
    Ok(output) if output.success() => Ok(def.message.clone()),
    Ok(output) => Err(execution_failure(def, &output.stderr, StepCause::Exit { code: output.code })),
    Err(e) => Err(execution_failure(def, "", StepCause::Spawn(e))),
  }
}

pub(crate) fn execution_failure(def: &StepDef, stderr: &str, cause: StepCause) -> StepError {
  StepError::new(def.name.as_str(), format!("failed to execute: {}", stderr), Some(cause))
}
