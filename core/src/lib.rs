// src/lib.rs

//! localci: a local continuous-integration runner.
//!
//! localci runs a fixed, ordered list of external commands against a project
//! directory (build, test, format check, publish), stops at the first failure
//! and writes one success line per finished step.
//!
//! - Three step variants behind one [`Execute`] contract: [`StrictStep`],
//!   [`FaultTolerantStep`] and [`TimeBoundedStep`].
//! - A sequential [`Pipeline`] runner that writes to any `std::io::Write` sink.
//! - A [`Supervisor`] that races the pipeline against SIGINT/SIGTERM and kills
//!   the in-flight command when a signal wins.
//! - A structured error model ([`CiError`], [`StepError`]) matched by step name.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod steps;
pub mod supervisor;

// --- Re-exports for the Public API ---

pub use crate::core::control::{RunOutcome, Signal};
pub use crate::core::process::{ensure_supported_os, CommandSpec, Launcher, ProcessOutput, SystemLauncher};
pub use crate::core::step::{Execute, StepDef};

pub use crate::pipeline::definition::{validate_project_dir, Pipeline};
pub use crate::pipeline::presets::{go_pipeline, PresetOptions};

pub use crate::steps::{FaultTolerantStep, StrictStep, TimeBoundedStep, DEFAULT_TIMEOUT};

pub use crate::supervisor::{SignalListener, Supervisor};

pub use crate::error::{error_is, is_deadline_exceeded, CiError, CiResult, StepCause, StepError};

/*
    Typical use:
    1. Call `ensure_supported_os()`.
    2. Build a `Pipeline`, either by hand with `Pipeline::new().with_step(..)` or
       with a preset such as `go_pipeline(project, &options, launcher)`.
    3. Wrap it in a `Supervisor` and `run(&mut out).await` it.
    4. Map the result with `RunOutcome::of(&result)` for reporting.
*/
