pub mod control;
pub mod process;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use control::{RunOutcome, Signal};
pub use process::{ensure_supported_os, CommandSpec, Launcher, ProcessOutput, SystemLauncher};
pub use step::{Execute, StepDef};
