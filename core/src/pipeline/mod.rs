// localci/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction, and its sequential execution.

pub mod definition;
pub mod execution;
pub mod presets;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
pub use presets::{go_pipeline, PresetOptions};
