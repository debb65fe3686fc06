//! Per-theme build pipeline.
//!
//! Runs the three external stages of a gallery build: dependency install,
//! site build, and screenshot capture. Each stage fans out over the theme
//! list on a worker pool; every item works in its own directory and writes
//! its own log files, and an item failure never stops the run.

pub mod config;
pub mod deps;
pub mod report;
pub mod runner;
pub mod stages;

pub use config::{PipelineConfig, Tools};
pub use deps::resolve_packages;
pub use report::{PipelineReport, StageKind, StageReport};
pub use runner::{Pipeline, StageOpts};
pub use stages::StageError;
