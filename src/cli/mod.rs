//! Command Line Interface (CLI) layer for roicrop.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch crops
//! and ROI annotation. It wires user-provided options to the underlying
//! library functionality exposed via `roicrop::api`.
//!
//! If you are embedding roicrop into another application, prefer using
//! the high-level `roicrop::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
