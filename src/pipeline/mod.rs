//! Pipeline entry point for the weekly digest run.

pub mod run;

pub use run::{RunReport, run_weekly};
