// src/models/mod.rs

//! Domain models for the weekly digest application.

mod config;
mod problem;

// Re-export all public types
pub use config::{CatalogConfig, Config, HttpConfig, SelectionConfig, TierQuota, TierRange};
pub use problem::{Problem, SearchResponse};
