//! Service layer for the weekly digest application.

pub mod catalog;
pub mod selector;
pub mod webhook;

pub use catalog::{CatalogClient, ProblemSource};
pub use selector::TieredSelector;
pub use webhook::{DiscordNotifier, Notify};
