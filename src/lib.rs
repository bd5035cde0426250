// src/lib.rs

//! bojweekly Library
//!
//! Picks a weekly set of Baekjoon problems from solved.ac, filtered by a
//! difficulty distribution and deduplicated against problems already sent,
//! and delivers the result to a Discord webhook.

pub mod error;
pub mod message;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
