// src/pipeline/run.rs

//! Weekly digest pipeline.
//!
//! Sequential flow: load used set → select → format → deliver → persist.
//! The used-problem record is only written after delivery succeeds, so a
//! failed run leaves it untouched and a retry can reselect the same
//! candidates.

use rand::Rng;

use crate::error::{AppError, Result};
use crate::message::build_message;
use crate::models::Config;
use crate::services::catalog::ProblemSource;
use crate::services::selector::TieredSelector;
use crate::services::webhook::Notify;
use crate::storage::UsedProblemStore;

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Number of problems in this week's digest
    pub selected: usize,

    /// Size of the used-problem set after the run
    pub used_total: usize,

    /// The formatted announcement message
    pub message: String,

    /// Whether the message was delivered (false on dry runs)
    pub delivered: bool,
}

/// Run the weekly digest pipeline.
///
/// With `dry_run` set, the pipeline stops after formatting: nothing is
/// delivered and the used-problem record is not touched.
pub async fn run_weekly<S, N, R>(
    config: &Config,
    source: &S,
    notifier: &N,
    store: &UsedProblemStore,
    rng: &mut R,
    dry_run: bool,
) -> Result<RunReport>
where
    S: ProblemSource + Sync,
    N: Notify + Sync,
    R: Rng,
{
    let mut used_ids = store.load().await;
    log::info!("Loaded {} previously used problem ids", used_ids.len());

    let selector = TieredSelector::new(source, config);
    let problems = selector.select(&used_ids, rng).await?;

    if problems.is_empty() {
        return Err(AppError::selection(
            "No problems could be fetched; check the distribution and query settings",
        ));
    }
    log::info!("Selected {} problems for this week", problems.len());

    let message = build_message(&problems);

    if dry_run {
        log::info!("Dry run: skipping delivery and persistence");
        return Ok(RunReport {
            selected: problems.len(),
            used_total: used_ids.len(),
            message,
            delivered: false,
        });
    }

    notifier.notify(&message).await?;
    log::info!("Digest delivered to webhook");

    used_ids.extend(problems.iter().map(|p| p.problem_id));
    store.save(&used_ids).await?;
    log::info!(
        "Recorded {} used problem ids at {:?}",
        used_ids.len(),
        store.path()
    );

    Ok(RunReport {
        selected: problems.len(),
        used_total: used_ids.len(),
        message,
        delivered: true,
    })
}
