// src/services/selector.rs

//! Tiered problem selection.
//!
//! For every tier quota in the distribution, fetches one oversized batch
//! of candidates and samples the quota without replacement, preferring
//! problems that were never sent before. A batch is a finite random
//! sample of the catalog, so running short of fresh candidates must not
//! fail the run: the shortfall is topped up from the already-used
//! remainder of the same batch, and a batch smaller than the quota is
//! returned as-is (under-fill).

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{AppError, Result};
use crate::models::{Config, Problem, TierQuota, TierRange};
use crate::services::catalog::ProblemSource;

/// Selects problems tier by tier according to the configured distribution.
pub struct TieredSelector<'a, S> {
    source: &'a S,
    config: &'a Config,
}

impl<'a, S: ProblemSource + Sync> TieredSelector<'a, S> {
    /// Create a selector over the given problem source and configuration.
    pub fn new(source: &'a S, config: &'a Config) -> Self {
        Self { source, config }
    }

    /// Select problems for every tier in distribution order.
    ///
    /// Identifiers in `used_ids` are avoided where the batch allows it.
    /// The result never contains a duplicate identifier, even when tier
    /// level ranges overlap: picks from earlier tiers are excluded from
    /// later ones within the same call.
    pub async fn select<R: Rng>(
        &self,
        used_ids: &HashSet<u64>,
        rng: &mut R,
    ) -> Result<Vec<Problem>> {
        let quotas = self.resolve_quotas()?;

        let mut selected: Vec<Problem> = Vec::new();
        let mut session_ids: HashSet<u64> = HashSet::new();

        for (quota, range) in quotas {
            let excluded: HashSet<u64> = used_ids.union(&session_ids).copied().collect();

            let batch = self.source.search(range).await?;
            let batch = self.apply_title_filter(batch);

            let picks = pick_from_batch(batch, &excluded, quota.count, rng);
            if picks.len() < quota.count {
                log::warn!(
                    "Tier '{}': batch only yielded {} of {} problems",
                    quota.tier,
                    picks.len(),
                    quota.count
                );
            }

            session_ids.extend(picks.iter().map(|p| p.problem_id));
            selected.extend(picks);
        }

        Ok(selected)
    }

    /// Resolve every quota to its tier range up front, so an unknown tier
    /// name aborts before the first network call.
    fn resolve_quotas(&self) -> Result<Vec<(&'a TierQuota, &'a TierRange)>> {
        self.config
            .selection
            .distribution
            .iter()
            .filter(|q| q.count > 0)
            .map(|quota| {
                self.config
                    .tier_range(&quota.tier)
                    .map(|range| (quota, range))
                    .ok_or_else(|| {
                        AppError::config(format!(
                            "Unknown tier '{}' in selection.distribution",
                            quota.tier
                        ))
                    })
            })
            .collect()
    }

    /// Drop candidates without a Korean title when the filter is enabled.
    fn apply_title_filter(&self, batch: Vec<Problem>) -> Vec<Problem> {
        if !self.config.selection.require_korean_title {
            return batch;
        }
        batch
            .into_iter()
            .filter(Problem::has_korean_title)
            .collect()
    }
}

/// Pick up to `need` problems from one fetched batch.
///
/// Primary policy: sample uniformly without replacement from the fresh
/// candidates (those not in `excluded`). Degraded policy: take every
/// fresh candidate and fill the rest from the already-excluded remainder
/// of the batch. Returns fewer than `need` only when the whole batch is
/// smaller than `need`.
fn pick_from_batch<R: Rng>(
    batch: Vec<Problem>,
    excluded: &HashSet<u64>,
    need: usize,
    rng: &mut R,
) -> Vec<Problem> {
    let (fresh, rest): (Vec<Problem>, Vec<Problem>) = batch
        .into_iter()
        .partition(|p| !excluded.contains(&p.problem_id));

    if fresh.len() >= need {
        return fresh.choose_multiple(rng, need).cloned().collect();
    }

    // Not enough fresh candidates: keep them all, top up from the rest
    // of the same batch.
    let mut picks = fresh;
    let shortfall = need - picks.len();

    let picked_ids: HashSet<u64> = picks.iter().map(|p| p.problem_id).collect();
    let pool: Vec<Problem> = rest
        .into_iter()
        .filter(|p| !picked_ids.contains(&p.problem_id))
        .collect();

    if pool.len() <= shortfall {
        // Under-fill: the batch itself is too small
        picks.extend(pool);
    } else {
        picks.extend(pool.choose_multiple(rng, shortfall).cloned());
    }

    picks
}
