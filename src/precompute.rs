use std::collections::HashSet;
use std::path::Path;

use anyhow::{Result, bail};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::deal_unique_cards;
use crate::equity::simulate_vs_random;
use crate::hand::{HOLE_CARDS, Hand};
use crate::ranking::{HandRanking, RankedHand};
use crate::runner::TrialRunner;

/// C(52, 5): every distinct five-card holding.
pub const TOTAL_HOLDINGS: usize = 2_598_960;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecomputeConfig {
    /// New hands ranked per run; earlier results are kept.
    pub hands_per_run: usize,
    pub trials_per_hand: u32,
    /// Save after this many new hands. Zero saves only at the end.
    pub checkpoint_every: usize,
    pub batch_size: u32,
}

impl Default for PrecomputeConfig {
    fn default() -> Self {
        Self {
            hands_per_run: 50,
            trials_per_hand: 10_000,
            checkpoint_every: 5,
            batch_size: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputeSummary {
    pub loaded: usize,
    pub computed: usize,
    pub total: usize,
}

/// Draws a random holding not yet in `seen` and records it there.
pub fn generate_unique_hand<R: Rng + ?Sized>(
    seen: &mut HashSet<Hand>,
    rng: &mut R,
) -> Result<Hand> {
    if seen.len() >= TOTAL_HOLDINGS {
        bail!("every {TOTAL_HOLDINGS} holdings are already ranked");
    }
    loop {
        let cards = deal_unique_cards(rng, HOLE_CARDS)?;
        let hand = Hand::from_slice(&cards)?.canonical();
        if seen.insert(hand) {
            return Ok(hand);
        }
    }
}

/// Extends the ranking stored at `path` by up to `hands_per_run` new hands,
/// checkpointing as it goes. Hands already present are never re-evaluated.
pub fn run_precomputation<T, R>(
    path: &Path,
    config: &PrecomputeConfig,
    runner: &T,
    rng: &mut R,
) -> Result<PrecomputeSummary>
where
    T: TrialRunner,
    R: Rng + ?Sized,
{
    let mut entries = HandRanking::load_if_exists(path)?.into_entries();
    let mut seen: HashSet<Hand> = entries.iter().map(|e| e.hand.canonical()).collect();
    let loaded = entries.len();
    info!(
        loaded,
        new_hands = config.hands_per_run,
        trials = config.trials_per_hand,
        "starting precomputation run"
    );

    let mut computed = 0;
    while computed < config.hands_per_run {
        let hand = generate_unique_hand(&mut seen, rng)?;
        let tally = simulate_vs_random(
            &hand,
            config.trials_per_hand,
            config.batch_size,
            runner,
            rng,
        )?;
        entries.push(RankedHand {
            hand,
            equity: tally.equity(),
        });
        computed += 1;
        debug!(%hand, equity = tally.equity(), computed, "ranked hand");

        let checkpoint_due =
            config.checkpoint_every > 0 && computed % config.checkpoint_every == 0;
        if checkpoint_due && computed < config.hands_per_run {
            info!(computed, "checkpointing progress");
            HandRanking::from_entries(entries.clone()).save(path)?;
        }
    }

    let total = entries.len();
    if computed > 0 {
        HandRanking::from_entries(entries).save(path)?;
    }
    info!(loaded, computed, total, "precomputation run finished");

    Ok(PrecomputeSummary {
        loaded,
        computed,
        total,
    })
}
