use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equity::{TrialTally, simulate_vs_random, simulate_vs_range};
use crate::error::EquityError;
use crate::hand::{Hand, parse_hand};
use crate::range::{DEFAULT_SAMPLE_CAP, Range};
use crate::ranking::HandRanking;
use crate::runner::{RayonRunner, TrialRunner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub random_trials: u32,
    pub range_sample_cap: usize,
    pub batch_size: u32,
    /// Fixed seed for every request; fresh entropy per request when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            random_trials: 10_000,
            range_sample_cap: DEFAULT_SAMPLE_CAP,
            batch_size: 500,
            seed: None,
        }
    }
}

/// Answers equity queries against a ranking loaded once at startup.
#[derive(Debug, Clone)]
pub struct EquityEngine<T: TrialRunner = RayonRunner> {
    ranking: Arc<HandRanking>,
    runner: T,
    config: EngineConfig,
}

impl EquityEngine<RayonRunner> {
    pub fn new(ranking: HandRanking, config: EngineConfig) -> Self {
        Self::with_runner(ranking, config, RayonRunner::new())
    }

    pub fn from_ranking_file(path: &Path, config: EngineConfig) -> Self {
        Self::new(HandRanking::load_or_empty(path), config)
    }
}

impl<T: TrialRunner> EquityEngine<T> {
    pub fn with_runner(ranking: HandRanking, config: EngineConfig, runner: T) -> Self {
        Self {
            ranking: Arc::new(ranking),
            runner,
            config,
        }
    }

    pub fn equity_vs_random(&self, hand: &str) -> Result<f64, EquityError> {
        self.equity_vs_random_with_rng(hand, &mut self.request_rng())
    }

    pub fn equity_vs_random_with_rng<R: Rng + ?Sized>(
        &self,
        hand: &str,
        rng: &mut R,
    ) -> Result<f64, EquityError> {
        let hero = parse_hand(hand)?;
        recover(self.random_tally(&hero, rng))
    }

    pub fn equity_vs_range(&self, hero: &str, range_percent: u8) -> Result<f64, EquityError> {
        self.equity_vs_range_with_rng(hero, range_percent, &mut self.request_rng())
    }

    pub fn equity_vs_range_with_rng<R: Rng + ?Sized>(
        &self,
        hero: &str,
        range_percent: u8,
        rng: &mut R,
    ) -> Result<f64, EquityError> {
        let hero = parse_hand(hero)?;
        recover(self.range_tally(&hero, range_percent, rng))
    }

    pub fn random_tally<R: Rng + ?Sized>(
        &self,
        hero: &Hand,
        rng: &mut R,
    ) -> Result<TrialTally, EquityError> {
        let tally = simulate_vs_random(
            hero,
            self.config.random_trials,
            self.config.batch_size,
            &self.runner,
            rng,
        )?;
        if tally.trials == 0 {
            return Err(EquityError::NoValidTrials);
        }
        Ok(tally)
    }

    pub fn range_tally<R: Rng + ?Sized>(
        &self,
        hero: &Hand,
        range_percent: u8,
        rng: &mut R,
    ) -> Result<TrialTally, EquityError> {
        let range = Range::from_percentile(&self.ranking, range_percent);
        if range.is_empty() {
            return Err(EquityError::EmptyRangeOrCache);
        }
        let opponents = range.sample(self.config.range_sample_cap, rng);
        let tally = simulate_vs_range(hero, &opponents, rng)?;
        debug!(
            percent = range.percent(),
            pool = range.len(),
            sampled = opponents.len(),
            valid = tally.trials,
            "range simulation finished"
        );
        if tally.trials == 0 {
            return Err(EquityError::NoValidTrials);
        }
        Ok(tally)
    }

    fn request_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn recover(tally: Result<TrialTally, EquityError>) -> Result<f64, EquityError> {
    match tally {
        Ok(tally) => Ok(tally.equity()),
        Err(err) if err.is_recoverable() => {
            debug!(reason = %err, "no usable trials, reporting zero equity");
            Ok(0.0)
        }
        Err(err) => Err(err),
    }
}

pub fn format_equity(equity: f64) -> String {
    format!("{equity:.2}%")
}
