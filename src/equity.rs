use std::iter::Sum;
use std::ops::Add;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cards::{Card, Deck};
use crate::error::EquityError;
use crate::evaluator::{BOARD_CARDS, Showdown, showdown};
use crate::hand::{HOLE_CARDS, Hand};
use crate::runner::{TrialBatch, TrialRunner, plan_batches};

/// Win/tie counts over a number of valid trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialTally {
    pub wins: u64,
    pub ties: u64,
    pub trials: u64,
}

impl TrialTally {
    pub fn record(&mut self, outcome: Showdown) {
        self.trials += 1;
        match outcome {
            Showdown::Win => self.wins += 1,
            Showdown::Tie => self.ties += 1,
            Showdown::Loss => {}
        }
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins - self.ties
    }

    /// Equity in percent, ties counted as half a win. Zero when no trial counted.
    pub fn equity(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (self.wins as f64 + self.ties as f64 / 2.0) / self.trials as f64 * 100.0
    }
}

impl Add for TrialTally {
    type Output = TrialTally;

    fn add(self, other: TrialTally) -> TrialTally {
        TrialTally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }
}

impl Sum for TrialTally {
    fn sum<I: Iterator<Item = TrialTally>>(iter: I) -> Self {
        iter.fold(TrialTally::default(), Add::add)
    }
}

/// Deals the opponent's hole cards and a full board from `deck`, then settles the pot.
pub fn random_trial<R: Rng + ?Sized>(
    hero: &Hand,
    deck: &Deck,
    rng: &mut R,
) -> Result<Showdown, EquityError> {
    let drawn = deck.sample(HOLE_CARDS + BOARD_CARDS, rng)?;
    let villain = Hand::from_slice(&drawn[..HOLE_CARDS])?;
    showdown(hero, &villain, &drawn[HOLE_CARDS..])
}

pub fn run_random_batch(
    hero: &Hand,
    deck: &Deck,
    batch: &TrialBatch,
) -> Result<TrialTally, EquityError> {
    let mut rng = SmallRng::seed_from_u64(batch.seed);
    let mut tally = TrialTally::default();
    for _ in 0..batch.trials {
        tally.record(random_trial(hero, deck, &mut rng)?);
    }
    Ok(tally)
}

pub fn simulate_vs_random<T, R>(
    hero: &Hand,
    trials: u32,
    batch_size: u32,
    runner: &T,
    rng: &mut R,
) -> Result<TrialTally, EquityError>
where
    T: TrialRunner,
    R: Rng + ?Sized,
{
    let batches = plan_batches(trials, batch_size, rng);
    let deck = Deck::without(hero.cards());
    runner.run(&batches, |batch| run_random_batch(hero, &deck, batch))
}

/// One random board per opponent. Opponents sharing a card with the hero are
/// skipped without a replacement draw, so they shrink the trial count.
pub fn simulate_vs_range<R: Rng + ?Sized>(
    hero: &Hand,
    opponents: &[Hand],
    rng: &mut R,
) -> Result<TrialTally, EquityError> {
    let mut tally = TrialTally::default();
    for villain in opponents {
        if hero.conflicts_with(villain) {
            continue;
        }
        let known: Vec<Card> = hero.cards().iter().chain(villain.cards()).copied().collect();
        let board = Deck::without(&known).sample(BOARD_CARDS, rng)?;
        tally.record(showdown(hero, villain, &board)?);
    }
    Ok(tally)
}
