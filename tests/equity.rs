use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_chacha::ChaCha8Rng;

use plo5_equity::equity::{simulate_vs_random, simulate_vs_range};
use plo5_equity::hand::Hand;
use plo5_equity::ranking::{HandRanking, RankedHand};
use plo5_equity::{EngineConfig, EquityEngine, EquityError, RayonRunner, SequentialRunner};

fn config(trials: u32) -> EngineConfig {
    EngineConfig {
        random_trials: trials,
        range_sample_cap: 2000,
        batch_size: 250,
        seed: Some(99),
    }
}

fn ranked(hands: &[(&str, f64)]) -> HandRanking {
    HandRanking::from_entries(
        hands
            .iter()
            .map(|(hand, equity)| RankedHand {
                hand: hand.parse().unwrap(),
                equity: *equity,
            })
            .collect(),
    )
}

#[test]
fn premium_hand_beats_a_random_opponent() {
    let engine = EquityEngine::with_runner(HandRanking::empty(), config(2000), SequentialRunner);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let equity = engine
        .equity_vs_random_with_rng("AsKsAdKdQc", &mut rng)
        .unwrap();
    assert!(equity > 55.0 && equity <= 100.0, "equity={equity}");
}

#[test]
fn premium_hand_wins_more_boards_than_a_rundown() {
    let hero: Hand = "AsKsAdKdQc".parse().unwrap();
    let villain: Hand = "7h6h5s4s3d".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(31);
    let tally = simulate_vs_range(&hero, &vec![villain; 1500], &mut rng).unwrap();
    assert_eq!(tally.trials, 1500);
    assert!(tally.wins > tally.losses(), "{tally:?}");
}

#[test]
fn equities_stay_within_percent_bounds() {
    let ranking = ranked(&[
        ("AhAcKhKc2d", 68.0),
        ("9s8s7d6d5c", 55.0),
        ("Th9h8c3d2s", 44.0),
        ("7c5d4h3s2c", 30.0),
    ]);
    let engine = EquityEngine::with_runner(ranking, config(300), SequentialRunner);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    for hero in ["AsKsAdKdQc", "2h3h4d5d7s", "JcJsTdTh9c"] {
        let vs_random = engine.equity_vs_random_with_rng(hero, &mut rng).unwrap();
        assert!((0.0..=100.0).contains(&vs_random), "{hero}: {vs_random}");
        for percent in [0, 25, 50, 100] {
            let vs_range = engine
                .equity_vs_range_with_rng(hero, percent, &mut rng)
                .unwrap();
            assert!((0.0..=100.0).contains(&vs_range), "{hero} {percent}: {vs_range}");
        }
    }
}

#[test]
fn zero_percent_range_is_zero_equity() {
    let ranking = ranked(&[("9s8s7d6d5c", 55.0), ("7c5d4h3s2c", 30.0)]);
    let engine = EquityEngine::with_runner(ranking, config(100), SequentialRunner);
    assert_eq!(engine.equity_vs_range("AsKsAdKdQc", 0).unwrap(), 0.0);
}

#[test]
fn fully_conflicting_range_is_zero_equity() {
    let ranking = ranked(&[
        ("As9c8c7h6h", 61.0),
        ("Ks2c3c4h5h", 52.0),
        ("Qc9d8d7s6s", 47.0),
    ]);
    let hero: Hand = "AsKsAdKdQc".parse().unwrap();
    let engine = EquityEngine::with_runner(ranking, config(100), SequentialRunner);

    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        engine.range_tally(&hero, 100, &mut rng),
        Err(EquityError::NoValidTrials)
    );
    assert_eq!(engine.equity_vs_range("AsKsAdKdQc", 100).unwrap(), 0.0);
}

#[test]
fn malformed_hands_are_rejected_before_simulation() {
    let engine = EquityEngine::with_runner(HandRanking::empty(), config(100), SequentialRunner);
    for input in ["AsKs", "AsKsAdKdQcJc", "AsKsAdKdZz", "AsAsAdKdQc"] {
        assert!(matches!(
            engine.equity_vs_random(input),
            Err(EquityError::InvalidHandFormat { .. })
        ));
        assert!(matches!(
            engine.equity_vs_range(input, 50),
            Err(EquityError::InvalidHandFormat { .. })
        ));
    }
}

#[test]
fn parallel_and_sequential_runners_agree_for_a_seed() {
    let hero: Hand = "JcJsTdTh9c".parse().unwrap();
    let sequential = simulate_vs_random(
        &hero,
        1_000,
        128,
        &SequentialRunner,
        &mut StdRng::seed_from_u64(5),
    )
    .unwrap();
    let parallel = simulate_vs_random(
        &hero,
        1_000,
        128,
        &RayonRunner::new(),
        &mut StdRng::seed_from_u64(5),
    )
    .unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.trials, 1_000);
}
