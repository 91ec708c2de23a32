use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use plo5_equity::hand::parse_hand;
use plo5_equity::ranking::DEFAULT_RANKING_FILE;
use plo5_equity::{
    EngineConfig, EquityEngine, HandRanking, PrecomputeConfig, RayonRunner, format_equity,
    run_precomputation,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "plo5-equity",
    version,
    about = "Five-card Omaha equity calculator",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RNG seed (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Worker threads for trial batches (rayon default if omitted)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Disable ANSI colors in CLI output
    #[arg(long = "no-color", global = true, default_value_t = false)]
    no_color: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Equity of a hand against one random opponent
    Random {
        /// Hero hole cards, e.g. AsKsAdKdQc
        #[arg(long)]
        hand: String,

        /// Monte Carlo trials
        #[arg(long, default_value_t = 10_000)]
        trials: u32,
    },
    /// Equity of a hand against the top N percent of ranked hands
    Range {
        /// Hero hole cards, e.g. AsKsAdKdQc
        #[arg(long)]
        hand: String,

        /// Villain range as a percentile of the ranking (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,

        /// Ranking cache produced by `precompute`
        #[arg(long, default_value = DEFAULT_RANKING_FILE)]
        ranking: PathBuf,

        /// Maximum villain hands sampled from the range
        #[arg(long = "sample-cap", default_value_t = 2000)]
        sample_cap: usize,
    },
    /// Rank new random hands and append them to the ranking cache
    Precompute {
        /// Ranking cache to extend
        #[arg(long, default_value = DEFAULT_RANKING_FILE)]
        ranking: PathBuf,

        /// New hands to rank in this run
        #[arg(long, default_value_t = 50)]
        hands: usize,

        /// Monte Carlo trials per hand
        #[arg(long, default_value_t = 10_000)]
        trials: u32,

        /// Save progress every N hands
        #[arg(long = "checkpoint-every", default_value_t = 5)]
        checkpoint_every: usize,
    },
}

fn main() -> Result<()> {
    let _ = color_eyre::install();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let runner = match cli.threads {
        Some(threads) => RayonRunner::with_threads(threads)?,
        None => RayonRunner::new(),
    };

    match cli.command {
        Commands::Random { ref hand, trials } => {
            let config = EngineConfig {
                random_trials: trials,
                seed: cli.seed,
                ..EngineConfig::default()
            };
            let engine = EquityEngine::with_runner(HandRanking::empty(), config, runner);
            let equity = engine.equity_vs_random(hand)?;
            print_equity(&cli, hand, "random hand", equity)?;
        }
        Commands::Range {
            ref hand,
            percent,
            ref ranking,
            sample_cap,
        } => {
            let config = EngineConfig {
                range_sample_cap: sample_cap,
                seed: cli.seed,
                ..EngineConfig::default()
            };
            let ranking = HandRanking::load_or_empty(ranking);
            let engine = EquityEngine::with_runner(ranking, config, runner);
            let equity = engine.equity_vs_range(hand, percent)?;
            print_equity(&cli, hand, &format!("top {percent}%"), equity)?;
        }
        Commands::Precompute {
            ref ranking,
            hands,
            trials,
            checkpoint_every,
        } => {
            let config = PrecomputeConfig {
                hands_per_run: hands,
                trials_per_hand: trials,
                checkpoint_every,
                ..PrecomputeConfig::default()
            };
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let summary = run_precomputation(ranking, &config, &runner, &mut rng)?;
            if cli.no_color {
                println!(
                    "Ranked: loaded={}, computed={}, total={}",
                    summary.loaded, summary.computed, summary.total
                );
            } else {
                println!(
                    "{} loaded {} {} {} {} {}",
                    "Ranked".bold().magenta(),
                    summary.loaded,
                    "computed".bold().white(),
                    summary.computed,
                    "total".bold().white(),
                    summary.total
                );
            }
        }
    }

    Ok(())
}

fn print_equity(cli: &Cli, hand: &str, against: &str, equity: f64) -> Result<()> {
    let hero = parse_hand(hand)?;
    if cli.no_color {
        println!("Hero {} vs {} | Equity: {}", hero, against, format_equity(equity));
    } else {
        println!(
            "{} {} {} {} {} {}",
            "Hero".bold().white(),
            hero.pretty().bold().yellow(),
            "vs".white(),
            against.bold().blue(),
            "Equity:".bold().cyan(),
            format_equity(equity).bold().green()
        );
    }
    Ok(())
}
