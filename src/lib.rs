pub mod cards;
pub mod engine;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod precompute;
pub mod range;
pub mod ranking;
pub mod runner;

pub use engine::{EngineConfig, EquityEngine, format_equity};
pub use error::EquityError;
pub use hand::Hand;
pub use precompute::{PrecomputeConfig, PrecomputeSummary, run_precomputation};
pub use ranking::HandRanking;
pub use runner::{RayonRunner, SequentialRunner, TrialRunner};
