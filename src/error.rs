#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EquityError {
    #[error("invalid hand '{input}': {reason}")]
    InvalidHandFormat { input: String, reason: String },
    #[error("board has {0} cards, at least 3 are required")]
    InsufficientBoard(usize),
    #[error("no ranked hands available for the requested range")]
    EmptyRangeOrCache,
    #[error("every sampled opponent conflicted with the hero hand")]
    NoValidTrials,
    #[error("cannot deal {requested} cards from a deck of {available}")]
    NotEnoughCards { requested: usize, available: usize },
    #[error("trial batch failed: {0}")]
    Worker(String),
}

impl EquityError {
    pub(crate) fn invalid_hand(input: &str, reason: impl Into<String>) -> Self {
        EquityError::InvalidHandFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Conditions the engine answers with an equity of zero instead of failing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EquityError::EmptyRangeOrCache | EquityError::NoValidTrials)
    }
}
