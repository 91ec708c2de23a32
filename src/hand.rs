use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::cards::Card;
use crate::error::EquityError;

pub const HOLE_CARDS: usize = 5;

/// Five distinct hole cards, kept in the order they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Hand {
    cards: [Card; HOLE_CARDS],
}

impl Hand {
    pub fn new(cards: [Card; HOLE_CARDS]) -> Result<Self, EquityError> {
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                let input: String = cards.iter().map(Card::to_string).collect();
                return Err(EquityError::invalid_hand(&input, format!("duplicate card {card}")));
            }
        }
        Ok(Self { cards })
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self, EquityError> {
        let array: [Card; HOLE_CARDS] = cards.try_into().map_err(|_| {
            let input: String = cards.iter().map(Card::to_string).collect();
            let reason = format!("expected {HOLE_CARDS} cards, got {}", cards.len());
            EquityError::invalid_hand(&input, reason)
        })?;
        Self::new(array)
    }

    pub fn cards(&self) -> &[Card; HOLE_CARDS] {
        &self.cards
    }

    /// Same cards sorted high to low, so permutations of one holding compare equal.
    pub fn canonical(&self) -> Self {
        let mut cards = self.cards;
        cards.sort_unstable_by(|a, b| b.rank.cmp(&a.rank).then(a.suit.cmp(&b.suit)));
        Self { cards }
    }

    pub fn conflicts_with(&self, other: &Hand) -> bool {
        self.cards.iter().any(|c| other.cards.contains(c))
    }

    pub fn pretty(&self) -> String {
        self.cards.iter().map(Card::pretty).collect::<Vec<_>>().join(" ")
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != HOLE_CARDS * 2 {
            return Err(EquityError::invalid_hand(
                s,
                format!("expected {} characters, got {}", HOLE_CARDS * 2, chars.len()),
            ));
        }

        let mut cards = Vec::with_capacity(HOLE_CARDS);
        for pair in chars.chunks(2) {
            let token: String = pair.iter().collect();
            let card = token
                .parse::<Card>()
                .map_err(|_| EquityError::invalid_hand(s, format!("unrecognized card '{token}'")))?;
            if cards.contains(&card) {
                return Err(EquityError::invalid_hand(s, format!("duplicate card {card}")));
            }
            cards.push(card);
        }

        Self::from_slice(&cards)
    }
}

pub fn parse_hand(input: &str) -> Result<Hand, EquityError> {
    input.parse()
}
