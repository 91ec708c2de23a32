use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::EquityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn letter(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A playing card. Ordering is by rank first, suit second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank_value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.letter(), self.suit.symbol())
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => {
                let rank = Rank::from_char(r)
                    .ok_or_else(|| EquityError::invalid_hand(s, format!("unknown rank '{r}'")))?;
                let suit = Suit::from_char(su)
                    .ok_or_else(|| EquityError::invalid_hand(s, format!("unknown suit '{su}'")))?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(EquityError::invalid_hand(s, "a card is a rank followed by a suit")),
        }
    }
}

pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Pool of cards still available for dealing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deck {
    pub fn standard() -> Self {
        Self {
            cards: standard_deck(),
        }
    }

    /// Full deck minus `known`.
    pub fn without(known: &[Card]) -> Self {
        let mut deck = Self::standard();
        deck.remove(known);
        deck
    }

    /// Removes every card in `cards`. Cards already absent are ignored, so
    /// removing the same card twice is a no-op.
    pub fn remove(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws `count` distinct cards uniformly at random, in random order. The
    /// deck itself is left untouched.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, EquityError> {
        if count > self.cards.len() {
            return Err(EquityError::NotEnoughCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        let mut pool = self.cards.clone();
        let (drawn, _) = pool.partial_shuffle(rng, count);
        Ok(drawn.to_vec())
    }
}

pub fn deal_unique_cards<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Result<Vec<Card>, EquityError> {
    Deck::standard().sample(count, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let deck = standard_deck();
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn removal_keeps_deck_size_consistent() {
        let removed: Vec<Card> = ["As", "Kd", "2c", "Th"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let mut deck = Deck::without(&removed);
        assert_eq!(deck.len() + removed.len(), 52);
        assert!(removed.iter().all(|c| !deck.contains(c)));

        deck.remove(&removed);
        assert_eq!(deck.len(), 48);
    }

    #[test]
    fn sample_never_repeats_a_card() {
        let mut rng = StdRng::seed_from_u64(11);
        let deck = Deck::standard();
        for _ in 0..200 {
            let drawn = deck.sample(10, &mut rng).unwrap();
            let unique: HashSet<Card> = drawn.iter().copied().collect();
            assert_eq!(unique.len(), 10);
        }
    }

    #[test]
    fn oversized_sample_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let deck = Deck::without(&standard_deck()[..50]);
        let err = deck.sample(3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            EquityError::NotEnoughCards {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn card_parsing_is_case_insensitive() {
        let card: Card = "tH".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(card.to_string(), "Th");
        assert!("1s".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
    }
}
