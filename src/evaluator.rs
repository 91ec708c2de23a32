use std::cmp::Ordering;

use itertools::Itertools;

use crate::cards::{Card, Rank};
use crate::error::EquityError;
use crate::hand::Hand;

pub const BOARD_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Value of a five-card poker hand. `ranks` lists the tie-break ranks in
/// significance order, zero padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandStrength {
    pub category: HandCategory,
    pub ranks: [u8; 5],
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showdown {
    Win,
    Tie,
    Loss,
}

impl From<Ordering> for Showdown {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Showdown::Win,
            Ordering::Equal => Showdown::Tie,
            Ordering::Less => Showdown::Loss,
        }
    }
}

fn straight_high(counts: &[u8; 15]) -> Option<u8> {
    let mut mask: u32 = 0;
    for rank_value in 2u8..=14 {
        if counts[rank_value as usize] > 0 {
            mask |= 1 << rank_value;
        }
    }
    if mask & (1 << Rank::Ace.value()) != 0 {
        mask |= 1 << 1; // wheel
    }

    (5u8..=14).rev().find(|&high| {
        let needed = 0b11111u32 << (high - 4);
        mask & needed == needed
    })
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank_value() as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    if let Some(high) = straight_high(&counts) {
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandStrength {
            category,
            ranks: [high, high - 1, high - 2, high - 3, high - 4],
        };
    }

    // (count, rank) groups, biggest group first, higher rank first within a size.
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for rank_value in (2u8..=14).rev() {
        let count = counts[rank_value as usize];
        if count > 0 {
            groups[len] = (count, rank_value);
            len += 1;
        }
    }
    let groups = &mut groups[..len];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    let mut ranks = [0u8; 5];
    for (slot, &(_, rank)) in ranks.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }

    let category = match (groups[0].0, groups.get(1).map_or(0, |g| g.0)) {
        (4, _) => HandCategory::FourOfAKind,
        (3, 2) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandStrength { category, ranks }
}

/// Best hand using exactly two hole cards and three board cards.
pub fn best_omaha_hand(hole: &Hand, board: &[Card]) -> Result<HandStrength, EquityError> {
    if board.len() < 3 {
        return Err(EquityError::InsufficientBoard(board.len()));
    }

    let mut best: Option<HandStrength> = None;
    for (a, b) in hole.cards().iter().tuple_combinations::<(_, _)>() {
        for (c, d, e) in board.iter().tuple_combinations::<(_, _, _)>() {
            let strength = evaluate_five(&[*a, *b, *c, *d, *e]);
            best = best.max(Some(strength));
        }
    }
    best.ok_or(EquityError::InsufficientBoard(board.len()))
}

pub fn showdown(hero: &Hand, villain: &Hand, board: &[Card]) -> Result<Showdown, EquityError> {
    let hero_best = best_omaha_hand(hero, board)?;
    let villain_best = best_omaha_hand(villain, board)?;
    Ok(hero_best.cmp(&villain_best).into())
}
