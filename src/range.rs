use rand::Rng;
use rand::seq::SliceRandom;

use crate::hand::Hand;
use crate::ranking::{HandRanking, RankedHand};

pub const DEFAULT_SAMPLE_CAP: usize = 2000;

/// The strongest `percent`% of a ranking.
#[derive(Debug, Clone, Copy)]
pub struct Range<'a> {
    pool: &'a [RankedHand],
    percent: u8,
}

/// Number of ranked hands selected by `percent`, rounded down. Values above
/// 100 select everything.
pub fn pool_size(total: usize, percent: u8) -> usize {
    total * usize::from(percent.min(100)) / 100
}

impl<'a> Range<'a> {
    pub fn from_percentile(ranking: &'a HandRanking, percent: u8) -> Self {
        let hands = ranking.hands();
        Self {
            pool: &hands[..pool_size(hands.len(), percent)],
            percent: percent.min(100),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn hands(&self) -> impl Iterator<Item = &'a Hand> + 'a {
        self.pool.iter().map(|ranked| &ranked.hand)
    }

    /// Up to `cap` distinct hands from the range, the whole range when it is smaller.
    pub fn sample<R: Rng + ?Sized>(&self, cap: usize, rng: &mut R) -> Vec<Hand> {
        self.pool
            .choose_multiple(rng, cap.min(self.pool.len()))
            .map(|ranked| ranked.hand)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::cards::Deck;

    fn ranking_of(count: usize) -> HandRanking {
        let mut rng = StdRng::seed_from_u64(21);
        let mut seen = std::collections::HashSet::new();
        let mut entries = Vec::with_capacity(count);
        while entries.len() < count {
            let hand = Hand::from_slice(&Deck::standard().sample(5, &mut rng).unwrap()).unwrap();
            if seen.insert(hand.canonical()) {
                entries.push(RankedHand {
                    hand,
                    equity: 100.0 - entries.len() as f64 * 0.01,
                });
            }
        }
        HandRanking::from_entries(entries)
    }

    #[test]
    fn pool_size_is_floored_prefix() {
        assert_eq!(pool_size(0, 50), 0);
        assert_eq!(pool_size(10, 0), 0);
        assert_eq!(pool_size(10, 5), 0);
        assert_eq!(pool_size(10, 15), 1);
        assert_eq!(pool_size(10, 100), 10);
        assert_eq!(pool_size(10, 250), 10);
    }

    #[test]
    fn range_is_the_strongest_prefix() {
        let ranking = ranking_of(200);
        let range = Range::from_percentile(&ranking, 10);
        assert_eq!(range.len(), 20);
        let expected: Vec<&Hand> = ranking.hands()[..20].iter().map(|r| &r.hand).collect();
        assert_eq!(range.hands().collect::<Vec<_>>(), expected);
        assert!(Range::from_percentile(&ranking, 0).is_empty());
        assert_eq!(Range::from_percentile(&ranking, 100).len(), ranking.len());
    }

    #[test]
    fn sample_is_capped_and_distinct() {
        let ranking = ranking_of(300);
        let range = Range::from_percentile(&ranking, 100);
        let mut rng = StdRng::seed_from_u64(4);

        let capped = range.sample(50, &mut rng);
        assert_eq!(capped.len(), 50);
        let mut unique = capped.clone();
        unique.sort_by_key(|h| h.to_string());
        unique.dedup();
        assert_eq!(unique.len(), 50);

        assert_eq!(range.sample(DEFAULT_SAMPLE_CAP, &mut rng).len(), range.len());
    }
}
