use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::hand::Hand;

pub const DEFAULT_RANKING_FILE: &str = "ranked_hands.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedHand {
    pub hand: Hand,
    pub equity: f64,
}

/// Hands ordered by descending equity against a random opponent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandRanking {
    hands: Vec<RankedHand>,
}

impl HandRanking {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorts by descending equity and drops repeated holdings, keeping the
    /// first occurrence. Card order inside a hand does not make it distinct.
    pub fn from_entries(entries: Vec<RankedHand>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut hands: Vec<RankedHand> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.hand.canonical()))
            .collect();
        hands.sort_by(|a, b| b.equity.total_cmp(&a.equity));
        Self { hands }
    }

    pub fn hands(&self) -> &[RankedHand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn into_entries(self) -> Vec<RankedHand> {
        self.hands
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Self::read(file, path)
    }

    /// Like [`HandRanking::load`], but a missing file is an empty ranking.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        match File::open(path) {
            Ok(file) => Self::read(file, path),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::empty()),
            Err(err) => Err(err).with_context(|| format!("opening {}", path.display())),
        }
    }

    fn read(file: File, path: &Path) -> Result<Self> {
        let entries: Vec<RankedHand> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing ranking cache {}", path.display()))?;
        let ranking = Self::from_entries(entries);
        info!(path = %path.display(), hands = ranking.len(), "loaded hand ranking");
        Ok(ranking)
    }

    /// Startup loader for the online engine: any failure yields an empty ranking.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(ranking) => ranking,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "hand ranking unavailable, range equity will be 0; run `precompute` first"
                );
                Self::empty()
            }
        }
    }

    /// Writes the ranking through a temporary sibling file renamed into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = temp_sibling(path);
        {
            let file = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.hands)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp, path)
            .with_context(|| format!("replacing {} with {}", path.display(), tmp.display()))?;
        info!(path = %path.display(), hands = self.len(), "saved hand ranking");
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hand: &str, equity: f64) -> RankedHand {
        RankedHand {
            hand: hand.parse().unwrap(),
            equity,
        }
    }

    #[test]
    fn entries_are_sorted_and_deduplicated() {
        let ranking = HandRanking::from_entries(vec![
            entry("7h6h5s4s3d", 31.0),
            entry("AsKsAdKdQc", 70.0),
            entry("QcKdAsAdKs", 12.0),
            entry("9c8c7d6d2h", 52.5),
        ]);
        let equities: Vec<f64> = ranking.hands().iter().map(|h| h.equity).collect();
        assert_eq!(equities, vec![70.0, 52.5, 31.0]);
    }

    #[test]
    fn temp_file_sits_next_to_target() {
        let tmp = temp_sibling(Path::new("/data/ranked_hands.json"));
        assert_eq!(tmp, PathBuf::from("/data/ranked_hands.json.tmp"));
    }
}
