//! Best-score leaderboard
//!
//! Keeps the top finished sessions, best first. The host decides where the
//! JSON lives; the headless binary keeps it in a file passed with `--scores`.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Speed level the session had reached when it ended
    pub speed_level: u8,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard, sorted descending by score (earlier entry first on ties)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a score would be inserted at, if it makes the board at all
    fn slot_for(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        // Equal scores land behind existing ones
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Record a finished session; returns its 1-based rank if it made the board
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let slot = self.slot_for(entry.score)?;
        log::info!("High score {} ranked #{}", entry.score, slot + 1);
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best recorded score, 0 for an empty board
    pub fn best(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse a stored leaderboard; anything unreadable starts fresh
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("Discarding unreadable high scores: {}", err);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64, speed_level: u8) -> HighScoreEntry {
        HighScoreEntry {
            score,
            speed_level,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(entry(0, 1)), None);
        assert!(scores.is_empty());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_record_keeps_best_first() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(entry(10, 1)), Some(1));
        assert_eq!(scores.record(entry(30, 2)), Some(1));
        assert_eq!(scores.record(entry(20, 2)), Some(2));
        assert_eq!(scores.record(entry(20, 3)), Some(3));
        let order: Vec<(u64, u8)> = scores
            .entries
            .iter()
            .map(|e| (e.score, e.speed_level))
            .collect();
        assert_eq!(order, vec![(30, 2), (20, 2), (20, 3), (10, 1)]);
        assert_eq!(scores.best(), 30);
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.record(entry(s * 10, 1));
        }
        // Tying the lowest isn't enough
        assert_eq!(scores.record(entry(10, 2)), None);
        assert_eq!(scores.record(entry(15, 1)), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_json_roundtrip_and_garbage() {
        let mut scores = HighScores::new();
        scores.record(HighScoreEntry {
            score: 42,
            speed_level: 3,
            timestamp: 1_700_000_000_000.0,
        });
        assert_eq!(HighScores::from_json(&scores.to_json()), scores);
        assert!(HighScores::from_json("not json").is_empty());
    }

    #[test]
    fn test_from_json_sorts_unsorted_input() {
        let json = r#"{"entries":[
            {"score":5,"speed_level":1,"timestamp":0.0},
            {"score":9,"speed_level":2,"timestamp":0.0}
        ]}"#;
        assert_eq!(HighScores::from_json(json).best(), 9);
    }
}
