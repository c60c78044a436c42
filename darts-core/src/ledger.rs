//! Lifetime score tracking for every player seen in a session.

use std::collections::HashMap;

/// Aggregate score per player name. Scores never drop below zero.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    scores: HashMap<String, u32>,
}

impl ScoreLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a player has an entry, starting at zero.
    pub fn ensure(&mut self, player: &str) {
        if player.is_empty() {
            return;
        }
        self.scores.entry(player.to_string()).or_insert(0);
    }

    /// Add a signed delta to a player's score, clamping at zero.
    ///
    /// Returns the new total, or `None` when the name is empty.
    pub fn adjust(&mut self, player: &str, delta: i32) -> Option<u32> {
        if player.is_empty() {
            return None;
        }
        let score = self.scores.entry(player.to_string()).or_insert(0);
        *score = score.saturating_add_signed(delta);
        Some(*score)
    }

    /// Current score, 0 for players the ledger has never seen.
    pub fn get(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// All known players, highest score first and ties by name.
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut rows: Vec<_> = self
            .scores
            .iter()
            .map(|(name, score)| (name.clone(), *score))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}
