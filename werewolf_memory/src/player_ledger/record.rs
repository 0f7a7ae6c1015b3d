//! Per-player records.

use serde::{Deserialize, Serialize};

use super::{Claim, VoteEvent};

/// Everything known about one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique, case-sensitive player name.
    pub name: String,

    /// Only ever goes from `true` to `false`.
    pub alive: bool,

    /// Chronological, append-only.
    pub claims: Vec<Claim>,

    /// Votes this player cast, in order.
    pub votes_cast: Vec<VoteEvent>,

    /// Names of the voters that targeted this player, in order.
    pub times_voted_against: Vec<String>,

    /// Higher means more suspected of being a werewolf. Unbounded.
    pub suspicion_score: f64,

    pub suspected_role: Option<String>,

    pub behavioral_notes: Vec<String>,
}

impl PlayerRecord {
    /// Create a record for a living player with no history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: true,
            claims: Vec::new(),
            votes_cast: Vec::new(),
            times_voted_against: Vec::new(),
            suspicion_score: 0.0,
            suspected_role: None,
            behavioral_notes: Vec::new(),
        }
    }
}
