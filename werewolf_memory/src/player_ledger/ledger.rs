//! The player ledger - authoritative store of per-player observations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use werewolf_rules::{MonotonicClock, SharedClock, SystemClock};

use super::{Claim, PlayerRecord, VoteEvent};
use crate::error::{ensure_finite, MemoryError, MemoryResult};

/// Number of suspects returned when the caller has no preference.
pub const DEFAULT_SUSPECT_COUNT: usize = 3;

/// Store of every known player, in the order they were first seen.
///
/// Mutators initialize unknown players on first reference, since game chatter
/// can mention a player before the moderator introduces them. Pure reads of
/// an unknown player fail with [`MemoryError::UnknownPlayer`].
#[derive(Debug, Clone)]
pub struct PlayerLedger {
    /// Records in first-seen order.
    players: Vec<PlayerRecord>,

    /// Index: player name -> position in `players`.
    index: HashMap<String, usize>,

    /// Every vote of the session, in the order it was recorded.
    vote_log: Vec<VoteEvent>,

    clock: SharedClock,
}

impl Default for PlayerLedger {
    fn default() -> Self {
        Self::new(MonotonicClock::shared(Arc::new(SystemClock)))
    }
}

impl PlayerLedger {
    /// Create an empty ledger that timestamps entries with `clock`.
    pub fn new(clock: SharedClock) -> Self {
        Self {
            players: Vec::new(),
            index: HashMap::new(),
            vote_log: Vec::new(),
            clock,
        }
    }

    /// Start tracking a player.
    ///
    /// Returns `false` and leaves the existing record untouched if the player
    /// is already known.
    pub fn initialize_player(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.insert(name);
        true
    }

    fn insert(&mut self, name: &str) -> usize {
        let position = self.players.len();
        self.players.push(PlayerRecord::new(name));
        self.index.insert(name.to_string(), position);
        tracing::debug!(player = name, "initialized player");
        position
    }

    /// Get the record for `name`, creating it if needed.
    fn record_mut(&mut self, name: &str) -> &mut PlayerRecord {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => self.insert(name),
        };
        &mut self.players[position]
    }

    /// Record a claim made by a player.
    pub fn add_claim(&mut self, name: &str, content: impl Into<String>, channel: impl Into<String>) {
        let claim = Claim::new(content, channel, self.clock.now());
        tracing::debug!(player = name, channel = %claim.channel, "recorded claim");
        self.record_mut(name).claims.push(claim);
    }

    /// Record a vote on the voter's record, the target's record and the
    /// session vote log.
    pub fn record_vote(&mut self, voter: &str, target: &str) {
        let vote = VoteEvent::new(voter, target, self.clock.now());
        tracing::debug!(voter, voted_for = target, "recorded vote");

        self.record_mut(voter).votes_cast.push(vote.clone());
        self.record_mut(target)
            .times_voted_against
            .push(voter.to_string());
        self.vote_log.push(vote);
    }

    /// Mark a player as dead.
    ///
    /// Returns `true` only if this call changed the player's status.
    pub fn mark_player_dead(&mut self, name: &str) -> bool {
        let record = self.record_mut(name);
        if !record.alive {
            return false;
        }
        record.alive = false;
        tracing::debug!(player = name, "marked player dead");
        true
    }

    /// Add `delta` (possibly negative) to a player's suspicion score.
    ///
    /// Returns the new score. Non-finite deltas are rejected without
    /// touching the ledger.
    pub fn update_suspicion_score(&mut self, name: &str, delta: f64) -> MemoryResult<f64> {
        let delta = ensure_finite("delta", delta)?;
        let record = self.record_mut(name);
        record.suspicion_score += delta;
        tracing::debug!(
            player = name,
            delta,
            score = record.suspicion_score,
            "updated suspicion"
        );
        Ok(record.suspicion_score)
    }

    /// Overwrite the role a player is suspected to hold.
    pub fn set_suspected_role(&mut self, name: &str, role: impl Into<String>) {
        let role = role.into();
        tracing::debug!(player = name, role = %role, "set suspected role");
        self.record_mut(name).suspected_role = Some(role);
    }

    /// Record an observation about a player's behavior.
    pub fn add_behavioral_note(&mut self, name: &str, observation: impl Into<String>) {
        self.record_mut(name).behavioral_notes.push(observation.into());
    }

    /// Names of living players, in first-seen order.
    pub fn get_alive_players(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Up to `count` players with the highest suspicion, dead or alive.
    ///
    /// Ties keep first-seen order.
    pub fn get_most_suspicious_players(&self, count: usize) -> Vec<String> {
        rank_by_suspicion(self.players.iter(), count)
    }

    /// Up to `count` living players with the highest suspicion.
    pub fn get_most_suspicious_alive_players(&self, count: usize) -> Vec<String> {
        rank_by_suspicion(self.players.iter().filter(|p| p.alive), count)
    }

    /// All claims made by a player, oldest first.
    pub fn get_player_claims(&self, name: &str) -> MemoryResult<&[Claim]> {
        self.get_player(name)
            .map(|p| p.claims.as_slice())
            .ok_or_else(|| MemoryError::UnknownPlayer(name.to_string()))
    }

    /// Get a player's record.
    pub fn get_player(&self, name: &str) -> Option<&PlayerRecord> {
        self.index.get(name).map(|&position| &self.players[position])
    }

    /// Check if a player is tracked.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether a known player is alive. `None` if the player is unknown.
    pub fn is_alive(&self, name: &str) -> Option<bool> {
        self.get_player(name).map(|p| p.alive)
    }

    /// All records, in first-seen order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    /// Every vote of the session, oldest first.
    pub fn get_vote_log(&self) -> &[VoteEvent] {
        &self.vote_log
    }

    /// Get the number of tracked players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Owned copy of the whole ledger.
    pub fn get_all_data(&self) -> LedgerSnapshot {
        tracing::trace!(players = self.players.len(), "snapshotting ledger");
        LedgerSnapshot {
            players: self.players.clone(),
            votes: self.vote_log.clone(),
        }
    }
}

fn rank_by_suspicion<'a>(
    players: impl Iterator<Item = &'a PlayerRecord>,
    count: usize,
) -> Vec<String> {
    let mut ranked: Vec<&PlayerRecord> = players.collect();
    // Stable sort, so equal scores stay in first-seen order.
    ranked.sort_by(|a, b| b.suspicion_score.total_cmp(&a.suspicion_score));
    ranked
        .into_iter()
        .take(count)
        .map(|p| p.name.clone())
        .collect()
}

/// Point-in-time copy of a [`PlayerLedger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Records in first-seen order.
    pub players: Vec<PlayerRecord>,

    /// Session vote log.
    pub votes: Vec<VoteEvent>,
}

impl LedgerSnapshot {
    /// Look up a player in the snapshot.
    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
