//! Query Layer - read-only questions answered over both stores.
//!
//! The layer borrows the [`PlayerLedger`] and the [`SelfState`] immutably, so
//! nothing answered here can change what is stored.

mod summary;

pub use summary::*;

use serde::{Deserialize, Serialize};
use werewolf_rules::PhaseTracker;

use crate::config::MemoryConfig;
use crate::error::MemoryResult;
use crate::player_ledger::{Claim, LedgerSnapshot, PlayerLedger};
use crate::self_state::{SelfState, SelfStateSnapshot};

/// Read-only façade over a session's stores.
#[derive(Debug, Clone, Copy)]
pub struct QueryLayer<'a> {
    ledger: &'a PlayerLedger,
    self_state: &'a SelfState,
}

impl<'a> QueryLayer<'a> {
    pub fn new(ledger: &'a PlayerLedger, self_state: &'a SelfState) -> Self {
        Self { ledger, self_state }
    }

    /// Living players, in first-seen order.
    pub fn alive_players(&self) -> Vec<String> {
        self.ledger.get_alive_players()
    }

    /// Up to `count` players ranked by suspicion.
    pub fn top_suspects(&self, count: usize) -> Vec<String> {
        self.ledger.get_most_suspicious_players(count)
    }

    /// Up to `count` living players ranked by suspicion.
    pub fn top_alive_suspects(&self, count: usize) -> Vec<String> {
        self.ledger.get_most_suspicious_alive_players(count)
    }

    /// A player's claims, oldest first.
    pub fn player_claims(&self, name: &str) -> MemoryResult<&'a [Claim]> {
        self.ledger.get_player_claims(name)
    }

    pub fn all_data(&self) -> LedgerSnapshot {
        self.ledger.get_all_data()
    }

    pub fn my_state(&self) -> SelfStateSnapshot {
        self.self_state.get_my_state()
    }

    /// Both snapshots taken together.
    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            players: self.all_data(),
            me: self.my_state(),
        }
    }

    /// Condense the session into what the reasoning process needs for its
    /// next decision, sized by `config`.
    ///
    /// Suspects are living players other than the assistant itself. Only the
    /// latest key events and behavioral notes are kept.
    pub fn summarize(&self, phase: PhaseTracker, config: &MemoryConfig) -> StateSummary {
        let my_name = self.self_state.my_name();
        let events = self.self_state.key_events();
        let recent_events = latest(events, config.summary_event_window).to_vec();

        StateSummary {
            my_name: my_name.to_string(),
            my_role: self.self_state.actual_role(),
            phase,
            alive_players: self.alive_players(),
            top_suspects: self
                .top_alive_suspects(self.ledger.len())
                .into_iter()
                .filter(|name| name != my_name)
                .take(config.default_suspect_count)
                .collect(),
            alliances: self
                .self_state
                .alliances()
                .iter()
                .map(|(player, entry)| (player.clone(), entry.trust_level))
                .collect(),
            enemies: self
                .self_state
                .enemies()
                .iter()
                .map(|(player, entry)| (player.clone(), entry.reason.clone()))
                .collect(),
            recent_events,
            behavioral_notes: self
                .ledger
                .players()
                .filter(|p| !p.behavioral_notes.is_empty())
                .map(|p| {
                    let notes = latest(&p.behavioral_notes, config.summary_notes_per_player);
                    (p.name.clone(), notes.to_vec())
                })
                .collect(),
            investigated_players: self.self_state.investigated_players().into_iter().collect(),
            protected_players: self.self_state.protected_players(),
            pack_members: self.self_state.pack_members(),
        }
    }
}

/// The last `window` items of `items`.
fn latest<T>(items: &[T], window: usize) -> &[T] {
    &items[items.len().saturating_sub(window)..]
}

/// Point-in-time copy of both stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub players: LedgerSnapshot,
    pub me: SelfStateSnapshot,
}

impl SessionSnapshot {
    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
