//! The assistant - owner of one session's memory.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use werewolf_rules::{MonotonicClock, PhaseTracker, SharedClock, SystemClock};

use crate::config::MemoryConfig;
use crate::player_ledger::PlayerLedger;
use crate::query::{QueryLayer, SessionSnapshot, StateSummary};
use crate::self_state::SelfState;

/// Unique identifier for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's memory of one game.
///
/// Both stores are created empty here, share one clock, and are dropped with
/// the assistant at the end of the session.
#[derive(Debug)]
pub struct Assistant {
    session_id: SessionId,
    config: MemoryConfig,
    phase: PhaseTracker,
    ledger: PlayerLedger,
    self_state: SelfState,
}

impl Assistant {
    /// Create an assistant with default configuration and the system clock.
    pub fn new(my_name: impl Into<String>) -> Self {
        Self::with_config(my_name, MemoryConfig::default())
    }

    /// Create an assistant with the given configuration and the system clock.
    pub fn with_config(my_name: impl Into<String>, config: MemoryConfig) -> Self {
        Self::with_clock(my_name, config, Arc::new(SystemClock))
    }

    /// Create an assistant stamped by `clock`.
    ///
    /// The clock is wrapped so timestamps never decrease across the session.
    pub fn with_clock(my_name: impl Into<String>, config: MemoryConfig, clock: SharedClock) -> Self {
        let my_name = my_name.into();
        let clock = MonotonicClock::shared(clock);
        let session_id = SessionId::new();

        let mut ledger = PlayerLedger::new(clock.clone());
        ledger.initialize_player(&my_name);
        let self_state = SelfState::new(my_name, clock).with_narration(config.narrate_self_updates);

        tracing::info!(%session_id, me = self_state.my_name(), "started session");
        Self {
            session_id,
            config,
            phase: PhaseTracker::new(),
            ledger,
            self_state,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn phase(&self) -> PhaseTracker {
        self.phase
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut PlayerLedger {
        &mut self.ledger
    }

    pub fn self_state(&self) -> &SelfState {
        &self.self_state
    }

    pub fn self_state_mut(&mut self) -> &mut SelfState {
        &mut self.self_state
    }

    /// Read-only view over both stores.
    pub fn query(&self) -> QueryLayer<'_> {
        QueryLayer::new(&self.ledger, &self.self_state)
    }

    /// The configured number of top suspects, dead or alive.
    pub fn top_suspects(&self) -> Vec<String> {
        self.ledger
            .get_most_suspicious_players(self.config.default_suspect_count)
    }

    /// Enter the night phase, logging a key event if the phase changed.
    pub fn begin_night(&mut self) {
        if self.phase.begin_night() {
            tracing::info!(night = self.phase.night_count, "night phase began");
            self.self_state
                .record_key_event("phase_change", "Night phase began", Vec::<String>::new());
        }
    }

    /// Enter the day phase, logging a key event if the phase changed.
    pub fn begin_day(&mut self) {
        if self.phase.begin_day() {
            tracing::info!(day = self.phase.day_count, "day phase began");
            self.self_state
                .record_key_event("phase_change", "Day phase began", Vec::<String>::new());
        }
    }

    /// Record a moderator-announced elimination.
    ///
    /// The key event is logged only the first time a player dies.
    pub fn record_elimination(&mut self, player: &str) {
        if self.ledger.mark_player_dead(player) {
            self.self_state.record_key_event(
                "elimination",
                format!("{player} was eliminated"),
                [player],
            );
        }
    }

    /// Condensed state for the next decision, sized by the configuration.
    pub fn summary(&self) -> StateSummary {
        self.query().summarize(self.phase, &self.config)
    }

    /// Export everything recorded so far.
    pub fn export(&self) -> SessionExport {
        SessionExport {
            session_id: self.session_id,
            phase: self.phase,
            snapshot: self.query().session_snapshot(),
        }
    }
}

/// End-of-session dump for analysis or debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub session_id: SessionId,
    pub phase: PhaseTracker,
    pub snapshot: SessionSnapshot,
}

impl SessionExport {
    /// Serialize the export as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
