//! Entry types stored in the self-state logs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use werewolf_rules::{PlayerRole, RoleActionKind, Timestamp};

/// Trust the assistant places in another player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceEntry {
    pub trust_level: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyEntry {
    pub reason: String,
}

/// One step of recorded reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtEntry {
    pub reasoning: String,
    pub context: Option<String>,
    pub timestamp: Timestamp,
}

/// A game event worth remembering (elimination, phase change, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub event_type: String,
    pub details: String,
    pub players_involved: BTreeSet<String>,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteJustification {
    pub target: String,
    pub reason: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub strategy: String,
    pub reason: String,
    pub timestamp: Timestamp,
}

/// A night action taken by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleActionEntry {
    pub target: String,
    /// Free-text action type, e.g. `investigate` or `protect`.
    pub action_type: String,
    pub result: Option<String>,
    /// The assistant's actual role when the action was recorded.
    pub performed_as: PlayerRole,
    pub timestamp: Timestamp,
}

impl RoleActionEntry {
    /// Classify the free-text action type.
    pub fn kind(&self) -> RoleActionKind {
        RoleActionKind::parse(&self.action_type)
    }

    /// Whether the role held at the time was entitled to this action.
    pub fn is_entitled(&self) -> bool {
        self.kind().performed_by() == Some(self.performed_as)
    }
}
