//! Roles and role actions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a role name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role: {0}")]
pub struct RoleParseError(pub String);

/// Roles a player can hold in a Werewolf game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    #[default]
    Unknown,
    Villager,
    Werewolf,
    Seer,
    Doctor,
}

impl PlayerRole {
    /// Canonical lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::Unknown => "unknown",
            PlayerRole::Villager => "villager",
            PlayerRole::Werewolf => "werewolf",
            PlayerRole::Seer => "seer",
            PlayerRole::Doctor => "doctor",
        }
    }

    /// Whether the role belongs to the werewolf team.
    pub fn is_werewolf(&self) -> bool {
        matches!(self, PlayerRole::Werewolf)
    }

    /// Whether the role has a night action of its own.
    pub fn has_night_action(&self) -> bool {
        matches!(
            self,
            PlayerRole::Werewolf | PlayerRole::Seer | PlayerRole::Doctor
        )
    }
}

impl FromStr for PlayerRole {
    type Err = RoleParseError;

    /// Parses a role name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(PlayerRole::Unknown),
            "villager" => Ok(PlayerRole::Villager),
            "werewolf" | "wolf" => Ok(PlayerRole::Werewolf),
            "seer" => Ok(PlayerRole::Seer),
            "doctor" => Ok(PlayerRole::Doctor),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds of role-specific night actions.
///
/// Action types arrive as free text; anything not recognized is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleActionKind {
    /// Seer checks a player's alignment.
    Investigate,
    /// Doctor shields a player from elimination.
    Protect,
    /// Werewolf learns a fellow pack member.
    RevealPack,
    /// Werewolf nominates a night victim.
    TargetForElimination,
    Other(String),
}

impl RoleActionKind {
    /// Classify a free-text action type.
    pub fn parse(action_type: &str) -> Self {
        match action_type.trim().to_ascii_lowercase().as_str() {
            "investigate" => RoleActionKind::Investigate,
            "protect" => RoleActionKind::Protect,
            "reveal_pack" => RoleActionKind::RevealPack,
            "target_for_elimination" => RoleActionKind::TargetForElimination,
            _ => RoleActionKind::Other(action_type.to_string()),
        }
    }

    /// The role entitled to perform this action, if any.
    pub fn performed_by(&self) -> Option<PlayerRole> {
        match self {
            RoleActionKind::Investigate => Some(PlayerRole::Seer),
            RoleActionKind::Protect => Some(PlayerRole::Doctor),
            RoleActionKind::RevealPack | RoleActionKind::TargetForElimination => {
                Some(PlayerRole::Werewolf)
            }
            RoleActionKind::Other(_) => None,
        }
    }
}
