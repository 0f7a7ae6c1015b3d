//! Claims and votes - immutable timestamped observations.

use serde::{Deserialize, Serialize};
use werewolf_rules::Timestamp;

/// Something a player was recorded as having said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub content: String,

    /// Label of the channel the claim arrived on.
    pub channel: String,

    pub timestamp: Timestamp,
}

impl Claim {
    pub fn new(content: impl Into<String>, channel: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            content: content.into(),
            channel: channel.into(),
            timestamp,
        }
    }
}

/// A single vote cast during a day phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    pub voter: String,
    pub target: String,
    pub timestamp: Timestamp,
}

impl VoteEvent {
    pub fn new(voter: impl Into<String>, target: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            voter: voter.into(),
            target: target.into(),
            timestamp,
        }
    }
}
