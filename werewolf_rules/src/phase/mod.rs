//! Day/night phase tracking.

use serde::{Deserialize, Serialize};

/// The phase a session is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Before the moderator announces the first phase.
    #[default]
    Pregame,
    Day,
    Night,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Pregame => "pregame",
            GamePhase::Day => "day",
            GamePhase::Night => "night",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counts days and nights as the moderator announces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PhaseTracker {
    pub phase: GamePhase,
    pub day_count: u32,
    pub night_count: u32,
}

impl PhaseTracker {
    /// Create a tracker in the pregame phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the night phase.
    ///
    /// Returns `false` (and counts nothing) if it is already night, so a
    /// repeated announcement does not skip a night.
    pub fn begin_night(&mut self) -> bool {
        if self.phase == GamePhase::Night {
            return false;
        }
        self.phase = GamePhase::Night;
        self.night_count += 1;
        true
    }

    /// Enter the day phase. Returns `false` if it is already day.
    pub fn begin_day(&mut self) -> bool {
        if self.phase == GamePhase::Day {
            return false;
        }
        self.phase = GamePhase::Day;
        self.day_count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_pregame() {
        let tracker = PhaseTracker::new();
        assert_eq!(tracker.phase, GamePhase::Pregame);
        assert_eq!(tracker.day_count, 0);
        assert_eq!(tracker.night_count, 0);
    }

    #[test]
    fn test_phase_alternation() {
        let mut tracker = PhaseTracker::new();

        assert!(tracker.begin_night());
        assert_eq!(tracker.phase, GamePhase::Night);
        assert!(tracker.begin_day());
        assert!(tracker.begin_night());

        assert_eq!(tracker.night_count, 2);
        assert_eq!(tracker.day_count, 1);
    }

    #[test]
    fn test_repeated_announcement_is_ignored() {
        let mut tracker = PhaseTracker::new();
        tracker.begin_day();

        assert!(!tracker.begin_day());
        assert_eq!(tracker.day_count, 1);
    }
}
