//! Condensed view of a session for prompt generation.

use serde::{Deserialize, Serialize};
use werewolf_rules::{PhaseTracker, PlayerRole};

use crate::self_state::KeyEvent;

/// What the reasoning process is shown before deciding its next move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub my_name: String,
    pub my_role: PlayerRole,
    pub phase: PhaseTracker,
    pub alive_players: Vec<String>,

    /// Living players other than myself, most suspicious first.
    pub top_suspects: Vec<String>,

    /// Player -> trust level.
    pub alliances: Vec<(String, f64)>,

    /// Player -> reason.
    pub enemies: Vec<(String, String)>,

    /// Latest key events, oldest first.
    pub recent_events: Vec<KeyEvent>,

    /// Player -> latest notes, for players with at least one note.
    pub behavioral_notes: Vec<(String, Vec<String>)>,

    /// Seer results: player -> result.
    pub investigated_players: Vec<(String, Option<String>)>,

    pub protected_players: Vec<String>,
    pub pack_members: Vec<String>,
}

impl StateSummary {
    /// Format the summary as a prompt string.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("## Game State\n");
        prompt.push_str(&format!(
            "I am {} ({}). Phase: {}, Day {}, Night {}\n",
            self.my_name,
            self.my_role,
            self.phase.phase,
            self.phase.day_count,
            self.phase.night_count
        ));
        prompt.push_str(&format!(
            "Alive Players: {}\n",
            join_or_none(self.alive_players.iter().cloned())
        ));
        prompt.push_str(&format!(
            "Most Suspicious Players: {}\n",
            join_or_none(self.top_suspects.iter().cloned())
        ));
        prompt.push_str(&format!(
            "My Alliances: {}\n",
            join_or_none(
                self.alliances
                    .iter()
                    .map(|(player, trust)| format!("{player} (trust: {trust:.1})"))
            )
        ));
        prompt.push_str(&format!(
            "My Enemies: {}\n",
            join_or_none(
                self.enemies
                    .iter()
                    .map(|(player, reason)| format!("{player} ({reason})"))
            )
        ));
        prompt.push('\n');

        if !self.recent_events.is_empty() {
            prompt.push_str("## Recent Events\n");
            for event in &self.recent_events {
                prompt.push_str(&format!("- [{}] {}", event.event_type, event.details));
                if !event.players_involved.is_empty() {
                    prompt.push_str(&format!(
                        " (Players: {})",
                        join_or_none(event.players_involved.iter().cloned())
                    ));
                }
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        if !self.behavioral_notes.is_empty() {
            prompt.push_str("## Behavioral Notes\n");
            for (player, notes) in &self.behavioral_notes {
                prompt.push_str(&format!("- {}: {}\n", player, notes.join("; ")));
            }
            prompt.push('\n');
        }

        if self.my_role.has_night_action() {
            prompt.push_str("## My Night Actions\n");
            match self.my_role {
                PlayerRole::Seer => prompt.push_str(&format!(
                    "Investigated: {}\n",
                    join_or_none(self.investigated_players.iter().map(|(player, result)| {
                        format!("{player} ({})", result.as_deref().unwrap_or("pending"))
                    }))
                )),
                PlayerRole::Doctor => prompt.push_str(&format!(
                    "Protected: {}\n",
                    join_or_none(self.protected_players.iter().cloned())
                )),
                _ => {}
            }
            if self.my_role.is_werewolf() {
                prompt.push_str(&format!(
                    "Pack Members: {}\n",
                    join_or_none(self.pack_members.iter().cloned())
                ));
            }
            prompt.push('\n');
        }

        prompt
    }
}

fn join_or_none(items: impl Iterator<Item = String>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_summary() -> StateSummary {
        StateSummary {
            my_name: "Me".to_string(),
            my_role: PlayerRole::Seer,
            phase: PhaseTracker {
                phase: werewolf_rules::GamePhase::Day,
                day_count: 2,
                night_count: 1,
            },
            alive_players: vec!["Me".to_string(), "Alice".to_string(), "Bob".to_string()],
            top_suspects: vec!["Bob".to_string()],
            alliances: vec![("Alice".to_string(), 0.8)],
            enemies: vec![],
            recent_events: vec![KeyEvent {
                event_type: "elimination".to_string(),
                details: "Carol was eliminated".to_string(),
                players_involved: ["Carol".to_string()].into_iter().collect(),
                timestamp: Utc::now(),
            }],
            behavioral_notes: vec![(
                "Bob".to_string(),
                vec!["Voted for Alice".to_string(), "Defensive".to_string()],
            )],
            investigated_players: vec![
                ("Bob".to_string(), Some("werewolf".to_string())),
                ("Dave".to_string(), None),
            ],
            protected_players: vec![],
            pack_members: vec![],
        }
    }

    #[test]
    fn test_prompt_sections() {
        let prompt = sample_summary().to_prompt_string();

        assert!(prompt.contains("## Game State"));
        assert!(prompt.contains("I am Me (seer). Phase: day, Day 2, Night 1"));
        assert!(prompt.contains("Alive Players: Me, Alice, Bob"));
        assert!(prompt.contains("Most Suspicious Players: Bob"));
        assert!(prompt.contains("My Alliances: Alice (trust: 0.8)"));
        assert!(prompt.contains("My Enemies: None"));
        assert!(prompt.contains("- [elimination] Carol was eliminated (Players: Carol)"));
        assert!(prompt.contains("- Bob: Voted for Alice; Defensive"));
        assert!(prompt.contains("## My Night Actions"));
        assert!(prompt.contains("Investigated: Bob (werewolf), Dave (pending)"));
        assert!(!prompt.contains("Pack Members"));
    }

    #[test]
    fn test_event_without_players() {
        let mut summary = sample_summary();
        summary.recent_events[0].players_involved.clear();
        summary.recent_events[0].event_type = "phase_change".to_string();
        summary.recent_events[0].details = "Day phase began".to_string();

        let prompt = summary.to_prompt_string();
        assert!(prompt.contains("- [phase_change] Day phase began\n"));
    }

    #[test]
    fn test_werewolf_sees_pack() {
        let mut summary = sample_summary();
        summary.my_role = PlayerRole::Werewolf;
        summary.pack_members = vec!["Eve".to_string()];

        let prompt = summary.to_prompt_string();
        assert!(prompt.contains("Pack Members: Eve"));
        assert!(!prompt.contains("Investigated:"));
    }

    #[test]
    fn test_villager_has_no_night_section() {
        let mut summary = sample_summary();
        summary.my_role = PlayerRole::Villager;

        assert!(!summary.to_prompt_string().contains("## My Night Actions"));
    }

    #[test]
    fn test_prompt_skips_empty_sections() {
        let mut summary = sample_summary();
        summary.recent_events.clear();
        summary.behavioral_notes.clear();

        let prompt = summary.to_prompt_string();
        assert!(!prompt.contains("## Recent Events"));
        assert!(!prompt.contains("## Behavioral Notes"));
    }
}
