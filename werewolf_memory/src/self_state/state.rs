//! The assistant's own record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use werewolf_rules::{MonotonicClock, PlayerRole, RoleActionKind, SharedClock, SystemClock};

use super::{
    AllianceEntry, EnemyEntry, KeyEvent, RoleActionEntry, StrategyEntry, ThoughtEntry,
    VoteJustification,
};
use crate::error::{ensure_finite, MemoryResult};
use crate::player_ledger::Claim;

/// Everything the assistant knows about itself.
///
/// Player names referenced here are not checked against the player ledger.
/// An alliance and an enemy mark for the same player never coexist: setting
/// one removes the other.
#[derive(Debug, Clone)]
pub struct SelfState {
    my_name: String,
    my_actual_role: Option<String>,
    my_claimed_role: Option<String>,
    my_claims: Vec<Claim>,
    alliances: BTreeMap<String, AllianceEntry>,
    enemies: BTreeMap<String, EnemyEntry>,
    thought_process: Vec<ThoughtEntry>,
    key_events: Vec<KeyEvent>,
    vote_justifications: Vec<VoteJustification>,
    strategy_history: Vec<StrategyEntry>,
    role_actions: Vec<RoleActionEntry>,

    /// Mirror role, alliance, enemy, vote and strategy updates into the
    /// thought process.
    narrate: bool,

    clock: SharedClock,
}

impl SelfState {
    /// Create an empty self state for `my_name`.
    pub fn new(my_name: impl Into<String>, clock: SharedClock) -> Self {
        Self {
            my_name: my_name.into(),
            my_actual_role: None,
            my_claimed_role: None,
            my_claims: Vec::new(),
            alliances: BTreeMap::new(),
            enemies: BTreeMap::new(),
            thought_process: Vec::new(),
            key_events: Vec::new(),
            vote_justifications: Vec::new(),
            strategy_history: Vec::new(),
            role_actions: Vec::new(),
            narrate: false,
            clock,
        }
    }

    /// Create a self state stamped by the system clock.
    pub fn with_system_clock(my_name: impl Into<String>) -> Self {
        Self::new(my_name, MonotonicClock::shared(Arc::new(SystemClock)))
    }

    /// Enable or disable self-narration into the thought process.
    pub fn with_narration(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }

    pub fn my_name(&self) -> &str {
        &self.my_name
    }

    /// The actual role, parsed. Unknown if unset or unrecognized.
    pub fn actual_role(&self) -> PlayerRole {
        self.my_actual_role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }

    fn narrate(&mut self, reasoning: impl FnOnce() -> String) {
        if self.narrate {
            self.add_thought_process(reasoning(), None);
        }
    }

    /// Set the role the moderator assigned.
    pub fn update_my_role(&mut self, role: impl Into<String>) {
        let role = role.into();
        tracing::debug!(role = %role, "updated my role");
        self.narrate(|| format!("My role is now {role}"));
        self.my_actual_role = Some(role);
    }

    /// Set the role publicly claimed.
    pub fn update_my_claimed_role(&mut self, role: impl Into<String>) {
        let role = role.into();
        tracing::debug!(role = %role, "updated my claimed role");
        self.narrate(|| format!("I have claimed to be the {role}"));
        self.my_claimed_role = Some(role);
    }

    /// Record a statement the assistant made.
    pub fn add_my_claim(&mut self, content: impl Into<String>, channel: impl Into<String>) {
        let claim = Claim::new(content, channel, self.clock.now());
        self.my_claims.push(claim);
    }

    /// Set the trust placed in a player, replacing any previous entry and
    /// clearing any enemy mark.
    pub fn update_alliance(
        &mut self,
        player: &str,
        trust_level: f64,
        reason: Option<String>,
    ) -> MemoryResult<()> {
        let trust_level = ensure_finite("trust_level", trust_level)?;
        tracing::debug!(player, trust_level, "updated alliance");

        if let Some(reason) = &reason {
            self.narrate(|| format!("Trust in {player} is now {trust_level}: {reason}"));
        }
        self.enemies.remove(player);
        self.alliances
            .insert(player.to_string(), AllianceEntry { trust_level, reason });
        Ok(())
    }

    /// Mark a player as an enemy, replacing any previous reason and
    /// dropping any alliance with them.
    pub fn mark_enemy(&mut self, player: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(player, reason = %reason, "marked enemy");

        self.narrate(|| format!("{player} is an enemy: {reason}"));
        self.alliances.remove(player);
        self.enemies.insert(player.to_string(), EnemyEntry { reason });
    }

    /// Record a reasoning step.
    pub fn add_thought_process(&mut self, reasoning: impl Into<String>, context: Option<String>) {
        let entry = ThoughtEntry {
            reasoning: reasoning.into(),
            context,
            timestamp: self.clock.now(),
        };
        self.thought_process.push(entry);
    }

    /// Record an important game event.
    pub fn record_key_event<I, S>(
        &mut self,
        event_type: impl Into<String>,
        details: impl Into<String>,
        players_involved: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let event = KeyEvent {
            event_type: event_type.into(),
            details: details.into(),
            players_involved: players_involved.into_iter().map(Into::into).collect(),
            timestamp: self.clock.now(),
        };
        tracing::debug!(event_type = %event.event_type, "recorded key event");
        self.key_events.push(event);
    }

    /// Record why the assistant voted for `target`.
    pub fn record_vote_justification(&mut self, target: &str, reason: impl Into<String>) {
        let reason = reason.into();
        self.narrate(|| format!("Voted for {target}: {reason}"));
        self.vote_justifications.push(VoteJustification {
            target: target.to_string(),
            reason,
            timestamp: self.clock.now(),
        });
    }

    /// Switch to a new strategy. The latest entry is the current strategy.
    pub fn update_strategy(&mut self, new_strategy: impl Into<String>, reason: impl Into<String>) {
        let strategy = new_strategy.into();
        let reason = reason.into();
        tracing::debug!(strategy = %strategy, "updated strategy");

        self.narrate(|| format!("Changed strategy to {strategy}: {reason}"));
        self.strategy_history.push(StrategyEntry {
            strategy,
            reason,
            timestamp: self.clock.now(),
        });
    }

    /// Record a night action taken with the assistant's role.
    pub fn record_role_action(
        &mut self,
        target: &str,
        action_type: impl Into<String>,
        result: Option<String>,
    ) {
        let performed_as = self.actual_role();
        let entry = RoleActionEntry {
            target: target.to_string(),
            action_type: action_type.into(),
            result,
            performed_as,
            timestamp: self.clock.now(),
        };
        if !performed_as.has_night_action() {
            tracing::warn!(
                role = %performed_as,
                action_type = %entry.action_type,
                "role action recorded for a role without night actions"
            );
        }
        tracing::debug!(player = target, action_type = %entry.action_type, "recorded role action");
        self.role_actions.push(entry);
    }

    /// The current strategy, if one was ever set.
    pub fn current_strategy(&self) -> Option<&StrategyEntry> {
        self.strategy_history.last()
    }

    pub fn alliances(&self) -> &BTreeMap<String, AllianceEntry> {
        &self.alliances
    }

    pub fn enemies(&self) -> &BTreeMap<String, EnemyEntry> {
        &self.enemies
    }

    pub fn key_events(&self) -> &[KeyEvent] {
        &self.key_events
    }

    pub fn thought_process(&self) -> &[ThoughtEntry] {
        &self.thought_process
    }

    /// Role actions of `kind` that the role held when recording was entitled to.
    fn actions_of(&self, kind: RoleActionKind) -> impl Iterator<Item = &RoleActionEntry> {
        self.role_actions
            .iter()
            .filter(move |a| a.kind() == kind && a.is_entitled())
    }

    /// Seer investigations: target -> latest result.
    pub fn investigated_players(&self) -> BTreeMap<String, Option<String>> {
        self.actions_of(RoleActionKind::Investigate)
            .map(|a| (a.target.clone(), a.result.clone()))
            .collect()
    }

    /// Players protected as doctor, in order (repeats kept).
    pub fn protected_players(&self) -> Vec<String> {
        self.actions_of(RoleActionKind::Protect)
            .map(|a| a.target.clone())
            .collect()
    }

    /// Fellow werewolves revealed to the assistant, without repeats.
    pub fn pack_members(&self) -> Vec<String> {
        let mut members: Vec<String> = Vec::new();
        for action in self.actions_of(RoleActionKind::RevealPack) {
            if !members.contains(&action.target) {
                members.push(action.target.clone());
            }
        }
        members
    }

    /// Owned copy of the whole self state.
    pub fn get_my_state(&self) -> SelfStateSnapshot {
        tracing::trace!("snapshotting self state");
        SelfStateSnapshot {
            my_name: self.my_name.clone(),
            my_actual_role: self.my_actual_role.clone(),
            my_claimed_role: self.my_claimed_role.clone(),
            revealed_role: self.my_claimed_role.is_some(),
            my_claims: self.my_claims.clone(),
            alliances: self.alliances.clone(),
            enemies: self.enemies.clone(),
            thought_process: self.thought_process.clone(),
            key_events: self.key_events.clone(),
            vote_justifications: self.vote_justifications.clone(),
            strategy: self.current_strategy().map(|s| s.strategy.clone()),
            strategy_history: self.strategy_history.clone(),
            role_actions: self.role_actions.clone(),
            investigated_players: self.investigated_players(),
            protected_players: self.protected_players(),
            pack_members: self.pack_members(),
        }
    }
}

/// Point-in-time copy of a [`SelfState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfStateSnapshot {
    pub my_name: String,
    pub my_actual_role: Option<String>,
    pub my_claimed_role: Option<String>,

    /// Whether a role has been publicly claimed.
    pub revealed_role: bool,

    pub my_claims: Vec<Claim>,
    pub alliances: BTreeMap<String, AllianceEntry>,
    pub enemies: BTreeMap<String, EnemyEntry>,
    pub thought_process: Vec<ThoughtEntry>,
    pub key_events: Vec<KeyEvent>,
    pub vote_justifications: Vec<VoteJustification>,

    /// The latest strategy, or `None` if none was ever set.
    pub strategy: Option<String>,

    pub strategy_history: Vec<StrategyEntry>,
    pub role_actions: Vec<RoleActionEntry>,

    // Views derived from role_actions.
    pub investigated_players: BTreeMap<String, Option<String>>,
    pub protected_players: Vec<String>,
    pub pack_members: Vec<String>,
}

impl SelfStateSnapshot {
    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemoryError;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use werewolf_rules::ManualClock;

    fn state_with_clock() -> (SelfState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (SelfState::new("Me", clock.clone()), clock)
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SelfState::with_system_clock("Me");
        let snapshot = state.get_my_state();

        assert_eq!(snapshot.my_name, "Me");
        assert!(snapshot.my_actual_role.is_none());
        assert!(!snapshot.revealed_role);
        assert!(snapshot.strategy.is_none());
        assert!(snapshot.thought_process.is_empty());
        assert_eq!(state.actual_role(), PlayerRole::Unknown);
    }

    #[test]
    fn test_roles_last_write_wins() {
        let (mut state, _) = state_with_clock();

        state.update_my_role("villager");
        state.update_my_role("seer");
        state.update_my_claimed_role("doctor");

        let snapshot = state.get_my_state();
        assert_eq!(snapshot.my_actual_role.as_deref(), Some("seer"));
        assert_eq!(snapshot.my_claimed_role.as_deref(), Some("doctor"));
        assert!(snapshot.revealed_role);
        assert_eq!(state.actual_role(), PlayerRole::Seer);
    }

    #[test]
    fn test_my_claims_append() {
        let (mut state, clock) = state_with_clock();

        state.add_my_claim("I am a villager", "play-arena");
        clock.advance(Duration::seconds(10));
        state.add_my_claim("Bob is lying", "play-arena");

        let claims = state.get_my_state().my_claims;
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[1].content, "Bob is lying");
        assert!(claims[0].timestamp < claims[1].timestamp);
    }

    #[test]
    fn test_alliance_overwrites() {
        let (mut state, _) = state_with_clock();

        state
            .update_alliance("Alice", 7.0, Some("trusted".to_string()))
            .unwrap();
        state
            .update_alliance("Alice", 2.0, Some("reconsidered".to_string()))
            .unwrap();

        let snapshot = state.get_my_state();
        let entry = &snapshot.alliances["Alice"];
        assert_eq!(entry.trust_level, 2.0);
        assert_eq!(entry.reason.as_deref(), Some("reconsidered"));
    }

    #[test]
    fn test_alliance_rejects_nan() {
        let (mut state, _) = state_with_clock();

        let result = state.update_alliance("Alice", f64::NAN, None);

        assert!(matches!(result, Err(MemoryError::InvalidArgument { argument: "trust_level", .. })));
        assert!(state.alliances().is_empty());
    }

    #[test]
    fn test_enemy_clears_alliance() {
        let (mut state, _) = state_with_clock();

        state.update_alliance("Bob", 0.9, None).unwrap();
        state.mark_enemy("Bob", "voted against me twice");

        assert!(!state.alliances().contains_key("Bob"));
        assert_eq!(state.enemies()["Bob"].reason, "voted against me twice");
    }

    #[test]
    fn test_alliance_clears_enemy() {
        let (mut state, _) = state_with_clock();

        state.mark_enemy("Bob", "accused me");
        state.mark_enemy("Bob", "accused me again");
        assert_eq!(state.enemies()["Bob"].reason, "accused me again");

        state.update_alliance("Bob", 0.4, Some("apologized".to_string())).unwrap();

        assert!(state.enemies().is_empty());
        assert_eq!(state.alliances()["Bob"].trust_level, 0.4);
    }

    #[test]
    fn test_logs_append_with_timestamps() {
        let (mut state, clock) = state_with_clock();

        state.add_thought_process("Bob is quiet", Some("day 1".to_string()));
        clock.advance(Duration::seconds(1));
        state.record_key_event("elimination", "Carol was eliminated", ["Carol"]);
        clock.advance(Duration::seconds(1));
        state.record_vote_justification("Bob", "too quiet");
        state.record_role_action("Dave", "protect", None);

        let snapshot = state.get_my_state();
        assert_eq!(snapshot.thought_process[0].context.as_deref(), Some("day 1"));
        assert_eq!(snapshot.key_events[0].event_type, "elimination");
        assert!(snapshot.key_events[0].players_involved.contains("Carol"));
        assert_eq!(snapshot.vote_justifications[0].target, "Bob");
        assert_eq!(snapshot.role_actions[0].action_type, "protect");
        assert!(snapshot.thought_process[0].timestamp < snapshot.key_events[0].timestamp);
        assert!(snapshot.key_events[0].timestamp < snapshot.vote_justifications[0].timestamp);
    }

    #[test]
    fn test_current_strategy_is_latest() {
        let (mut state, _) = state_with_clock();

        state.update_strategy("observe", "too early to tell");
        state.update_strategy("defend seer", "claim consistent");

        let snapshot = state.get_my_state();
        assert_eq!(snapshot.strategy.as_deref(), Some("defend seer"));
        assert_eq!(snapshot.strategy_history.len(), 2);
        assert_eq!(state.current_strategy().unwrap().reason, "claim consistent");
    }

    #[test]
    fn test_narration_disabled_by_default() {
        let (mut state, _) = state_with_clock();

        state.update_my_role("seer");
        state.mark_enemy("Bob", "lied");
        state.update_strategy("hide", "wolves are hunting seers");

        assert!(state.thought_process().is_empty());
    }

    #[test]
    fn test_narration_mirrors_updates() {
        let (state, _) = state_with_clock();
        let mut state = state.with_narration(true);

        state.update_my_role("seer");
        state.update_alliance("Alice", 0.8, None).unwrap();
        state.update_alliance("Alice", 0.9, Some("backed my claim".to_string())).unwrap();
        state.mark_enemy("Bob", "lied");
        state.record_vote_justification("Bob", "lied about role");
        state.update_strategy("hide", "wolves are hunting seers");

        let thoughts: Vec<_> = state
            .thought_process()
            .iter()
            .map(|t| t.reasoning.as_str())
            .collect();
        assert_eq!(
            thoughts,
            vec![
                "My role is now seer",
                "Trust in Alice is now 0.9: backed my claim",
                "Bob is an enemy: lied",
                "Voted for Bob: lied about role",
                "Changed strategy to hide: wolves are hunting seers",
            ]
        );
    }

    #[test]
    fn test_seer_investigations() {
        let (mut state, _) = state_with_clock();
        state.update_my_role("seer");

        state.record_role_action("Alice", "investigate", Some("villager".to_string()));
        state.record_role_action("Bob", "investigate", None);
        state.record_role_action("Bob", "investigate", Some("werewolf".to_string()));
        state.record_role_action("Carol", "protect", None);

        let investigated = state.investigated_players();
        assert_eq!(investigated.len(), 2);
        assert_eq!(investigated["Bob"].as_deref(), Some("werewolf"));
        assert!(state.protected_players().is_empty());
    }

    #[test]
    fn test_investigations_survive_role_change() {
        let (mut state, _) = state_with_clock();
        state.record_role_action("Alice", "investigate", Some("villager".to_string()));
        state.update_my_role("seer");
        state.record_role_action("Bob", "investigate", Some("werewolf".to_string()));
        state.update_my_role("villager");

        let investigated = state.investigated_players();
        assert_eq!(investigated.len(), 1);
        assert_eq!(investigated["Bob"].as_deref(), Some("werewolf"));
        assert_eq!(state.get_my_state().role_actions[0].performed_as, PlayerRole::Unknown);
    }

    #[test]
    fn test_doctor_and_werewolf_views() {
        let (mut doctor, _) = state_with_clock();
        doctor.update_my_role("doctor");
        doctor.record_role_action("Alice", "protect", None);
        doctor.record_role_action("Alice", "protect", None);
        assert_eq!(doctor.protected_players(), vec!["Alice", "Alice"]);

        let (mut wolf, _) = state_with_clock();
        wolf.update_my_role("werewolf");
        wolf.record_role_action("Bob", "reveal_pack", None);
        wolf.record_role_action("Bob", "reveal_pack", None);
        wolf.record_role_action("Carol", "target_for_elimination", None);

        let snapshot = wolf.get_my_state();
        assert_eq!(snapshot.pack_members, vec!["Bob"]);
        assert_eq!(snapshot.role_actions.len(), 3);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let (mut state, _) = state_with_clock();
        state.update_strategy("observe", "day one");
        let snapshot = state.get_my_state();

        state.update_strategy("accuse", "caught a lie");
        state.mark_enemy("Bob", "lied");
        state.add_thought_process("Bob is a wolf", None);

        assert_eq!(snapshot.strategy.as_deref(), Some("observe"));
        assert!(snapshot.enemies.is_empty());
        assert!(snapshot.thought_process.is_empty());
    }

    #[test]
    fn test_snapshot_json_export() {
        let (mut state, _) = state_with_clock();
        state.update_alliance("Alice", 0.7, None).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&state.get_my_state().to_json().unwrap()).unwrap();

        assert_eq!(json["my_name"], "Me");
        assert_eq!(json["alliances"]["Alice"]["trust_level"], 0.7);
        assert!(json["strategy"].is_null());
    }
}
