use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::items::ItemId;

/// Encounter state machine. Every state but `Ongoing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    Ongoing,
    PlayerWon,
    PlayerLost,
    Fled,
}

impl EncounterState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EncounterState::Ongoing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EncounterState::Ongoing => "ongoing",
            EncounterState::PlayerWon => "player won",
            EncounterState::PlayerLost => "player lost",
            EncounterState::Fled => "fled",
        }
    }
}

/// What the player chooses to do this turn. `target` indexes the
/// encounter's opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack { target: usize },
    /// Hero attacks and the sidekick fires its special ability at the target
    SidekickSpecial { target: usize },
    UseItem { item: ItemId },
    Flee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    CriticalHit,
    SpecialAbility,
    UseItem,
    Poisoned,
    Frozen,
    Defeated,
    ExtraAction,
    LevelUp,
    Flee,
}

/// One step of an encounter, for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub round: u32,
    pub actor: String,
    pub action: CombatAction,
    pub target: Option<String>,
    pub amount: u32,
    pub result: String,
}

impl CombatEvent {
    pub fn new(round: u32, actor: &str, action: CombatAction) -> Self {
        Self {
            round,
            actor: actor.to_string(),
            action,
            target: None,
            amount: 0,
            result: String::new(),
        }
    }

    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }
}

/// Everything an encounter hands back once it is over.
#[derive(Debug, Clone)]
pub struct EncounterOutcome {
    pub state: EncounterState,
    pub player: Player,
    pub experience_awarded: u32,
    pub events: Vec<CombatEvent>,
}
