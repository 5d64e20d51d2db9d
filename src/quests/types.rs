use crate::character::Character;
use crate::core::error::{GameError, GameResult};
use crate::items::{catalog, Item, ItemId};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub description: String,
    pub target: u32,
    pub current: u32,
    pub completed: bool,
    /// When set, defeating a character with this name advances the objective
    #[serde(default)]
    pub defeat_target: Option<String>,
}

impl Objective {
    pub fn new(description: impl Into<String>, target: u32) -> Self {
        Self {
            description: description.into(),
            target,
            current: 0,
            completed: target == 0,
            defeat_target: None,
        }
    }

    /// An objective that counts defeats of the named character.
    pub fn defeat(name: impl Into<String>, count: u32) -> Self {
        let name = name.into();
        let mut objective = Self::new(format!("Defeat {name}"), count);
        objective.defeat_target = Some(name);
        objective
    }

    /// Adds progress, clamped at the target.
    pub fn progress(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.target);
        if self.current == self.target {
            self.completed = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Experience(u32),
    Gold(u32),
    Item(Item),
}

impl Reward {
    pub fn describe(&self) -> String {
        match self {
            Reward::Experience(amount) => format!("{amount} experience"),
            Reward::Gold(amount) => format!("{amount} gold"),
            Reward::Item(item) => item.name.clone(),
        }
    }
}

/// What completing a quest paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest: String,
    pub experience: u32,
    pub levels_gained: u32,
    /// Ids of the reward items now in the hero's inventory
    pub items: Vec<ItemId>,
}

/// A quest is only completed by an explicit [`Quest::complete`] call, and
/// only once every objective is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub description: String,
    pub objectives: Vec<Objective>,
    pub rewards: Vec<Reward>,
    pub completed: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            objectives: Vec::new(),
            rewards: Vec::new(),
            completed: false,
        }
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.rewards.push(reward);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn all_objectives_complete(&self) -> bool {
        self.objectives.iter().all(|objective| objective.completed)
    }

    /// Adds progress to one objective. Returns false for an out of range
    /// index or a quest that is already completed. Never completes the
    /// quest itself.
    pub fn update_objective(&mut self, index: usize, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        let Some(objective) = self.objectives.get_mut(index) else {
            return false;
        };
        objective.progress(amount);
        true
    }

    /// Advances open objectives that target `defeated`.
    pub fn record_defeat(&mut self, defeated: &str) -> usize {
        if self.completed {
            return 0;
        }
        let mut advanced = 0;
        for objective in &mut self.objectives {
            if !objective.completed && objective.defeat_target.as_deref() == Some(defeated) {
                objective.progress(1);
                advanced += 1;
            }
        }
        advanced
    }

    /// "description: current/target" per objective.
    pub fn progress_lines(&self) -> Vec<String> {
        self.objectives
            .iter()
            .map(|o| format!("{}: {}/{}", o.description, o.current, o.target))
            .collect()
    }

    pub fn reward_description(&self) -> String {
        if self.rewards.is_empty() {
            return "None".to_string();
        }
        self.rewards
            .iter()
            .map(Reward::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Marks the quest completed and grants its rewards to `character`.
    ///
    /// Fails without changing anything if an objective is still open, the
    /// quest was already completed, or the inventory lacks room for the
    /// reward items.
    pub fn complete(&mut self, character: &mut Character) -> GameResult<QuestCompletion> {
        if self.completed {
            return Err(GameError::InvalidOperation(format!(
                "quest '{}' is already completed",
                self.name
            )));
        }
        if !self.all_objectives_complete() {
            return Err(GameError::InvalidOperation(format!(
                "quest '{}' still has open objectives",
                self.name
            )));
        }

        let item_rewards = self
            .rewards
            .iter()
            .filter(|reward| !matches!(reward, Reward::Experience(_)))
            .count();
        let free = character.inventory().free_slots();
        if item_rewards > free {
            return Err(GameError::CapacityExceeded(format!(
                "quest '{}' rewards {item_rewards} item(s) but only {free} slot(s) are free",
                self.name
            )));
        }

        let mut completion = QuestCompletion {
            quest: self.name.clone(),
            experience: 0,
            levels_gained: 0,
            items: Vec::new(),
        };
        for reward in &self.rewards {
            match reward {
                Reward::Experience(amount) => {
                    completion.experience = completion.experience.saturating_add(*amount);
                }
                Reward::Gold(amount) => {
                    let id = character.inventory_mut().try_add_item(catalog::gold(*amount))?;
                    completion.items.push(id);
                }
                Reward::Item(item) => {
                    let id = character.inventory_mut().try_add_item(item.clone())?;
                    completion.items.push(id);
                }
            }
        }
        let experience = i32::try_from(completion.experience).unwrap_or(i32::MAX);
        completion.levels_gained = character.gain_experience(experience)?;
        self.completed = true;

        info!(
            quest = %self.name,
            character = %character.name(),
            experience = completion.experience,
            items = completion.items.len(),
            "quest completed"
        );
        Ok(completion)
    }
}
