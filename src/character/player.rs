use crate::core::config::GameConfig;
use crate::core::error::{GameError, GameResult};
use crate::quests::{Quest, QuestCompletion};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::{Character, GrowthRates, Role};

/// The hero together with what only the hero owns: an optional sidekick
/// and the quest log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    hero: Character,
    sidekick: Option<Character>,
    quests: Vec<Quest>,
}

impl Player {
    /// Creates a level 1 hero from the configured starting stats.
    pub fn new(name: impl Into<String>, config: &GameConfig) -> GameResult<Self> {
        let hero = Character::new(
            name,
            Role::Player,
            config.starting_health,
            config.starting_damage,
        )?
        .with_inventory_slots(config.max_inventory_slots)
        .with_growth(GrowthRates {
            health_pct: config.level_up_health_pct,
            damage_pct: config.level_up_damage_pct,
        });
        Ok(Self::from_character(hero))
    }

    pub fn from_character(hero: Character) -> Self {
        Self {
            hero,
            sidekick: None,
            quests: Vec::new(),
        }
    }

    pub fn character(&self) -> &Character {
        &self.hero
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.hero
    }

    pub fn name(&self) -> &str {
        self.hero.name()
    }

    pub fn sidekick(&self) -> Option<&Character> {
        self.sidekick.as_ref()
    }

    pub fn sidekick_mut(&mut self) -> Option<&mut Character> {
        self.sidekick.as_mut()
    }

    /// Attaches a sidekick, returning the one it replaces.
    pub fn recruit_sidekick(&mut self, sidekick: Character) -> GameResult<Option<Character>> {
        if !matches!(sidekick.role(), Role::Sidekick { .. }) {
            return Err(GameError::InvalidArgument(format!(
                "{} is a {}, not a sidekick",
                sidekick.name(),
                sidekick.role().name()
            )));
        }
        info!(hero = %self.hero.name(), sidekick = %sidekick.name(), "sidekick recruited");
        Ok(self.sidekick.replace(sidekick))
    }

    pub fn dismiss_sidekick(&mut self) -> Option<Character> {
        self.sidekick.take()
    }

    pub fn check_invariants(&self) -> GameResult<()> {
        self.hero.check_invariants()?;
        if let Some(sidekick) = &self.sidekick {
            sidekick.check_invariants()?;
        }
        Ok(())
    }

    /// Split borrow of hero and sidekick for the encounter loop.
    pub(crate) fn party_mut(&mut self) -> (&mut Character, Option<&mut Character>) {
        (&mut self.hero, self.sidekick.as_mut())
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, name: &str) -> Option<&Quest> {
        self.quests.iter().find(|quest| quest.name == name)
    }

    /// Adds a quest to the log. Returns false if one with the same name is
    /// already there.
    pub fn accept_quest(&mut self, quest: Quest) -> bool {
        if self.quest(&quest.name).is_some() {
            return false;
        }
        info!(quest = %quest.name, "quest accepted");
        self.quests.push(quest);
        true
    }

    pub fn update_quest_objective(&mut self, quest: &str, index: usize, amount: u32) -> bool {
        self.quests
            .iter_mut()
            .find(|q| q.name == quest)
            .is_some_and(|q| q.update_objective(index, amount))
    }

    /// Completes a quest and pays its rewards to the hero.
    pub fn complete_quest(&mut self, name: &str) -> GameResult<QuestCompletion> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.name == name)
            .ok_or_else(|| GameError::NotFound(format!("quest '{name}'")))?;
        quest.complete(&mut self.hero)
    }

    /// Advances every open objective that targets `defeated`. Returns how
    /// many objectives moved.
    pub fn record_defeat(&mut self, defeated: &str) -> usize {
        self.quests
            .iter_mut()
            .map(|quest| quest.record_defeat(defeated))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::roster;
    use crate::quests::{Objective, Reward};

    fn player() -> Player {
        Player::new("Hero", &GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_uses_config() {
        let config = GameConfig {
            starting_health: 150,
            starting_damage: 12,
            max_inventory_slots: 4,
            ..Default::default()
        };
        let p = Player::new("Aria", &config).unwrap();
        assert_eq!(p.character().max_health(), 150);
        assert_eq!(p.character().base_damage(), 12);
        assert_eq!(p.character().inventory().max_slots(), 4);
        assert_eq!(p.character().role(), Role::Player);
        assert!(p.sidekick().is_none());
    }

    #[test]
    fn test_recruit_only_sidekicks() {
        let mut p = player();
        let villain = roster::villain("Thug", 1).unwrap();
        assert!(matches!(
            p.recruit_sidekick(villain),
            Err(GameError::InvalidArgument(_))
        ));

        let pip = roster::sidekick("Pip", 50).unwrap();
        assert_eq!(p.recruit_sidekick(pip), Ok(None));
        let replaced = p.recruit_sidekick(roster::sidekick("Tom", 10).unwrap()).unwrap();
        assert_eq!(replaced.map(|s| s.name().to_string()), Some("Pip".into()));
        assert_eq!(p.dismiss_sidekick().map(|s| s.name().to_string()), Some("Tom".into()));
        assert!(p.sidekick().is_none());
    }

    #[test]
    fn test_quest_log() {
        let mut p = player();
        let quest = Quest::new("Chores", "Do the chores")
            .with_objective(Objective::new("Sweep", 2))
            .with_reward(Reward::Experience(100));
        assert!(p.accept_quest(quest.clone()));
        assert!(!p.accept_quest(quest));
        assert_eq!(p.quests().len(), 1);

        assert!(p.update_quest_objective("Chores", 0, 2));
        assert!(!p.update_quest_objective("Chores", 3, 1));
        assert!(!p.update_quest_objective("Missing", 0, 1));

        let completion = p.complete_quest("Chores").unwrap();
        assert_eq!(completion.levels_gained, 1);
        assert_eq!(p.character().level(), 2);
        assert!(p.quest("Chores").is_some_and(Quest::is_completed));

        assert!(matches!(
            p.complete_quest("Missing"),
            Err(GameError::NotFound(_))
        ));
    }

    #[test]
    fn test_record_defeat_advances_matching_objectives() {
        let mut p = player();
        p.accept_quest(
            Quest::new("Bounty", "Hunt").with_objective(Objective::defeat("Goblin King", 1)),
        );
        assert_eq!(p.record_defeat("Dark Sorcerer"), 0);
        assert_eq!(p.record_defeat("Goblin King"), 1);
        assert!(p.quest("Bounty").is_some_and(Quest::all_objectives_complete));
    }
}
