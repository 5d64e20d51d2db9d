use rand::Rng;
use tracing::{debug, info};

use crate::character::{AbilityOutcome, Character, ItemUse, Player};
use crate::core::combat_math::roll_crit;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, GameResult};
use crate::items::{ItemKind, PotionEffect};

use super::types::*;

/// Below this share of max health the suggested action is a healing potion.
const LOW_HEALTH_FRACTION: f64 = 0.3;

/// One fight between the player's party and a group of opponents.
///
/// The encounter owns every participant until [`Encounter::finish`] hands
/// the player back. Opponents only ever target the hero.
#[derive(Debug)]
pub struct Encounter {
    player: Player,
    opponents: Vec<Character>,
    defeat_recorded: Vec<bool>,
    state: EncounterState,
    round: u32,
    crit_chance: f64,
    events: Vec<CombatEvent>,
    experience_awarded: u32,
}

impl Encounter {
    pub fn new(player: Player, opponents: Vec<Character>, config: &GameConfig) -> GameResult<Self> {
        if opponents.is_empty() {
            return Err(GameError::InvalidArgument(
                "an encounter needs at least one opponent".into(),
            ));
        }
        if let Some(down) = opponents.iter().find(|o| o.is_defeated()) {
            return Err(GameError::InvalidArgument(format!(
                "{} is already defeated",
                down.name()
            )));
        }
        if player.character().is_defeated() {
            return Err(GameError::InvalidOperation(format!(
                "{} is defeated and cannot fight",
                player.name()
            )));
        }

        info!(
            hero = %player.name(),
            opponents = opponents.len(),
            "encounter started"
        );
        Ok(Self {
            player,
            defeat_recorded: vec![false; opponents.len()],
            opponents,
            state: EncounterState::Ongoing,
            round: 0,
            crit_chance: config.crit_chance,
            events: Vec::new(),
            experience_awarded: 0,
        })
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn opponents(&self) -> &[Character] {
        &self.opponents
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn experience_awarded(&self) -> u32 {
        self.experience_awarded
    }

    /// Index of the first opponent still standing.
    pub fn first_living_opponent(&self) -> Option<usize> {
        first_living(&self.opponents)
    }

    /// A reasonable default move: the sidekick's ability when ready, a
    /// healing potion when the hero is low, otherwise attack.
    pub fn suggested_action(&self) -> PlayerAction {
        let Some(target) = self.first_living_opponent() else {
            return PlayerAction::Flee;
        };
        if self
            .player
            .sidekick()
            .is_some_and(|s| s.is_alive() && s.ability_ready_next_turn())
        {
            return PlayerAction::SidekickSpecial { target };
        }

        let hero = self.player.character();
        let low = (hero.health() as f64) < hero.max_health() as f64 * LOW_HEALTH_FRACTION;
        if low {
            let potion = hero.inventory().items().iter().find(|item| {
                matches!(item.kind, ItemKind::Potion(PotionEffect::Healing { .. }))
            });
            if let Some(potion) = potion {
                return PlayerAction::UseItem { item: potion.id };
            }
        }
        PlayerAction::Attack { target }
    }

    /// Plays one round: the hero acts, then the sidekick, then every living
    /// opponent. Returns the events this round produced.
    ///
    /// Invalid actions are rejected before anything changes, so the caller
    /// can simply pick another action and try again.
    pub fn take_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> GameResult<Vec<CombatEvent>> {
        if self.state.is_terminal() {
            return Err(GameError::InvalidOperation(format!(
                "encounter is over ({})",
                self.state.name()
            )));
        }
        self.validate(action)?;
        self.round += 1;
        let first_event = self.events.len();

        if action == PlayerAction::Flee {
            self.state = EncounterState::Fled;
            let event = CombatEvent::new(self.round, self.player.name(), CombatAction::Flee)
                .result("escaped the fight");
            self.record(event);
            return Ok(self.events[first_event..].to_vec());
        }

        // --- Phase 1: Hero ---
        self.hero_phase(action, rng)?;

        // --- Phase 2: Sidekick ---
        let mut extra_action = false;
        if !self.state.is_terminal() {
            extra_action = self.sidekick_phase(action, rng)?;
        }

        // --- Phase 3: Opponents, unless an ability bought another action ---
        if !self.state.is_terminal() {
            if extra_action {
                let event =
                    CombatEvent::new(self.round, self.player.name(), CombatAction::ExtraAction)
                        .result("acts again before the enemies");
                self.record(event);
            } else {
                self.opponents_phase(rng)?;
            }
        }

        Ok(self.events[first_event..].to_vec())
    }

    fn validate(&self, action: PlayerAction) -> GameResult<()> {
        match action {
            PlayerAction::Attack { target } => self.living_target(target),
            PlayerAction::SidekickSpecial { target } => {
                self.living_target(target)?;
                let Some(sidekick) = self.player.sidekick() else {
                    return Err(GameError::InvalidOperation(format!(
                        "{} has no sidekick",
                        self.player.name()
                    )));
                };
                if sidekick.is_defeated() {
                    return Err(GameError::InvalidOperation(format!(
                        "{} is defeated",
                        sidekick.name()
                    )));
                }
                // The cooldown ticks when the sidekick's turn begins.
                if !sidekick.ability_ready_next_turn() {
                    return Err(GameError::InvalidOperation(format!(
                        "{}'s ability is on cooldown for {} more turn(s)",
                        sidekick.name(),
                        sidekick.ability_cooldown().saturating_sub(1)
                    )));
                }
                Ok(())
            }
            PlayerAction::UseItem { item } => {
                let hero = self.player.character();
                let Some(found) = hero.inventory().get(item) else {
                    return Err(GameError::NotFound(format!(
                        "item {item} is not in {}'s inventory",
                        hero.name()
                    )));
                };
                if !found.is_consumable() {
                    return Err(GameError::InvalidOperation(format!(
                        "{} cannot be consumed",
                        found.name
                    )));
                }
                Ok(())
            }
            PlayerAction::Flee => Ok(()),
        }
    }

    fn living_target(&self, index: usize) -> GameResult<()> {
        let target = self
            .opponents
            .get(index)
            .ok_or_else(|| GameError::NotFound(format!("no opponent at index {index}")))?;
        if target.is_defeated() {
            return Err(GameError::InvalidOperation(format!(
                "{} is already defeated",
                target.name()
            )));
        }
        Ok(())
    }

    fn hero_phase(&mut self, action: PlayerAction, rng: &mut impl Rng) -> GameResult<()> {
        let round = self.round;
        let crit_chance = self.crit_chance;
        let mut pending = Vec::new();
        {
            let hero = self.player.character_mut();
            let start = hero.begin_turn();
            if start.poison_damage > 0 {
                pending.push(poison_event(round, hero, start.poison_damage));
            }
            if start.skipped {
                if hero.is_alive() {
                    pending.push(frozen_event(round, hero));
                }
            } else {
                match action {
                    PlayerAction::Attack { target } | PlayerAction::SidekickSpecial { target } => {
                        let opponent = &mut self.opponents[target];
                        pending.push(strike(hero, opponent, crit_chance, rng, round)?);
                    }
                    PlayerAction::UseItem { item } => {
                        let item_name = hero
                            .inventory()
                            .get(item)
                            .map(|found| found.name.clone())
                            .unwrap_or_default();
                        let (amount, result) = match hero.use_item(item)? {
                            ItemUse::Healed { amount } => (amount, format!("healed {amount}")),
                            ItemUse::Strengthened { bonus, attacks } => {
                                (bonus, format!("+{bonus} damage for {attacks} attacks"))
                            }
                        };
                        pending.push(
                            CombatEvent::new(round, hero.name(), CombatAction::UseItem)
                                .target(&item_name)
                                .amount(amount)
                                .result(result),
                        );
                    }
                    PlayerAction::Flee => {}
                }
            }
        }
        self.record_all(pending);
        self.settle()
    }

    /// Returns true when the sidekick's ability granted an extra action.
    fn sidekick_phase(&mut self, action: PlayerAction, rng: &mut impl Rng) -> GameResult<bool> {
        let round = self.round;
        let crit_chance = self.crit_chance;
        let mut pending = Vec::new();
        let mut extra_action = false;
        {
            let Some(sidekick) = self.player.sidekick_mut() else {
                return Ok(false);
            };
            if sidekick.is_defeated() {
                return Ok(false);
            }
            let start = sidekick.begin_turn();
            if start.poison_damage > 0 {
                pending.push(poison_event(round, sidekick, start.poison_damage));
            }
            if start.skipped {
                if sidekick.is_alive() {
                    pending.push(frozen_event(round, sidekick));
                }
            } else {
                let preferred = match action {
                    PlayerAction::Attack { target } | PlayerAction::SidekickSpecial { target } => {
                        Some(target)
                    }
                    _ => None,
                };
                let index = preferred
                    .filter(|&i| self.opponents[i].is_alive())
                    .or_else(|| first_living(&self.opponents));

                if let Some(index) = index {
                    let opponent = &mut self.opponents[index];
                    if matches!(action, PlayerAction::SidekickSpecial { .. }) {
                        let outcome = sidekick.use_special_ability(opponent)?;
                        extra_action = outcome.extra_action;
                        pending.push(ability_event(round, sidekick, opponent, &outcome));
                    } else {
                        pending.push(strike(sidekick, opponent, crit_chance, rng, round)?);
                    }
                }
            }
        }
        self.record_all(pending);
        self.settle()?;
        Ok(extra_action)
    }

    fn opponents_phase(&mut self, rng: &mut impl Rng) -> GameResult<()> {
        let round = self.round;
        let crit_chance = self.crit_chance;

        for index in 0..self.opponents.len() {
            if self.state.is_terminal() {
                break;
            }
            if self.opponents[index].is_defeated() {
                continue;
            }

            let mut pending = Vec::new();
            {
                let opponent = &mut self.opponents[index];
                let hero = self.player.character_mut();
                let start = opponent.begin_turn();
                if start.poison_damage > 0 {
                    pending.push(poison_event(round, opponent, start.poison_damage));
                }
                if start.skipped {
                    if opponent.is_alive() {
                        pending.push(frozen_event(round, opponent));
                    }
                } else if opponent.ability_ready() {
                    let outcome = opponent.use_ability(hero)?;
                    pending.push(ability_event(round, opponent, hero, &outcome));
                } else {
                    pending.push(strike(opponent, hero, crit_chance, rng, round)?);
                }
            }
            self.record_all(pending);
            self.settle()?;
        }
        Ok(())
    }

    /// Records newly defeated opponents and moves the state machine.
    fn settle(&mut self) -> GameResult<()> {
        let round = self.round;
        for index in 0..self.opponents.len() {
            if self.defeat_recorded[index] || self.opponents[index].is_alive() {
                continue;
            }
            self.defeat_recorded[index] = true;
            let name = self.opponents[index].name().to_string();
            let advanced = self.player.record_defeat(&name);
            let event = CombatEvent::new(round, &name, CombatAction::Defeated)
                .amount(self.opponents[index].experience_reward())
                .result(format!("{advanced} quest objective(s) advanced"));
            self.record(event);
        }

        if self.state.is_terminal() {
            return Ok(());
        }
        if self.player.character().is_defeated() {
            self.state = EncounterState::PlayerLost;
            info!(hero = %self.player.name(), round, "player lost");
        } else if self.opponents.iter().all(Character::is_defeated) {
            self.state = EncounterState::PlayerWon;
            self.award_experience()?;
            info!(
                hero = %self.player.name(),
                round,
                experience = self.experience_awarded,
                "player won"
            );
        }
        Ok(())
    }

    fn award_experience(&mut self) -> GameResult<()> {
        let total = self
            .opponents
            .iter()
            .map(Character::experience_reward)
            .fold(0, u32::saturating_add);
        self.experience_awarded = total;

        let hero = self.player.character_mut();
        let levels = hero.gain_experience(i32::try_from(total).unwrap_or(i32::MAX))?;
        if levels > 0 {
            let event = CombatEvent::new(self.round, hero.name(), CombatAction::LevelUp)
                .amount(levels)
                .result(format!("reached level {}", hero.level()));
            self.record(event);
        }
        Ok(())
    }

    fn record(&mut self, event: CombatEvent) {
        debug!(
            round = event.round,
            actor = %event.actor,
            action = ?event.action,
            target = ?event.target,
            amount = event.amount,
            result = %event.result,
            "combat event"
        );
        self.events.push(event);
    }

    fn record_all(&mut self, events: Vec<CombatEvent>) {
        for event in events {
            self.record(event);
        }
    }

    /// Ends the encounter and returns the player. Status effects and ability
    /// cooldowns do not outlive the fight.
    pub fn finish(mut self) -> EncounterOutcome {
        let (hero, sidekick) = self.player.party_mut();
        hero.reset_combat_state();
        if let Some(sidekick) = sidekick {
            sidekick.reset_combat_state();
        }
        EncounterOutcome {
            state: self.state,
            player: self.player,
            experience_awarded: self.experience_awarded,
            events: self.events,
        }
    }
}

fn first_living(opponents: &[Character]) -> Option<usize> {
    opponents.iter().position(Character::is_alive)
}

/// A regular attack with a crit roll.
fn strike(
    attacker: &mut Character,
    target: &mut Character,
    crit_chance: f64,
    rng: &mut impl Rng,
    round: u32,
) -> GameResult<CombatEvent> {
    let critical = roll_crit(crit_chance, rng);
    let report = attacker.attack_with(target, critical)?;
    let action = if report.critical {
        CombatAction::CriticalHit
    } else {
        CombatAction::Attack
    };
    Ok(CombatEvent::new(round, attacker.name(), action)
        .target(target.name())
        .amount(report.damage)
        .result(format!("{} matchup", report.matchup.name())))
}

fn ability_event(
    round: u32,
    user: &Character,
    target: &Character,
    outcome: &AbilityOutcome,
) -> CombatEvent {
    CombatEvent::new(round, user.name(), CombatAction::SpecialAbility)
        .target(target.name())
        .amount(outcome.damage)
        .result(outcome.description.clone())
}

fn poison_event(round: u32, character: &Character, damage: u32) -> CombatEvent {
    CombatEvent::new(round, character.name(), CombatAction::Poisoned)
        .amount(damage)
        .result("suffers from poison")
}

fn frozen_event(round: u32, character: &Character) -> CombatEvent {
    CombatEvent::new(round, character.name(), CombatAction::Frozen)
        .result("is frozen and loses the turn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{roster, Role, StatusEffect};
    use crate::items::catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_crits() -> GameConfig {
        GameConfig {
            crit_chance: 0.0,
            ..Default::default()
        }
    }

    fn hero(health: u32, damage: u32) -> Player {
        Player::from_character(Character::new("Hero", Role::Player, health, damage).unwrap())
    }

    fn thug(health: u32, damage: u32) -> Character {
        Character::new("Thug", Role::Villain { evil_level: 0 }, health, damage).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Exhausts the opponent's ability so only regular attacks follow.
    fn on_cooldown(mut c: Character) -> Character {
        let mut dummy = Character::new("Dummy", Role::Player, 1000, 0).unwrap();
        c.use_ability(&mut dummy).unwrap();
        c
    }

    #[test]
    fn test_new_rejects_bad_setups() {
        let config = no_crits();
        assert!(matches!(
            Encounter::new(hero(100, 10), vec![], &config),
            Err(GameError::InvalidArgument(_))
        ));

        let mut down = thug(10, 1);
        down.take_damage(10).unwrap();
        assert!(matches!(
            Encounter::new(hero(100, 10), vec![down], &config),
            Err(GameError::InvalidArgument(_))
        ));

        let mut player = hero(100, 10);
        player.character_mut().take_damage(100).unwrap();
        assert!(matches!(
            Encounter::new(player, vec![thug(10, 1)], &config),
            Err(GameError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_turn_order_hero_then_opponent() {
        let mut encounter =
            Encounter::new(hero(100, 10), vec![on_cooldown(thug(50, 5))], &no_crits()).unwrap();
        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].actor, "Hero");
        assert_eq!(events[0].action, CombatAction::Attack);
        assert_eq!(events[0].amount, 10);
        assert_eq!(events[1].actor, "Thug");
        assert_eq!(events[1].target.as_deref(), Some("Hero"));
        assert_eq!(encounter.state(), EncounterState::Ongoing);
        assert_eq!(encounter.player().character().health(), 95);
    }

    #[test]
    fn test_killing_last_opponent_wins_and_awards_experience() {
        let mut encounter =
            Encounter::new(hero(100, 10), vec![thug(10, 5)], &no_crits()).unwrap();
        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();

        assert_eq!(encounter.state(), EncounterState::PlayerWon);
        assert!(events.iter().any(|e| e.action == CombatAction::Defeated));
        assert_eq!(encounter.experience_awarded(), 50);
        assert_eq!(encounter.player().character().experience(), 50);
        assert_eq!(encounter.player().character().health(), 100);

        assert!(matches!(
            encounter.take_turn(PlayerAction::Attack { target: 0 }, &mut rng()),
            Err(GameError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_hero_death_loses() {
        let mut encounter =
            Encounter::new(hero(5, 1), vec![on_cooldown(thug(50, 10))], &no_crits()).unwrap();
        encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();
        assert_eq!(encounter.state(), EncounterState::PlayerLost);
        assert_eq!(encounter.player().character().health(), 0);
    }

    #[test]
    fn test_flee_is_terminal() {
        let mut encounter = Encounter::new(hero(100, 10), vec![thug(50, 5)], &no_crits()).unwrap();
        let events = encounter.take_turn(PlayerAction::Flee, &mut rng()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, CombatAction::Flee);
        assert_eq!(encounter.state(), EncounterState::Fled);
        assert_eq!(encounter.opponents()[0].health(), 50);
    }

    #[test]
    fn test_invalid_actions_change_nothing() {
        let mut encounter =
            Encounter::new(hero(100, 10), vec![thug(50, 5), thug(5, 5)], &no_crits()).unwrap();
        let mut r = rng();

        assert!(matches!(
            encounter.take_turn(PlayerAction::Attack { target: 7 }, &mut r),
            Err(GameError::NotFound(_))
        ));
        assert!(matches!(
            encounter.take_turn(PlayerAction::SidekickSpecial { target: 0 }, &mut r),
            Err(GameError::InvalidOperation(_))
        ));
        assert!(matches!(
            encounter.take_turn(
                PlayerAction::UseItem {
                    item: catalog::healing_potion().id
                },
                &mut r
            ),
            Err(GameError::NotFound(_))
        ));
        assert_eq!(encounter.round(), 0);
        assert!(encounter.events().is_empty());

        encounter
            .take_turn(PlayerAction::Attack { target: 1 }, &mut r)
            .unwrap();
        assert!(encounter.opponents()[1].is_defeated());
        assert!(matches!(
            encounter.take_turn(PlayerAction::Attack { target: 1 }, &mut r),
            Err(GameError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_use_item_in_combat() {
        let mut player = hero(100, 10);
        player.character_mut().take_damage(50).unwrap();
        let potion = player
            .character_mut()
            .inventory_mut()
            .try_add_item(catalog::healing_potion())
            .unwrap();
        let mut encounter =
            Encounter::new(player, vec![on_cooldown(thug(50, 5))], &no_crits()).unwrap();

        let events = encounter
            .take_turn(PlayerAction::UseItem { item: potion }, &mut rng())
            .unwrap();
        assert_eq!(events[0].action, CombatAction::UseItem);
        assert_eq!(events[0].amount, 20);
        assert_eq!(encounter.player().character().health(), 65);
    }

    #[test]
    fn test_sidekick_special_grants_extra_action() {
        let mut player = hero(100, 10);
        player
            .recruit_sidekick(roster::sidekick("Pip", 90).unwrap())
            .unwrap();
        let mut encounter =
            Encounter::new(player, vec![thug(100, 5)], &no_crits()).unwrap();

        let events = encounter
            .take_turn(PlayerAction::SidekickSpecial { target: 0 }, &mut rng())
            .unwrap();
        let actions: Vec<_> = events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                CombatAction::Attack,
                CombatAction::SpecialAbility,
                CombatAction::ExtraAction
            ]
        );
        // 10 from the hero, 6 + 90 / 10 from the sidekick
        assert_eq!(encounter.opponents()[0].health(), 75);
        assert_eq!(encounter.player().character().health(), 100);

        assert!(matches!(
            encounter.take_turn(PlayerAction::SidekickSpecial { target: 0 }, &mut rng()),
            Err(GameError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_sidekick_auto_attacks() {
        let mut player = hero(100, 10);
        player
            .recruit_sidekick(roster::sidekick("Pip", 10).unwrap())
            .unwrap();
        let mut encounter =
            Encounter::new(player, vec![on_cooldown(thug(100, 5))], &no_crits()).unwrap();
        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].actor, "Pip");
        assert_eq!(encounter.opponents()[0].health(), 84);
    }

    #[test]
    fn test_sidekick_and_opponent_abilities_share_cadence() {
        let mut player = Player::from_character(
            Character::new("Hero", Role::Player, 1000, 1).unwrap(),
        );
        player
            .recruit_sidekick(roster::sidekick("Pip", 10).unwrap())
            .unwrap();
        let villain = Character::new("Thug", Role::Villain { evil_level: 0 }, 10_000, 1).unwrap();
        let mut encounter = Encounter::new(player, vec![villain], &no_crits()).unwrap();
        let mut r = rng();

        for _ in 0..9 {
            let action = encounter.suggested_action();
            encounter.take_turn(action, &mut r).unwrap();
        }
        let ability_rounds = |actor: &str| -> Vec<u32> {
            encounter
                .events()
                .iter()
                .filter(|e| e.action == CombatAction::SpecialAbility && e.actor == actor)
                .map(|e| e.round)
                .collect()
        };
        assert_eq!(ability_rounds("Thug"), vec![1, 4, 7]);
        assert_eq!(ability_rounds("Pip"), vec![1, 4, 7]);
    }

    #[test]
    fn test_boss_freeze_skips_hero_turn() {
        let mut encounter =
            Encounter::new(hero(100, 10), vec![roster::boss("Ogre", 1).unwrap()], &no_crits())
                .unwrap();
        let mut r = rng();

        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut r)
            .unwrap();
        assert_eq!(events[1].action, CombatAction::SpecialAbility);
        assert!(encounter.player().character().has_effect("frozen"));

        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut r)
            .unwrap();
        assert_eq!(events[0].action, CombatAction::Frozen);
        assert_eq!(encounter.opponents()[0].health(), 40);
    }

    #[test]
    fn test_defeat_advances_quest_objectives() {
        use crate::quests::{Objective, Quest};
        let mut player = hero(100, 10);
        player.accept_quest(Quest::new("Bounty", "").with_objective(Objective::defeat("Thug", 1)));
        let mut encounter = Encounter::new(player, vec![thug(10, 1)], &no_crits()).unwrap();
        encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();
        let outcome = encounter.finish();
        assert!(outcome
            .player
            .quest("Bounty")
            .is_some_and(Quest::all_objectives_complete));
    }

    #[test]
    fn test_finish_clears_status_effects() {
        let mut player = hero(100, 10);
        player.character_mut().add_effect(StatusEffect::poison());
        let encounter = Encounter::new(player, vec![thug(10, 1)], &no_crits()).unwrap();
        let outcome = encounter.finish();
        assert_eq!(outcome.state, EncounterState::Ongoing);
        assert!(outcome.player.character().effects().is_empty());
    }

    #[test]
    fn test_guaranteed_crits_double_damage() {
        let config = GameConfig {
            crit_chance: 1.0,
            ..Default::default()
        };
        let mut encounter =
            Encounter::new(hero(100, 10), vec![on_cooldown(thug(100, 5))], &config).unwrap();
        let events = encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng())
            .unwrap();
        assert_eq!(events[0].action, CombatAction::CriticalHit);
        assert_eq!(events[0].amount, 20);
    }

    #[test]
    fn test_suggested_action() {
        let mut player = hero(100, 10);
        let potion = player
            .character_mut()
            .inventory_mut()
            .try_add_item(catalog::healing_potion())
            .unwrap();
        let encounter = Encounter::new(player.clone(), vec![thug(10, 1)], &no_crits()).unwrap();
        assert_eq!(
            encounter.suggested_action(),
            PlayerAction::Attack { target: 0 }
        );

        player.character_mut().take_damage(80).unwrap();
        let encounter = Encounter::new(player, vec![thug(10, 1)], &no_crits()).unwrap();
        assert_eq!(
            encounter.suggested_action(),
            PlayerAction::UseItem { item: potion }
        );
    }
}
