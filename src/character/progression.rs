//! Experience and leveling.
//!
//! The threshold for leaving level `n` is `100 * n` experience. Reaching it
//! consumes the threshold, so a large gain can cascade through several
//! level-ups, each compounding the stat growth.

use crate::core::combat_math::grow_stat;
use crate::core::constants::*;
use crate::core::error::{non_negative, GameResult};
use tracing::info;

use super::types::{Character, Role};

impl Character {
    /// Experience needed to leave the current level.
    pub fn experience_for_next_level(&self) -> u32 {
        EXPERIENCE_PER_LEVEL.saturating_mul(self.level)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Adds experience and applies every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: i32) -> GameResult<u32> {
        let amount = non_negative(amount, "experience")?;
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while !self.is_max_level() && self.experience >= self.experience_for_next_level() {
            self.experience -= self.experience_for_next_level();
            self.level_up();
            gained += 1;
        }
        Ok(gained)
    }

    /// Raises the level by one, grows max health and base damage by the
    /// character's growth rates and restores full health. Does nothing at
    /// the level cap.
    pub fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;
        self.max_health = grow_stat(self.max_health, self.growth.health_pct);
        self.base_damage = grow_stat(self.base_damage, self.growth.damage_pct);
        self.health = self.max_health;

        info!(
            character = %self.name,
            level = self.level,
            max_health = self.max_health,
            base_damage = self.base_damage,
            "level up"
        );
        true
    }

    /// Experience the victor earns for defeating this character.
    pub fn experience_reward(&self) -> u32 {
        let reward = EXPERIENCE_PER_OPPONENT_LEVEL.saturating_mul(self.level);
        match self.role {
            Role::Boss { .. } => reward.saturating_mul(BOSS_EXPERIENCE_MULTIPLIER),
            _ => reward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;

    fn fresh() -> Character {
        Character::new("Hero", Role::Player, 100, 10).unwrap()
    }

    #[test]
    fn test_exact_threshold_levels_once() {
        let mut c = fresh();
        assert_eq!(c.gain_experience(100), Ok(1));
        assert_eq!(c.level(), 2);
        assert_eq!(c.experience(), 0);
        assert_eq!(c.max_health(), 110);
        assert_eq!(c.base_damage(), 11);
    }

    #[test]
    fn test_below_threshold_does_not_level() {
        let mut c = fresh();
        assert_eq!(c.gain_experience(99), Ok(0));
        assert_eq!(c.level(), 1);
        assert_eq!(c.experience(), 99);
    }

    #[test]
    fn test_large_gain_cascades_and_compounds() {
        let mut c = fresh();
        assert_eq!(c.gain_experience(300), Ok(2));
        assert_eq!(c.level(), 3);
        assert_eq!(c.experience(), 0);
        assert_eq!(c.max_health(), 121);
        assert_eq!(c.health(), 121);
    }

    #[test]
    fn test_leftover_experience_is_kept() {
        let mut c = fresh();
        assert_eq!(c.gain_experience(250), Ok(1));
        assert_eq!(c.level(), 2);
        assert_eq!(c.experience(), 150);
        assert_eq!(c.experience_for_next_level(), 200);
        assert_eq!(c.gain_experience(50), Ok(1));
        assert_eq!(c.level(), 3);
    }

    #[test]
    fn test_level_up_heals_fully() {
        let mut c = fresh();
        c.take_damage(90).unwrap();
        assert!(c.level_up());
        assert_eq!(c.health(), c.max_health());
    }

    #[test]
    fn test_level_is_capped() {
        let mut c = fresh();
        c.level = MAX_LEVEL;
        assert!(!c.level_up());
        assert_eq!(c.gain_experience(5000), Ok(0));
        assert_eq!(c.level(), MAX_LEVEL);
        assert_eq!(c.experience(), 5000);
    }

    #[test]
    fn test_negative_experience_is_rejected() {
        let mut c = fresh();
        assert!(matches!(
            c.gain_experience(-10),
            Err(GameError::InvalidArgument(_))
        ));
        assert_eq!(c.experience(), 0);
    }

    #[test]
    fn test_custom_growth_rates() {
        use crate::character::GrowthRates;
        let mut c = fresh().with_growth(GrowthRates {
            health_pct: 0.5,
            damage_pct: 0.0,
        });
        c.level_up();
        assert_eq!(c.max_health(), 150);
        assert_eq!(c.base_damage(), 10);
    }

    #[test]
    fn test_experience_reward_doubles_for_bosses() {
        let villain = Character::new("Thug", Role::Villain { evil_level: 2 }, 30, 3).unwrap();
        let boss = Character::new("King", Role::Boss { boss_level: 1 }, 50, 8).unwrap();
        assert_eq!(villain.experience_reward(), 50);
        assert_eq!(boss.experience_reward(), 100);
    }

    #[test]
    fn test_huge_levels_saturate() {
        let mut boss = Character::new("King", Role::Boss { boss_level: 1 }, 50, 8).unwrap();
        boss.level = u32::MAX;
        assert_eq!(boss.experience_reward(), u32::MAX);
        assert_eq!(boss.experience_for_next_level(), u32::MAX);
    }
}
