// Starting stats
pub const DEFAULT_STARTING_HEALTH: u32 = 110;
pub const DEFAULT_STARTING_DAMAGE: u32 = 10;
pub const DEFAULT_MAX_INVENTORY_SLOTS: usize = 10;

// Leveling
pub const EXPERIENCE_PER_LEVEL: u32 = 100;
pub const MAX_LEVEL: u32 = 20;
pub const DEFAULT_LEVEL_UP_HEALTH_PCT: f64 = 0.10;
pub const DEFAULT_LEVEL_UP_DAMAGE_PCT: f64 = 0.10;

// Weapon type advantage (rock > scissors > paper > rock)
pub const ADVANTAGE_MULTIPLIER: f64 = 1.5;
pub const DISADVANTAGE_MULTIPLIER: f64 = 0.5;
pub const MIN_DISADVANTAGE_DAMAGE: u32 = 1;

// Critical hits
pub const DEFAULT_CRIT_CHANCE: f64 = 0.15;
pub const CRIT_MULTIPLIER: f64 = 2.0;

// Status effects
pub const POISON_DAMAGE_PER_TURN: u32 = 5;
pub const POISON_DURATION_TURNS: u32 = 3;
pub const FREEZE_TURNS_SKIPPED: u32 = 1;

// Potions
pub const HEALING_POTION_AMOUNT: u32 = 20;
pub const STRENGTH_POTION_BONUS: u32 = 3;
pub const STRENGTH_POTION_ATTACKS: u32 = 3;

// Special abilities
pub const SPECIAL_ABILITY_COOLDOWN_TURNS: u32 = 3;
pub const BOSS_SPECIAL_BONUS_PER_LEVEL: u32 = 2;
pub const SIDEKICK_EXTRA_ACTION_LOYALTY: u32 = 75;
pub const SIDEKICK_LOYALTY_DAMAGE_DIVISOR: u32 = 10;

// Rewards
pub const EXPERIENCE_PER_OPPONENT_LEVEL: u32 = 50;
pub const BOSS_EXPERIENCE_MULTIPLIER: u32 = 2;

// Roster base stats: (health, damage)
pub const SIDEKICK_BASE_STATS: (u32, u32) = (80, 6);
pub const VILLAIN_BASE_STATS: (u32, u32) = (70, 7);
pub const BOSS_BASE_STATS: (u32, u32) = (50, 8);

// Save files
pub const SAVE_VERSION_MAGIC: u64 = 0x5250_4741_4456_0001; // "RPGADV" v1
pub const SAVE_FORMAT_VERSION: u32 = 1;
pub const SAVE_SLOT_COUNT: u32 = 3;
