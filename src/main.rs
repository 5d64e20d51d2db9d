//! Auto-battle campaign driver.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                                  # Default hero with a rock
//!   cargo run -- --weapon paper --seed 42      # Reproducible run
//!   cargo run -- --config game.toml --no-save  # Custom tuning, no saves

use std::env;
use std::error::Error;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpg_adventure::character::{roster, Character, Player};
use rpg_adventure::combat::{
    CombatEvent, Encounter, EncounterOutcome, EncounterState, PlayerAction,
};
use rpg_adventure::core::{GameConfig, GameResult};
use rpg_adventure::items::catalog;
use rpg_adventure::persistence::{GameSnapshot, JsonSaveStore, SaveStore, SlotStatus};
use rpg_adventure::quests::data;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Encounters running longer than this end with the party fleeing.
const MAX_ROUNDS: u32 = 200;

#[derive(Debug)]
struct Options {
    name: String,
    weapon: String,
    config: Option<PathBuf>,
    seed: Option<u64>,
    save_dir: Option<PathBuf>,
    save: bool,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            weapon: "Rock".to_string(),
            config: None,
            seed: None,
            save_dir: None,
            save: true,
            help: false,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);
    if options.help {
        print_help();
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut store = match &options.save_dir {
        Some(dir) => JsonSaveStore::new(dir),
        None => JsonSaveStore::default_location()?,
    };

    let mut player = create_player(&options, &config)?;
    println!("{} sets out with {}.", player.character(), describe_weapon(&player));
    println!();

    let bosses: [fn() -> GameResult<Character>; 2] = [roster::goblin_king, roster::dark_sorcerer];
    for (slot, spawn) in (1..).zip(bosses) {
        let encounter = Encounter::new(player, vec![spawn()?], &config)?;
        let outcome = run_encounter(encounter, &mut rng);
        player = outcome.player;

        println!(
            "=> {} after the fight ({}/{} HP, {} XP awarded)",
            outcome.state.name(),
            player.character().health(),
            player.character().max_health(),
            outcome.experience_awarded
        );
        if outcome.state != EncounterState::PlayerWon {
            break;
        }

        complete_ready_quests(&mut player);
        rest(&mut player);

        if options.save {
            match store.save(slot, &GameSnapshot::capture(&player)) {
                Ok(()) => println!("Progress saved to slot {slot}."),
                Err(e) => warn!(slot, error = %e, "could not save progress"),
            }
        }
        println!();
    }

    print_summary(&player);
    if options.save {
        print_slots(&store);
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--name" => {
                if i + 1 < args.len() {
                    options.name = args[i + 1].clone();
                    i += 1;
                }
            }
            "-w" | "--weapon" => {
                if i + 1 < args.len() {
                    options.weapon = args[i + 1].clone();
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--save-dir" => {
                if i + 1 < args.len() {
                    options.save_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--no-save" => {
                options.save = false;
            }
            "-h" | "--help" => {
                options.help = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("RPG Adventure - auto-battle campaign\n");
    println!("Options:");
    println!("  -n, --name <NAME>      Hero name (default: Hero)");
    println!(
        "  -w, --weapon <WEAPON>  Starting weapon: {}",
        catalog::STARTER_WEAPONS.join(", ")
    );
    println!("  -c, --config <FILE>    TOML or JSON game config");
    println!("  -s, --seed <SEED>      Seed the random number generator");
    println!("      --save-dir <DIR>   Directory for save slots");
    println!("      --no-save          Do not write save slots");
    println!("  -h, --help             Show this help");
}

fn create_player(options: &Options, config: &GameConfig) -> Result<Player, Box<dyn Error>> {
    let mut player = Player::new(options.name.as_str(), config)?;
    let weapon = catalog::starter_weapon(&options.weapon).ok_or_else(|| {
        format!(
            "unknown weapon '{}', choose one of {}",
            options.weapon,
            catalog::STARTER_WEAPONS.join(", ")
        )
    })?;
    player.character_mut().equip(weapon)?;

    for potion in [
        catalog::healing_potion(),
        catalog::healing_potion(),
        catalog::strength_potion(),
    ] {
        let name = potion.name.clone();
        if !player.character_mut().inventory_mut().add_item(potion) {
            warn!(item = %name, "no room for starting item");
        }
    }

    player.recruit_sidekick(roster::sidekick("Pip", 80)?)?;
    for quest in data::starter_quests() {
        player.accept_quest(quest);
    }
    Ok(player)
}

fn describe_weapon(player: &Player) -> String {
    player
        .character()
        .equipped_weapon()
        .map_or_else(|| "bare hands".to_string(), |weapon| weapon.to_string())
}

fn run_encounter(mut encounter: Encounter, rng: &mut impl Rng) -> EncounterOutcome {
    let names: Vec<String> = encounter
        .opponents()
        .iter()
        .map(|opponent| opponent.to_string())
        .collect();
    println!("--- {} vs {} ---", encounter.player().character(), names.join(", "));

    while !encounter.state().is_terminal() {
        let action = if encounter.round() >= MAX_ROUNDS {
            PlayerAction::Flee
        } else {
            encounter.suggested_action()
        };

        // The loop keeps going after a rejected action.
        let events = match encounter.take_turn(action, rng) {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, ?action, "action rejected, attacking instead");
                let fallback = encounter
                    .first_living_opponent()
                    .map_or(PlayerAction::Flee, |target| PlayerAction::Attack { target });
                match encounter.take_turn(fallback, rng) {
                    Ok(events) => events,
                    Err(e) => {
                        warn!(error = %e, "fallback action rejected");
                        break;
                    }
                }
            }
        };
        for event in &events {
            print_event(event);
        }
    }
    encounter.finish()
}

fn print_event(event: &CombatEvent) {
    let target = event
        .target
        .as_deref()
        .map(|t| format!(" -> {t}"))
        .unwrap_or_default();
    let amount = if event.amount > 0 {
        format!(" [{}]", event.amount)
    } else {
        String::new()
    };
    println!(
        "  R{:<3} {}{}: {:?}{} {}",
        event.round, event.actor, target, event.action, amount, event.result
    );
}

fn complete_ready_quests(player: &mut Player) {
    let ready: Vec<String> = player
        .quests()
        .iter()
        .filter(|quest| !quest.is_completed() && quest.all_objectives_complete())
        .map(|quest| quest.name.clone())
        .collect();

    for name in ready {
        match player.complete_quest(&name) {
            Ok(completion) => println!(
                "Quest complete: {} (+{} XP, {} item(s), {} level(s))",
                completion.quest,
                completion.experience,
                completion.items.len(),
                completion.levels_gained
            ),
            Err(e) => warn!(quest = %name, error = %e, "quest could not be completed"),
        }
    }
}

/// Restores the party to full health between encounters.
fn rest(player: &mut Player) {
    let hero = player.character_mut();
    let missing = hero.max_health() - hero.health();
    if let Err(e) = hero.heal(i32::try_from(missing).unwrap_or(i32::MAX)) {
        warn!(error = %e, "rest failed");
    }
    if let Some(sidekick) = player.sidekick_mut() {
        let missing = sidekick.max_health() - sidekick.health();
        if let Err(e) = sidekick.heal(i32::try_from(missing).unwrap_or(i32::MAX)) {
            warn!(error = %e, "rest failed");
        }
    }
}

fn print_summary(player: &Player) {
    let hero = player.character();
    println!("=== {} ===", hero);
    println!(
        "HP {}/{}  Damage {}  XP {}/{}",
        hero.health(),
        hero.max_health(),
        hero.base_damage(),
        hero.experience(),
        hero.experience_for_next_level()
    );
    println!("Inventory ({}/{}):", hero.inventory().len(), hero.inventory().max_slots());
    for item in hero.inventory().items() {
        let worn = if hero.inventory().is_equipped(item.id) {
            " (equipped)"
        } else {
            ""
        };
        println!("  {}{}", item, worn);
    }
    println!("Quests:");
    for quest in player.quests() {
        let mark = if quest.is_completed() { "x" } else { " " };
        println!("  [{}] {} - reward: {}", mark, quest.name, quest.reward_description());
        for line in quest.progress_lines() {
            println!("        {}", line);
        }
    }
}

fn print_slots(store: &impl SaveStore) {
    println!("Save slots:");
    for (slot, status) in store.list_slots() {
        match status {
            SlotStatus::Empty => println!("  {slot}: empty"),
            SlotStatus::Occupied {
                player_name,
                level,
                ..
            } => println!("  {slot}: {player_name} (Level {level})"),
            SlotStatus::Corrupted => println!("  {slot}: corrupted"),
        }
    }
}
