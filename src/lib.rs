//! RPG Adventure - turn-based RPG core library
//!
//! Characters with weapons, armor and potions fight turn-based encounters,
//! level up, and complete quests. The library never prints; it hands back
//! results and combat event records for a front end to render.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod persistence;
pub mod quests;
