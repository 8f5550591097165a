//! A "just guard" (perfect-parry) gameplay prototype.
//!
//! One player circle, one enemy circle. Arming an attack run sends the
//! enemy chasing the player; pressing guard within a narrow frame window
//! while the enemy is in reach parries the attack and launches the enemy
//! into a straight-line knockback.
//!
//! Core modules:
//! - `entities`: player/enemy records and circle geometry
//! - `input`: button snapshots and edge detection
//! - `enemy`: chase and knockback updates
//! - `guard`: the parry resolver
//! - `sim`: the per-tick orchestrator
//! - `tuning`: the fixed gameplay constants

pub mod enemy;
pub mod entities;
pub mod guard;
pub mod input;
pub mod sim;
pub mod tuning;

pub use sim::World;
pub use tuning::Tuning;
