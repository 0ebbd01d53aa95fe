//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit frame delta, no wall clock
//! - Seeded RNG only, owned by the `World`
//! - Stable iteration order (creation order, grid queries sorted)
//! - No rendering or platform dependencies

pub mod ai;
pub mod ball;
pub mod collision;
pub mod food;
pub mod grid;
pub mod roster;
pub mod state;
pub mod tick;

pub use ai::{AiController, AiIntent, AiState, BehaviorProfile, Target, ThreatSource, flee_vector};
pub use ball::{Ball, BallId, Lifecycle, Skin};
pub use collision::{EatEvent, detect_collisions, resolve_eats};
pub use food::{Food, FoodId, Virus};
pub use grid::SpatialGrid;
pub use roster::{AiProfile, basic_profiles, profile_from_record, profiles_from_records, spawn_profile};
pub use state::{
    BallView, BotSpawner, Camera, FoodView, GameEvent, GamePhase, LeaderboardEntry, Snapshot,
    Stats, VirusView, World,
};
pub use tick::{TickInput, tick};
