//! Bot roster generation
//!
//! Three sources of opponents: randomised basic bots filling the initial
//! population, ghosts built from past high score entries, and reinforcements
//! injected by the endless-mode spawner.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ai::{BehaviorProfile, random_behavior};
use super::ball::Skin;
use crate::highscores::HighScoreEntry;
use crate::settings::Difficulty;

/// Display names handed out to generated bots
pub const BOT_NAMES: [&str; 12] = [
    "Newbie",
    "Ball Slayer",
    "Devourer",
    "Tiny Blob",
    "Invincible",
    "Glutton",
    "Survivor",
    "Split Maniac",
    "Bean Collector",
    "Map Overlord",
    "Shadow",
    "Speedy",
];

/// Lightest ghost a score record can produce
pub const MIN_GHOST_MASS: f32 = 20.0;
/// Spawned bots gain this much mass per elapsed minute
pub const SPAWN_MASS_PER_MINUTE: f32 = 100.0;

/// Pre-seeded description of one bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub name: String,
    pub mass: f32,
    pub skin: Skin,
    pub behavior: BehaviorProfile,
}

pub fn random_name<R: Rng>(rng: &mut R) -> &'static str {
    BOT_NAMES[rng.random_range(0..BOT_NAMES.len())]
}

pub fn random_skin<R: Rng>(rng: &mut R) -> Skin {
    Skin::ALL[rng.random_range(0..Skin::ALL.len())]
}

/// Randomised filler bots
pub fn basic_profiles<R: Rng>(rng: &mut R, count: usize, difficulty: Difficulty) -> Vec<AiProfile> {
    let multiplier = difficulty.mass_multiplier();
    (0..count)
        .map(|_| {
            let base_mass: f32 = rng.random_range(50.0..250.0);
            AiProfile {
                name: random_name(rng).to_string(),
                mass: (base_mass * multiplier).floor(),
                skin: random_skin(rng),
                behavior: random_behavior(rng),
            }
        })
        .collect()
}

/// Ghost opponent modelled on a past session
///
/// Heavier scores make bigger, faster-reacting, more split-happy bots.
pub fn profile_from_record(entry: &HighScoreEntry, difficulty: Difficulty) -> AiProfile {
    let score = entry.score as f32;
    let mass = (score * 0.1 * difficulty.mass_multiplier()).floor().max(MIN_GHOST_MASS);
    AiProfile {
        name: entry.name.clone(),
        mass,
        skin: Skin::Default,
        behavior: BehaviorProfile {
            aggressiveness: (entry.kills as f32 / 50.0).clamp(0.3, 0.9),
            evasion: (entry.survival_time / 300.0).clamp(0.4, 0.9),
            split_usage: (score / 20000.0).clamp(0.2, 0.8),
            reaction_time_ms: (500.0 - score / 100.0).clamp(100.0, 800.0),
            prediction: (score / 30000.0).clamp(0.1, 0.7),
        },
    }
}

/// Ghosts for every stored record
pub fn profiles_from_records(entries: &[HighScoreEntry], difficulty: Difficulty) -> Vec<AiProfile> {
    entries
        .iter()
        .map(|e| profile_from_record(e, difficulty))
        .collect()
}

/// Reinforcement for the endless-mode spawner
///
/// Sized relative to the player and hardened by elapsed time.
pub fn spawn_profile<R: Rng>(rng: &mut R, elapsed_secs: f32, player_mass: f32) -> AiProfile {
    let minutes = (elapsed_secs / 60.0).max(0.0);
    let base = random_behavior(rng);
    let mass = player_mass.max(1.0) * rng.random_range(0.8..1.2) + SPAWN_MASS_PER_MINUTE * minutes;
    AiProfile {
        name: random_name(rng).to_string(),
        mass: mass.floor(),
        skin: random_skin(rng),
        behavior: BehaviorProfile {
            aggressiveness: (base.aggressiveness + 0.05 * minutes).min(0.9),
            reaction_time_ms: (base.reaction_time_ms - 25.0 * minutes).max(150.0),
            ..base
        },
    }
}
