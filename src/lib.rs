//! Ball Battle - an agar-style arena game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, bot AI, world loop)
//! - `settings`: Session configuration and balance parameters
//! - `highscores`: Local score table fed by finished sessions

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, ScoreReporter};
pub use settings::{Balance, Difficulty, GameMode, Settings, VirusPolicy};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the per-frame smoothing factors were tuned at
    pub const REFERENCE_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the world will integrate in one call
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Map defaults
    pub const MAP_WIDTH: f32 = 3000.0;
    pub const MAP_HEIGHT: f32 = 3000.0;
    /// Broad-phase grid cell size (world units)
    pub const GRID_CELL_SIZE: f32 = 200.0;

    /// Ball movement: world units per second at mass 1
    pub const BASE_SPEED: f32 = 300.0;
    /// Fraction of the gap to target velocity closed per reference frame
    pub const VELOCITY_SMOOTHING: f32 = 0.1;
    /// Velocity kept per reference frame by ejected pellets
    pub const EJECT_MOMENTUM: f32 = 0.92;
    /// Birth animation speed (scale units per second)
    pub const BIRTH_SCALE_RATE: f32 = 3.0;
    /// Cosmetic pulse speed (radians per second)
    pub const PULSE_RATE: f32 = 2.0;

    /// Above this mass a ball slowly bleeds mass
    pub const DECAY_START_MASS: f32 = 10_000.0;
    /// Fraction of the excess over `DECAY_START_MASS` lost per second
    pub const DECAY_RATE: f32 = 0.05;

    /// Death animation: opacity lost per second (0.25 s total)
    pub const DEATH_FADE_RATE: f32 = 4.0;
    /// Death animation: fraction of mass lost per second while fading
    pub const DEATH_SHRINK_RATE: f32 = 3.0;
    /// Mass never drops below this while shrinking
    pub const MIN_BALL_MASS: f32 = 0.01;

    /// Split
    pub const SPLIT_MIN_MASS: f32 = 35.0;
    pub const SPLIT_COOLDOWN: f32 = 1.5;
    pub const SPLIT_LAUNCH_SPEED: f32 = 600.0;

    /// Eject
    pub const EJECT_MIN_MASS: f32 = 20.0;
    pub const EJECT_COOLDOWN: f32 = 0.5;
    pub const EJECT_MAX_MASS: f32 = 15.0;
    pub const EJECT_MASS_FRACTION: f32 = 0.25;
    pub const EJECT_LAUNCH_SPEED: f32 = 900.0;

    /// Eating: predator must exceed prey mass by this factor
    pub const EAT_MASS_RATIO: f32 = 1.2;
    /// Fraction of prey mass the predator keeps
    pub const EAT_RETENTION: f32 = 0.8;

    /// Food
    pub const FOOD_COUNT: usize = 500;
    pub const FOOD_MASS: f32 = 1.0;
    pub const FOOD_COLOR_COUNT: u8 = 12;

    /// Viruses
    pub const VIRUS_COUNT: usize = 10;
    pub const VIRUS_MASS: f32 = 150.0;
    pub const MAX_VIRUS_FRAGMENTS: usize = 8;
    pub const VIRUS_FRAGMENT_SPEED: f32 = 300.0;
    /// Fragments ignore viruses for this long after a shatter
    pub const VIRUS_GRACE: f32 = 0.5;
    /// Virus spin (radians per second)
    pub const VIRUS_SPIN_RATE: f32 = 0.5;

    /// Player
    pub const PLAYER_START_MASS: f32 = 50.0;
    pub const PLAYER_NAME: &str = "You";

    /// Session defaults
    pub const BASIC_BOT_COUNT: usize = 20;
    pub const TIMED_LIMIT_SECS: f32 = 180.0;
    pub const SPAWN_INTERVAL_SECS: f32 = 30.0;
    pub const LEADERBOARD_SIZE: usize = 10;

    /// Camera
    pub const CAMERA_MIN_ZOOM: f32 = 0.3;
    pub const CAMERA_ZOOM_SMOOTHING: f32 = 0.05;
}

/// Radius of a circle carrying `mass` (strictly increasing in mass)
#[inline]
pub fn radius_for_mass(mass: f32) -> f32 {
    mass.max(0.0).sqrt() * 2.0
}

/// Movement speed for `mass` in world units per second (decreasing in mass)
#[inline]
pub fn speed_for_mass(mass: f32) -> f32 {
    consts::BASE_SPEED / mass.max(consts::MIN_BALL_MASS).powf(0.2)
}

/// Unit vector from `from` toward `to`, or zero when the points are within `dead_zone`
///
/// Never divides by a near-zero length, so a NaN can't leak into velocities.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, dead_zone: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if !dist.is_finite() || dist <= dead_zone.max(1e-4) {
        Vec2::ZERO
    } else {
        delta / dist
    }
}

/// Clamp a circle center so the whole circle stays inside a `width` x `height` map
#[inline]
pub fn clamp_circle_to_map(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    // A circle wider than the map gets pinned to the center on that axis
    let rx = radius.min(width / 2.0);
    let ry = radius.min(height / 2.0);
    let x = if pos.x.is_finite() { pos.x } else { width / 2.0 };
    let y = if pos.y.is_finite() { pos.y } else { height / 2.0 };
    Vec2::new(x.clamp(rx, width - rx), y.clamp(ry, height - ry))
}

/// Convert a per-reference-frame factor into the factor for a frame of `dt` seconds
///
/// `per_frame` is the fraction *kept* each 1/60 s.
#[inline]
pub fn frame_independent_keep(per_frame: f32, dt: f32) -> f32 {
    per_frame.powf(dt / consts::REFERENCE_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direction_to_dead_zone() {
        let d = direction_to(Vec2::new(10.0, 10.0), Vec2::new(10.5, 10.0), 1.0);
        assert_eq!(d, Vec2::ZERO);

        let d = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_direction_to_rejects_nan() {
        let d = direction_to(Vec2::ZERO, Vec2::new(f32::NAN, 1.0), 1.0);
        assert_eq!(d, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_circle_to_map() {
        let p = clamp_circle_to_map(Vec2::new(-50.0, 5000.0), 20.0, 1000.0, 1000.0);
        assert_eq!(p, Vec2::new(20.0, 980.0));

        let p = clamp_circle_to_map(Vec2::new(f32::NAN, 500.0), 20.0, 1000.0, 1000.0);
        assert_eq!(p, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_frame_independent_keep() {
        let one = frame_independent_keep(0.9, consts::REFERENCE_DT);
        assert!((one - 0.9).abs() < 1e-6);
        let two = frame_independent_keep(0.9, consts::REFERENCE_DT * 2.0);
        assert!((two - 0.81).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn radius_and_speed_formulas(m in 0.01f32..100_000.0) {
            prop_assert!((radius_for_mass(m) - 2.0 * m.sqrt()).abs() < 1e-3);
            prop_assert!((speed_for_mass(m) - consts::BASE_SPEED / m.powf(0.2)).abs() < 1e-3);
        }

        #[test]
        fn radius_increases_speed_decreases(m in 0.01f32..50_000.0, dm in 0.5f32..1000.0) {
            prop_assert!(radius_for_mass(m + dm) > radius_for_mass(m));
            prop_assert!(speed_for_mass(m + dm) < speed_for_mass(m));
        }
    }
}
