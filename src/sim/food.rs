//! Static pickups and hazards
//!
//! Neither moves; `update` only drives their cosmetic animation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

pub type FoodId = u32;

/// A food pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub pos: Vec2,
    pub mass: f32,
    pub color: u8,
    pub scale: f32,
    pub pulse_phase: f32,
}

impl Food {
    pub fn new(id: FoodId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            mass: FOOD_MASS,
            color: 0,
            scale: 0.0,
            pulse_phase: 0.0,
        }
    }

    /// Food at a random map location
    pub fn random<R: Rng>(id: FoodId, rng: &mut R, map_width: f32, map_height: f32) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..map_width),
            rng.random_range(0.0..map_height),
        );
        Self {
            color: rng.random_range(0..FOOD_COLOR_COUNT),
            pulse_phase: rng.random_range(0.0..std::f32::consts::TAU),
            ..Self::new(id, pos)
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.mass.sqrt() * 3.0
    }

    pub fn update(&mut self, dt: f32) {
        self.scale = (self.scale + dt * 5.0).min(1.0);
        self.pulse_phase = (self.pulse_phase + dt * 3.0) % std::f32::consts::TAU;
    }
}

/// A spiked hazard that shatters oversized balls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Virus {
    pub id: u32,
    pub pos: Vec2,
    /// Balls at or above this mass shatter on contact
    pub mass: f32,
    pub rotation: f32,
}

impl Virus {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            mass: VIRUS_MASS,
            rotation: 0.0,
        }
    }

    pub fn random<R: Rng>(id: u32, rng: &mut R, map_width: f32, map_height: f32) -> Self {
        let r = VIRUS_MASS.sqrt() * 2.5;
        // Keep the whole virus on the map when the map is big enough
        let x = if map_width > 2.0 * r {
            rng.random_range(r..map_width - r)
        } else {
            map_width / 2.0
        };
        let y = if map_height > 2.0 * r {
            rng.random_range(r..map_height - r)
        } else {
            map_height / 2.0
        };
        Self::new(id, Vec2::new(x, y))
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.mass.sqrt() * 2.5
    }

    pub fn update(&mut self, dt: f32) {
        self.rotation = (self.rotation + dt * VIRUS_SPIN_RATE) % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_food_inside_map() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..200 {
            let food = Food::random(id, &mut rng, 800.0, 600.0);
            assert!(food.pos.x >= 0.0 && food.pos.x < 800.0);
            assert!(food.pos.y >= 0.0 && food.pos.y < 600.0);
            assert!(food.color < FOOD_COLOR_COUNT);
        }
    }

    #[test]
    fn test_random_virus_fully_on_map() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..200 {
            let virus = Virus::random(id, &mut rng, 800.0, 600.0);
            assert!(virus.pos.x - virus.radius() >= 0.0);
            assert!(virus.pos.x + virus.radius() <= 800.0);
        }
    }

    #[test]
    fn test_animation_only() {
        let mut food = Food::new(1, Vec2::new(5.0, 5.0));
        food.update(1.0);
        assert_eq!(food.pos, Vec2::new(5.0, 5.0));
        assert_eq!(food.scale, 1.0);

        let mut virus = Virus::new(1, Vec2::new(5.0, 5.0));
        virus.update(1.0);
        assert_eq!(virus.pos, Vec2::new(5.0, 5.0));
        assert!(virus.rotation > 0.0);
    }
}
