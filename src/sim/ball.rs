//! Ball entity: player cells, bot cells and ejected pellets
//!
//! Mass drives everything: radius, speed and who may eat whom.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_circle_to_map, direction_to, frame_independent_keep, radius_for_mass, speed_for_mass};

/// Stable entity id, allocated monotonically by the world
pub type BallId = u32;

/// Cosmetic skin tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Default,
    Rainbow,
    Metal,
    Ghost,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Default, Skin::Rainbow, Skin::Metal, Skin::Ghost];
}

/// Where a ball is in its life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    /// Eaten or shattered; fading out, opacity 1 -> 0
    Dying { opacity: f32 },
    /// Animation finished, waiting for the world's removal pass
    Removed,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unit heading set by the owner (player input or AI), zero when idle
    pub target_dir: Vec2,
    pub mass: f32,
    pub lifecycle: Lifecycle,

    pub is_ai: bool,
    /// Ejected mass pellet (drag instead of steering, never a predator)
    pub is_ejector: bool,
    pub name: String,
    pub skin: Skin,
    /// Palette index for the presentation layer
    pub color: u8,

    /// Seconds until split/eject are allowed again
    pub split_cooldown: f32,
    pub eject_cooldown: f32,
    /// Seconds of immunity to viruses (fresh fragments)
    pub virus_grace: f32,
    /// Split intent, consumed by the world loop at the start of the next frame
    pub split_requested: bool,

    /// Birth animation scale 0 -> 1
    pub scale: f32,
    pub pulse_phase: f32,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            target_dir: Vec2::ZERO,
            mass: mass.max(MIN_BALL_MASS),
            lifecycle: Lifecycle::Alive,
            is_ai: false,
            is_ejector: false,
            name: String::new(),
            skin: Skin::Default,
            color: 0,
            split_cooldown: 0.0,
            eject_cooldown: 0.0,
            virus_grace: 0.0,
            split_requested: false,
            scale: 0.0,
            // Golden-angle spread keeps neighbours out of phase without an RNG
            pulse_phase: (id as f32 * 2.399_963) % std::f32::consts::TAU,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_skin(mut self, skin: Skin) -> Self {
        self.skin = skin;
        self
    }

    pub fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }

    pub fn controlled_by_ai(mut self) -> Self {
        self.is_ai = true;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        radius_for_mass(self.mass)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        speed_for_mass(self.mass)
    }

    /// Not yet removed (dying balls still count)
    #[inline]
    pub fn is_alive(&self) -> bool {
        !matches!(self.lifecycle, Lifecycle::Removed)
    }

    /// Alive and not dying: can move, eat and be eaten
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Alive)
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Dying { .. })
    }

    /// 1.0 while alive, fading while dying, 0.0 once removed
    pub fn death_opacity(&self) -> f32 {
        match self.lifecycle {
            Lifecycle::Alive => 1.0,
            Lifecycle::Dying { opacity } => opacity,
            Lifecycle::Removed => 0.0,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, map_width: f32, map_height: f32) {
        match self.lifecycle {
            Lifecycle::Removed => return,
            Lifecycle::Dying { opacity } => {
                let opacity = opacity - DEATH_FADE_RATE * dt;
                let keep = (1.0 - DEATH_SHRINK_RATE * dt).max(0.0);
                self.mass = (self.mass * keep).max(MIN_BALL_MASS);
                self.lifecycle = if opacity <= 0.0 {
                    Lifecycle::Removed
                } else {
                    Lifecycle::Dying { opacity }
                };
                return;
            }
            Lifecycle::Alive => {}
        }

        self.scale = (self.scale + dt * BIRTH_SCALE_RATE).min(1.0);

        self.split_cooldown = (self.split_cooldown - dt).max(0.0);
        self.eject_cooldown = (self.eject_cooldown - dt).max(0.0);
        self.virus_grace = (self.virus_grace - dt).max(0.0);

        if self.is_ejector {
            self.vel *= frame_independent_keep(EJECT_MOMENTUM, dt);
        } else {
            let blend = 1.0 - frame_independent_keep(1.0 - VELOCITY_SMOOTHING, dt);
            let desired = self.target_dir * self.speed();
            self.vel += (desired - self.vel) * blend;
        }

        self.pos += self.vel * dt;
        self.pos = clamp_circle_to_map(self.pos, self.radius(), map_width, map_height);

        // Soft cap: the further past the threshold, the faster the bleed
        if self.mass > DECAY_START_MASS {
            let excess = self.mass - DECAY_START_MASS;
            self.mass -= excess * (DECAY_RATE * dt).min(1.0);
        }

        self.pulse_phase = (self.pulse_phase + dt * PULSE_RATE) % std::f32::consts::TAU;
    }

    /// Steer toward a world point; within 1 unit the ball stops steering
    pub fn set_target(&mut self, point: Vec2) {
        if !self.is_active() {
            return;
        }
        self.target_dir = direction_to(self.pos, point, 1.0);
    }

    /// Current heading: steering direction, else motion direction
    fn heading(&self) -> Option<Vec2> {
        if self.target_dir != Vec2::ZERO {
            Some(self.target_dir)
        } else {
            self.vel.try_normalize()
        }
    }

    /// Halve this ball and launch the other half forward
    ///
    /// Returns `None` (and changes nothing) while on cooldown or below `SPLIT_MIN_MASS`.
    pub fn split<R: Rng>(&mut self, child_id: BallId, rng: &mut R) -> Option<Ball> {
        if !self.is_active()
            || self.is_ejector
            || self.split_cooldown > 0.0
            || self.mass < SPLIT_MIN_MASS
        {
            return None;
        }

        let heading = self.heading().unwrap_or_else(|| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            Vec2::from_angle(angle)
        });

        let half = self.mass / 2.0;
        self.mass = half;
        self.split_cooldown = SPLIT_COOLDOWN;

        let mut child = Ball::new(child_id, self.pos + heading * self.radius() * 2.0, half);
        child.vel = heading * SPLIT_LAUNCH_SPEED;
        child.name = self.name.clone();
        child.skin = self.skin;
        child.color = self.color;
        child.is_ai = self.is_ai;
        child.scale = self.scale;
        Some(child)
    }

    /// Shed a small fast pellet forward
    ///
    /// Returns `None` while on cooldown or below `EJECT_MIN_MASS`.
    pub fn eject(&mut self, pellet_id: BallId) -> Option<Ball> {
        if !self.is_active()
            || self.is_ejector
            || self.eject_cooldown > 0.0
            || self.mass < EJECT_MIN_MASS
        {
            return None;
        }

        let heading = self.heading().unwrap_or(Vec2::X);
        let pellet_mass = EJECT_MAX_MASS.min(self.mass * EJECT_MASS_FRACTION);
        self.mass -= pellet_mass;
        self.eject_cooldown = EJECT_COOLDOWN;

        // Launched clear of the parent so it isn't swallowed straight back
        let offset = self.radius() + radius_for_mass(pellet_mass) + 1.0;
        let mut pellet = Ball::new(pellet_id, self.pos + heading * offset, pellet_mass);
        pellet.vel = heading * EJECT_LAUNCH_SPEED;
        pellet.color = self.color;
        pellet.is_ejector = true;
        pellet.scale = 1.0;
        Some(pellet)
    }

    /// Mass-margin check only; overlap is the collision engine's job
    pub fn can_eat(&self, other: &Ball) -> bool {
        self.can_eat_with_ratio(other, EAT_MASS_RATIO)
    }

    pub fn can_eat_with_ratio(&self, other: &Ball, ratio: f32) -> bool {
        self.is_active()
            && other.is_active()
            && self.mass > other.mass * ratio
    }

    /// Start the death animation (idempotent)
    pub fn get_eaten(&mut self) {
        if self.is_active() {
            self.lifecycle = Lifecycle::Dying { opacity: 1.0 };
            self.vel = Vec2::ZERO;
            self.target_dir = Vec2::ZERO;
            self.split_requested = false;
        }
    }

    pub fn gain_mass(&mut self, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            self.mass += amount;
        }
    }
}
