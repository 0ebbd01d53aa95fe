//! Collision detection and resolution
//!
//! Broad phase: the spatial grid. Narrow phase: circle overlap. Resolution
//! rules: eating (mass margin + overlap), food pickup, virus shatter.

use std::collections::HashSet;

use glam::Vec2;

use super::ball::{Ball, BallId};
use super::food::{Food, Virus};
use super::grid::SpatialGrid;
use crate::consts::*;
use crate::settings::{Balance, VirusPolicy};

/// Outcome of one resolved eat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatEvent {
    pub predator: BallId,
    pub prey: BallId,
    /// Prey was an ejected pellet (doesn't count as a kill)
    pub prey_was_pellet: bool,
}

/// Strict circle overlap: `distance < r1 + r2`
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[inline]
pub fn ball_ball_overlap(a: &Ball, b: &Ball) -> bool {
    circles_overlap(a.pos, a.radius(), b.pos, b.radius())
}

#[inline]
pub fn ball_food_overlap(ball: &Ball, food: &Food) -> bool {
    circles_overlap(ball.pos, ball.radius(), food.pos, food.radius())
}

#[inline]
pub fn ball_virus_overlap(ball: &Ball, virus: &Virus) -> bool {
    circles_overlap(ball.pos, ball.radius(), virus.pos, virus.radius())
}

/// Mass margin and overlap both hold
pub fn can_eat(predator: &Ball, prey: &Ball, mass_ratio: f32) -> bool {
    predator.can_eat_with_ratio(prey, mass_ratio) && ball_ball_overlap(predator, prey)
}

/// Transfer `retention` of the prey's mass and start the prey's death
pub fn handle_eat(predator: &mut Ball, prey: &mut Ball, retention: f32) {
    predator.gain_mass(prey.mass * retention);
    prey.get_eaten();
}

/// Food is consumed whole
pub fn handle_food_eat(ball: &mut Ball, food: &Food) {
    ball.gain_mass(food.mass);
}

/// Number of fragments and the mass each carries, if the ball is big enough
pub fn virus_fragment_plan(mass: f32, virus_mass: f32, balance: &Balance) -> Option<(usize, f32)> {
    if !(virus_mass > 0.0) || mass < virus_mass {
        return None;
    }
    let count = ((mass / virus_mass).floor() as usize).min(balance.max_virus_fragments);
    if count == 0 {
        return None;
    }
    let divisor = count as f32 + balance.virus_fragment_divisor_offset as f32;
    Some((count, mass / divisor))
}

/// Shatter a ball that struck a virus
///
/// Returns the fragments (empty when the ball passes through harmlessly).
/// Under `Shatter` the struck ball starts dying; under `KeepLargest` it keeps
/// one fragment's share and stays alive.
pub fn handle_virus_collision(
    ball: &mut Ball,
    virus: &Virus,
    balance: &Balance,
    mut next_id: impl FnMut() -> BallId,
) -> Vec<Ball> {
    if !ball.is_active() || ball.is_ejector || ball.virus_grace > 0.0 {
        return Vec::new();
    }
    let Some((count, fragment_mass)) = virus_fragment_plan(ball.mass, virus.mass, balance) else {
        return Vec::new();
    };

    let origin = ball.pos;
    let spread = ball.radius();
    let fragments = (0..count)
        .map(|i| {
            let dir = Vec2::from_angle(i as f32 * std::f32::consts::TAU / count as f32);
            let mut frag = Ball::new(next_id(), origin + dir * spread, fragment_mass);
            frag.vel = dir * VIRUS_FRAGMENT_SPEED;
            frag.name = ball.name.clone();
            frag.skin = ball.skin;
            frag.color = ball.color;
            frag.is_ai = ball.is_ai;
            frag.virus_grace = VIRUS_GRACE;
            frag.scale = 1.0;
            frag
        })
        .collect();

    match balance.virus_policy {
        VirusPolicy::Shatter => ball.get_eaten(),
        VirusPolicy::KeepLargest => {
            ball.mass = fragment_mass;
            ball.virus_grace = VIRUS_GRACE;
        }
    }
    log::debug!("Ball {} shattered into {} fragments", ball.id, count);

    fragments
}

/// Overlapping active ball pairs, each reported once as `(i, j)` indices
///
/// Pairs are deduplicated on the ordered id pair, so it doesn't matter which
/// ball the broad phase started from.
pub fn detect_collisions(grid: &SpatialGrid, balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut checked: HashSet<(BallId, BallId)> = HashSet::new();
    let mut pairs = Vec::new();

    for (i, a) in balls.iter().enumerate() {
        if !a.is_active() {
            continue;
        }
        for j in grid.query(a.pos, a.radius(), Some(i)) {
            let b = &balls[j];
            if !b.is_active() {
                continue;
            }
            let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
            if !checked.insert(key) {
                continue;
            }
            if ball_ball_overlap(a, b) {
                pairs.push(if i < j { (i, j) } else { (j, i) });
            }
        }
    }
    pairs
}

/// Reference all-pairs overlap test
pub fn brute_force_collisions(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if balls[i].is_active() && balls[j].is_active() && ball_ball_overlap(&balls[i], &balls[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Mutable references to two distinct elements
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = balls.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = balls.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Resolve eats for the given candidate pairs, in order
///
/// A ball that starts dying earlier in the batch is skipped for the rest of it,
/// so no ball is eaten twice or eats after being eaten.
pub fn resolve_eats(balls: &mut [Ball], pairs: &[(usize, usize)], balance: &Balance) -> Vec<EatEvent> {
    let mut events = Vec::new();
    for &(i, j) in pairs {
        let (a, b) = pair_mut(balls, i, j);
        if !a.is_active() || !b.is_active() {
            continue;
        }
        let (predator, prey) = if can_eat(a, b, balance.eat_mass_ratio) {
            (a, b)
        } else if can_eat(b, a, balance.eat_mass_ratio) {
            (b, a)
        } else {
            continue;
        };
        let prey_was_pellet = prey.is_ejector;
        handle_eat(predator, prey, balance.eat_retention);
        events.push(EatEvent {
            predator: predator.id,
            prey: prey.id,
            prey_was_pellet,
        });
    }
    events
}
