//! Per-frame world loop
//!
//! Advances the world by one frame of `dt` seconds (clamped to
//! `MAX_FRAME_DT`). Phases run in a fixed order: clock and steering,
//! kinematics, split/eject, broad phase and bots, cosmetics, food, ball vs
//! ball, removal, viruses, then camera, stats and termination.

use glam::Vec2;

use super::ai::{AiController, AiView};
use super::ball::{Ball, BallId};
use super::collision::{
    ball_food_overlap, ball_virus_overlap, detect_collisions, handle_food_eat,
    handle_virus_collision, resolve_eats,
};
use super::state::{GameEvent, GamePhase, World};
use crate::consts::*;
use crate::settings::GameMode;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World-space pointer; every player cell steers toward it
    pub pointer: Option<Vec2>,
    /// Split every player cell
    pub split: bool,
    /// Eject a pellet from every player cell
    pub eject: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.pause {
        world.toggle_pause();
    }

    if world.phase != GamePhase::Running {
        return;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    if dt <= 0.0 {
        return;
    }

    world.elapsed += dt;
    if world.is_player_active() {
        world.stats.survival_time += dt;
    }

    if let Some(pointer) = input.pointer.filter(|p| p.is_finite()) {
        for ball in world.balls.iter_mut().filter(|b| World::is_player_cell(b)) {
            ball.set_target(pointer);
        }
    }

    let (w, h) = (world.settings.map_width, world.settings.map_height);
    for ball in &mut world.balls {
        ball.update(dt, w, h);
    }

    apply_actions(world, input);

    world.grid.rebuild(&world.balls);
    update_bots(world, dt);

    for food in &mut world.foods {
        food.update(dt);
    }
    for virus in &mut world.viruses {
        virus.update(dt);
    }

    resolve_food(world);
    resolve_balls(world);

    world.balls.retain(Ball::is_alive);
    prune_controllers(world);

    resolve_viruses(world);
    check_player_death(world);

    if let Some(center) = world.player_center() {
        let mass = world.player_mass();
        world.camera.follow(center, mass, dt);
    }

    world.refresh_stats();
    world.push_event(GameEvent::StatsUpdated(world.stats));

    if should_end(world) {
        world.end();
    }
}

/// Player split/eject triggers and pending bot split intents
fn apply_actions(world: &mut World, input: &TickInput) {
    let mut spawned: Vec<Ball> = Vec::new();
    let mut adopted: Vec<(BallId, BallId)> = Vec::new();

    for i in 0..world.balls.len() {
        let is_player = World::is_player_cell(&world.balls[i]);
        let wants_split = if is_player {
            input.split
        } else {
            std::mem::take(&mut world.balls[i].split_requested)
        };

        if wants_split {
            let child_id = world.next_id;
            if let Some(child) = world.balls[i].split(child_id, &mut world.rng) {
                world.next_id += 1;
                if !is_player {
                    adopted.push((world.balls[i].id, child_id));
                }
                spawned.push(child);
            }
        }

        if is_player && input.eject {
            let pellet_id = world.next_id;
            if let Some(pellet) = world.balls[i].eject(pellet_id) {
                world.next_id += 1;
                spawned.push(pellet);
            }
        }
    }

    world.balls.extend(spawned);

    // Bot halves get a controller with the parent's temperament
    let map_size = world.map_size();
    for (parent, child) in adopted {
        if let Some(behavior) = world.controller_for(parent).map(|c| c.behavior) {
            let controller = AiController::new(child, behavior, &mut world.rng, map_size);
            world.controllers.push(controller);
        }
    }
}

/// Run every controller and write its intent onto its ball
fn update_bots(world: &mut World, dt: f32) {
    let index = world.ball_index();
    let map_size = world.map_size();
    let World {
        balls,
        foods,
        viruses,
        controllers,
        grid,
        rng,
        ..
    } = world;

    let view = AiView {
        balls: &balls[..],
        index: &index,
        foods: &foods[..],
        viruses: &viruses[..],
        grid: &*grid,
        map_size,
    };

    let mut intents = Vec::with_capacity(controllers.len());
    for controller in controllers.iter_mut() {
        if let Some(intent) = controller.update(dt, &view, &mut *rng) {
            intents.push((controller.ball_id, intent));
        }
    }

    for (id, intent) in intents {
        if let Some(ball) = index.get(&id).and_then(|&i| balls.get_mut(i)) {
            ball.set_target(intent.steer_to);
            if intent.split {
                ball.split_requested = true;
            }
        }
    }
}

/// Food goes to the first overlapping ball and respawns elsewhere
fn resolve_food(world: &mut World) {
    for fi in 0..world.foods.len() {
        let food = &world.foods[fi];
        let eater = world
            .grid
            .query(food.pos, food.radius(), None)
            .into_iter()
            .find(|&bi| {
                let ball = &world.balls[bi];
                ball.is_active() && ball_food_overlap(ball, food)
            });

        if let Some(bi) = eater {
            handle_food_eat(&mut world.balls[bi], &world.foods[fi]);
            let fresh = world.random_food();
            world.foods[fi] = fresh;
        }
    }
}

/// Ball vs ball eating, with kill accounting for the player
fn resolve_balls(world: &mut World) {
    let pairs = detect_collisions(&world.grid, &world.balls);
    let eats = resolve_eats(&mut world.balls, &pairs, &world.settings.balance);
    if eats.is_empty() {
        return;
    }

    let index = world.ball_index();
    let lookup = |id: BallId| index.get(&id).and_then(|&i| world.balls.get(i));
    let kills = eats
        .iter()
        .filter(|e| !e.prey_was_pellet)
        .filter(|e| {
            let predator = lookup(e.predator);
            let prey = lookup(e.prey);
            predator.is_some_and(World::is_player_cell) && prey.is_some_and(|p| p.is_ai)
        })
        .count();
    world.stats.kills += kills as u32;

    check_player_death(world);
}

/// Drop controllers whose ball is gone or dying
fn prune_controllers(world: &mut World) {
    let index = world.ball_index();
    let balls = &world.balls;
    world.controllers.retain(|c| {
        index
            .get(&c.ball_id)
            .is_some_and(|&i| balls[i].is_active())
    });
}

/// Virus strikes; fragments of a bot inherit its temperament
fn resolve_viruses(world: &mut World) {
    let map_size = world.map_size();
    let World {
        balls,
        viruses,
        controllers,
        settings,
        rng,
        next_id,
        ..
    } = world;

    let mut fragments: Vec<Ball> = Vec::new();
    let mut new_controllers: Vec<AiController> = Vec::new();

    for ball in balls.iter_mut() {
        for virus in viruses.iter() {
            if !ball_virus_overlap(ball, virus) {
                continue;
            }
            let pieces = handle_virus_collision(ball, virus, &settings.balance, || {
                let id = *next_id;
                *next_id += 1;
                id
            });
            if pieces.is_empty() {
                continue;
            }

            let behavior = controllers
                .iter()
                .find(|c| c.ball_id == ball.id)
                .map(|c| c.behavior);
            if let Some(behavior) = behavior {
                for piece in &pieces {
                    new_controllers.push(AiController::new(piece.id, behavior, &mut *rng, map_size));
                }
            }
            fragments.extend(pieces);
        }
    }

    balls.extend(fragments);
    controllers.extend(new_controllers);
}

/// Fire the player-death path once the last player cell stops being active
fn check_player_death(world: &mut World) {
    if world.player_dead || world.is_player_active() {
        return;
    }
    world.player_dead = true;
    world.push_event(GameEvent::PlayerDied);
    log::info!(
        "Player died at {:.1}s with {} kills",
        world.elapsed,
        world.stats.kills
    );
}

/// Challenge/endless end once the player's death animation is over; timed
/// sessions run to the limit whether the player is alive or not
fn should_end(world: &World) -> bool {
    match world.settings.mode {
        GameMode::Timed => world.elapsed >= world.settings.time_limit_secs,
        GameMode::Challenge | GameMode::Endless => !world.is_player_present(),
    }
}
