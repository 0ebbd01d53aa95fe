//! World state and core simulation types
//!
//! The `World` is the single source of truth: every entity collection, the
//! bot roster, elapsed time, phase and derived view state live here and are
//! mutated only by `tick` and the phase/spawner methods below.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::ball::{Ball, BallId, Skin};
use super::food::{Food, FoodId, Virus};
use super::grid::SpatialGrid;
use super::roster::{AiProfile, basic_profiles, spawn_profile};
use crate::consts::*;
use crate::{frame_independent_keep, radius_for_mass};
use crate::settings::{GameMode, Settings};

/// Bots never spawn closer than this to the player
const SPAWN_CLEARANCE: f32 = 300.0;
/// Attempts at finding a spawn point clear of the player
const SPAWN_ATTEMPTS: usize = 8;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built, waiting for `start`
    NotStarted,
    Running,
    Paused,
    /// Terminal
    Ended,
}

/// Aggregate player statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Whole mass of the player's cells
    pub score: u64,
    pub kills: u32,
    /// Seconds the player has been alive
    pub survival_time: f32,
    pub max_mass: f32,
    /// 1-based standing by mass; None once the player is out
    pub rank: Option<usize>,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PlayerDied,
    BotSpawned { name: String },
    StatsUpdated(Stats),
    /// Pushed exactly once, when the world ends
    GameOver(Stats),
}

/// Follows the player; zooms out as they grow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub zoom: f32,
}

impl Camera {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, zoom: 1.0 }
    }

    pub fn target_zoom(mass: f32) -> f32 {
        (1.0 - (mass - PLAYER_START_MASS) / 5000.0).max(CAMERA_MIN_ZOOM)
    }

    /// Snap to `target` and ease zoom toward the mass-based level
    pub fn follow(&mut self, target: Vec2, mass: f32, dt: f32) {
        if target.is_finite() {
            self.pos = target;
        }
        let goal = Self::target_zoom(mass);
        let keep = frame_independent_keep(1.0 - CAMERA_ZOOM_SMOOTHING, dt);
        self.zoom = goal + (self.zoom - goal) * keep;
    }

    /// Convert a screen point (pixels, origin top-left) to world space
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        self.pos + (screen - viewport / 2.0) / self.zoom.max(f32::EPSILON)
    }

    pub fn world_to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        (world - self.pos) * self.zoom + viewport / 2.0
    }
}

/// Periodic bot injection for endless sessions
///
/// Driven by its own clock, not by `tick`; dropped when the world ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSpawner {
    pub interval: f32,
    timer: f32,
}

impl BotSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            timer: 0.0,
        }
    }

    /// Advance the clock; returns how many spawns fell due
    pub fn advance(&mut self, dt: f32) -> usize {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.timer += dt;
        let mut due = 0;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            due += 1;
        }
        due
    }
}

/// Render data for one ball
#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub id: BallId,
    pub pos: Vec2,
    pub radius: f32,
    pub name: String,
    pub skin: Skin,
    pub color: u8,
    pub is_player: bool,
    pub is_ai: bool,
    pub is_ejector: bool,
    pub scale: f32,
    pub pulse_phase: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FoodView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VirusView {
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub mass: f32,
    pub is_player: bool,
}

/// Read-only frame output for a presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    /// Seconds left in timed sessions
    pub time_remaining: Option<f32>,
    pub camera: Camera,
    pub balls: Vec<BallView>,
    pub foods: Vec<FoodView>,
    pub viruses: Vec<VirusView>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub stats: Stats,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// All balls, in creation order
    pub balls: Vec<Ball>,
    pub foods: Vec<Food>,
    pub viruses: Vec<Virus>,
    /// One per living bot ball, in creation order
    pub controllers: Vec<AiController>,
    pub(crate) grid: SpatialGrid,
    /// Seconds of unpaused play
    pub elapsed: f32,
    pub stats: Stats,
    pub camera: Camera,
    /// Set once the last player cell starts dying
    pub player_dead: bool,
    events: Vec<GameEvent>,
    spawner: Option<BotSpawner>,
    pub(crate) next_id: u32,
    pub(crate) next_food_id: FoodId,
}

impl World {
    /// World with a generated population of basic bots
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_profiles(settings, seed, Vec::new())
    }

    /// World seeded with the given bots (basic bots when `profiles` is empty)
    ///
    /// Settings that fail validation are repaired rather than rejected.
    pub fn with_profiles(settings: Settings, seed: u64, profiles: Vec<AiProfile>) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("{e}; falling back to safe values");
                settings.sanitized()
            }
        };
        let center = Vec2::new(settings.map_width / 2.0, settings.map_height / 2.0);
        let mut world = Self {
            grid: SpatialGrid::new(settings.grid_cell_size),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            balls: Vec::new(),
            foods: Vec::new(),
            viruses: Vec::new(),
            controllers: Vec::new(),
            elapsed: 0.0,
            stats: Stats::default(),
            camera: Camera::new(center),
            player_dead: false,
            events: Vec::new(),
            spawner: None,
            next_id: 1,
            next_food_id: 1,
            settings,
        };

        for _ in 0..world.settings.food_count {
            world.spawn_food();
        }
        for _ in 0..world.settings.virus_count {
            let id = world.next_entity_id();
            let virus = Virus::random(
                id,
                &mut world.rng,
                world.settings.map_width,
                world.settings.map_height,
            );
            world.viruses.push(virus);
        }

        let player_id = world.next_entity_id();
        let mut player = Ball::new(player_id, center, PLAYER_START_MASS).with_name(PLAYER_NAME);
        player.scale = 1.0;
        world.balls.push(player);

        let profiles = if profiles.is_empty() {
            basic_profiles(
                &mut world.rng,
                world.settings.basic_bot_count,
                world.settings.difficulty,
            )
        } else {
            profiles
        };
        for profile in profiles {
            world.spawn_bot(profile);
        }

        world.refresh_stats();
        log::info!(
            "World created: seed {}, mode {}, difficulty {}, {} bots, {} food, {} viruses",
            seed,
            world.settings.mode.as_str(),
            world.settings.difficulty.as_str(),
            world.controllers.len(),
            world.foods.len(),
            world.viruses.len()
        );
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.settings.map_width, self.settings.map_height)
    }

    /// Add one food pellet at a random location
    pub fn spawn_food(&mut self) {
        let food = self.random_food();
        self.foods.push(food);
    }

    pub(crate) fn random_food(&mut self) -> Food {
        let id = self.next_food_id;
        self.next_food_id += 1;
        Food::random(id, &mut self.rng, self.settings.map_width, self.settings.map_height)
    }

    /// Create a bot ball and its controller; returns the ball id
    pub fn spawn_bot(&mut self, profile: AiProfile) -> BallId {
        let id = self.next_entity_id();
        let pos = self.bot_spawn_point(radius_for_mass(profile.mass));
        let color = self.rng.random_range(0..FOOD_COLOR_COUNT);
        let ball = Ball::new(id, pos, profile.mass)
            .with_name(profile.name)
            .with_skin(profile.skin)
            .with_color(color)
            .controlled_by_ai();
        self.balls.push(ball);

        let behavior = profile.behavior.scaled_for(self.settings.difficulty);
        let map_size = self.map_size();
        let controller = AiController::new(id, behavior, &mut self.rng, map_size);
        self.controllers.push(controller);
        id
    }

    /// Random point for a new bot, preferably away from the player
    fn bot_spawn_point(&mut self, radius: f32) -> Vec2 {
        let (w, h) = (self.settings.map_width, self.settings.map_height);
        let player = self.player_center();
        let mut pos = Vec2::new(w / 2.0, h / 2.0);
        for _ in 0..SPAWN_ATTEMPTS {
            let x = if w > 2.0 * radius {
                self.rng.random_range(radius..w - radius)
            } else {
                w / 2.0
            };
            let y = if h > 2.0 * radius {
                self.rng.random_range(radius..h - radius)
            } else {
                h / 2.0
            };
            pos = Vec2::new(x, y);
            if player.is_none_or(|p| p.distance(pos) >= SPAWN_CLEARANCE) {
                break;
            }
        }
        pos
    }

    /// Ball belongs to the player (the player's split pieces included)
    #[inline]
    pub fn is_player_cell(ball: &Ball) -> bool {
        !ball.is_ai && !ball.is_ejector
    }

    /// Player cells that can still act
    pub fn player_cells(&self) -> impl Iterator<Item = &Ball> {
        self.balls
            .iter()
            .filter(|b| Self::is_player_cell(b) && b.is_active())
    }

    /// Largest active player cell
    pub fn player(&self) -> Option<&Ball> {
        self.player_cells()
            .max_by(|a, b| a.mass.total_cmp(&b.mass).then(b.id.cmp(&a.id)))
    }

    pub fn player_mass(&self) -> f32 {
        self.player_cells().map(|b| b.mass).sum()
    }

    /// Mass-weighted center of the player's cells
    pub fn player_center(&self) -> Option<Vec2> {
        let (sum, mass) = self
            .player_cells()
            .fold((Vec2::ZERO, 0.0), |(s, m), b| (s + b.pos * b.mass, m + b.mass));
        (mass > 0.0).then(|| sum / mass)
    }

    pub fn is_player_active(&self) -> bool {
        self.player_cells().next().is_some()
    }

    /// Any player cell still on the board, dying ones included
    pub fn is_player_present(&self) -> bool {
        self.balls
            .iter()
            .any(|b| Self::is_player_cell(b) && b.is_alive())
    }

    /// Ball id -> index into `balls`
    pub fn ball_index(&self) -> HashMap<BallId, usize> {
        self.balls.iter().enumerate().map(|(i, b)| (b.id, i)).collect()
    }

    pub fn controller_for(&self, ball_id: BallId) -> Option<&AiController> {
        self.controllers.iter().find(|c| c.ball_id == ball_id)
    }

    /// Time left in a timed session
    pub fn time_remaining(&self) -> Option<f32> {
        (self.settings.mode == GameMode::Timed)
            .then(|| (self.settings.time_limit_secs - self.elapsed).max(0.0))
    }

    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Running;
        if self.settings.mode == GameMode::Endless {
            self.spawner = Some(BotSpawner::new(SPAWN_INTERVAL_SECS));
        }
        self.events.push(GameEvent::Started);
        log::info!("Game started ({})", self.settings.mode.as_str());
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
            log::info!("Game paused at {:.1}s", self.elapsed);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Resumed);
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Transition to `Ended`; idempotent
    pub fn end(&mut self) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.spawner = None;
        self.refresh_stats();
        self.events.push(GameEvent::GameOver(self.stats));
        log::info!(
            "Game over: score {}, kills {}, survived {:.1}s",
            self.stats.score,
            self.stats.kills,
            self.stats.survival_time
        );
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    pub fn has_spawner(&self) -> bool {
        self.spawner.is_some()
    }

    /// Drive the endless-mode spawner by wall-clock time
    ///
    /// Separate from `tick`; a no-op unless running with a spawner.
    pub fn advance_spawn_timer(&mut self, real_dt: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        let Some(spawner) = self.spawner.as_mut() else {
            return;
        };
        let due = spawner.advance(real_dt);
        for _ in 0..due {
            let mass = self.player_mass().max(PLAYER_START_MASS);
            let profile = spawn_profile(&mut self.rng, self.elapsed, mass);
            let name = profile.name.clone();
            self.spawn_bot(profile);
            log::info!("Spawned bot {name} at {:.0}s", self.elapsed);
            self.events.push(GameEvent::BotSpawned { name });
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Standings by mass; the player's cells count as one entry
    pub fn standings(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .balls
            .iter()
            .filter(|b| b.is_active() && b.is_ai)
            .map(|b| LeaderboardEntry {
                name: b.name.clone(),
                mass: b.mass,
                is_player: false,
            })
            .collect();
        if self.is_player_active() {
            entries.push(LeaderboardEntry {
                name: PLAYER_NAME.to_string(),
                mass: self.player_mass(),
                is_player: true,
            });
        }
        entries.sort_by(|a, b| b.mass.total_cmp(&a.mass).then(b.is_player.cmp(&a.is_player)));
        entries
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut entries = self.standings();
        entries.truncate(LEADERBOARD_SIZE);
        entries
    }

    /// Recompute stats from the current state
    ///
    /// Score and peak mass freeze once the player is out.
    pub(crate) fn refresh_stats(&mut self) {
        if self.is_player_active() {
            let mass = self.player_mass();
            self.stats.score = mass.floor() as u64;
            self.stats.max_mass = self.stats.max_mass.max(mass);
            self.stats.rank = self
                .standings()
                .iter()
                .position(|e| e.is_player)
                .map(|i| i + 1);
        } else {
            self.stats.rank = None;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            elapsed: self.elapsed,
            time_remaining: self.time_remaining(),
            camera: self.camera,
            balls: self
                .balls
                .iter()
                .filter(|b| b.is_alive())
                .map(|b| BallView {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius(),
                    name: b.name.clone(),
                    skin: b.skin,
                    color: b.color,
                    is_player: Self::is_player_cell(b),
                    is_ai: b.is_ai,
                    is_ejector: b.is_ejector,
                    scale: b.scale,
                    pulse_phase: b.pulse_phase,
                    opacity: b.death_opacity(),
                })
                .collect(),
            foods: self
                .foods
                .iter()
                .map(|f| FoodView {
                    pos: f.pos,
                    radius: f.radius(),
                    color: f.color,
                })
                .collect(),
            viruses: self
                .viruses
                .iter()
                .map(|v| VirusView {
                    pos: v.pos,
                    radius: v.radius(),
                    rotation: v.rotation,
                })
                .collect(),
            leaderboard: self.leaderboard(),
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    fn small_settings(mode: GameMode) -> Settings {
        let mut settings = Settings::for_mode(mode, Difficulty::Normal);
        settings.food_count = 20;
        settings.virus_count = 2;
        settings.basic_bot_count = 4;
        settings
    }

    #[test]
    fn test_degenerate_map_is_repaired() {
        let mut settings = small_settings(GameMode::Challenge);
        settings.map_width = 0.0;
        settings.map_height = -10.0;
        settings.grid_cell_size = 0.0;

        let world = World::new(settings, 1);
        assert!(world.settings.validate().is_ok());
        assert_eq!(world.foods.len(), 20);
        assert_eq!(world.controllers.len(), 4);
        for food in &world.foods {
            assert!(food.pos.x >= 0.0 && food.pos.x < world.settings.map_width);
            assert!(food.pos.y >= 0.0 && food.pos.y < world.settings.map_height);
        }
    }

    #[test]
    fn test_initial_population() {
        let world = World::new(small_settings(GameMode::Challenge), 7);
        assert_eq!(world.phase, GamePhase::NotStarted);
        assert_eq!(world.foods.len(), 20);
        assert_eq!(world.viruses.len(), 2);
        assert_eq!(world.balls.len(), 5);
        assert_eq!(world.controllers.len(), 4);

        let player = world.player().unwrap();
        assert_eq!(player.name, PLAYER_NAME);
        assert_eq!(player.mass, PLAYER_START_MASS);
        assert_eq!(player.pos, Vec2::new(1500.0, 1500.0));

        for bot in world.balls.iter().filter(|b| b.is_ai) {
            assert!(bot.pos.distance(player.pos) >= SPAWN_CLEARANCE);
            assert!(world.controller_for(bot.id).is_some());
        }
    }

    #[test]
    fn test_seeded_profiles_replace_basic_bots() {
        let profile = AiProfile {
            name: "Ghost".to_string(),
            mass: 300.0,
            skin: Skin::Metal,
            behavior: Default::default(),
        };
        let world = World::with_profiles(small_settings(GameMode::Challenge), 7, vec![profile]);
        assert_eq!(world.controllers.len(), 1);
        let bot = world.balls.iter().find(|b| b.is_ai).unwrap();
        assert_eq!(bot.name, "Ghost");
        assert_eq!(bot.skin, Skin::Metal);
        assert_eq!(bot.mass, 300.0);
    }

    #[test]
    fn test_phase_transitions() {
        let mut world = World::new(small_settings(GameMode::Challenge), 7);
        world.pause();
        assert_eq!(world.phase, GamePhase::NotStarted);

        world.start();
        world.toggle_pause();
        assert_eq!(world.phase, GamePhase::Paused);
        world.toggle_pause();
        assert_eq!(world.phase, GamePhase::Running);

        world.end();
        world.end();
        world.resume();
        assert_eq!(world.phase, GamePhase::Ended);

        let events = world.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert_eq!(events[1], GameEvent::Paused);
        assert_eq!(events[2], GameEvent::Resumed);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(game_overs, 1);
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_spawner_only_in_endless() {
        let mut world = World::new(small_settings(GameMode::Challenge), 7);
        world.start();
        assert!(!world.has_spawner());

        let mut world = World::new(small_settings(GameMode::Endless), 7);
        world.start();
        assert!(world.has_spawner());

        let bots = world.controllers.len();
        world.advance_spawn_timer(29.0);
        assert_eq!(world.controllers.len(), bots);
        world.advance_spawn_timer(1.5);
        assert_eq!(world.controllers.len(), bots + 1);
        assert!(world
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::BotSpawned { .. })));

        // Paused worlds don't spawn
        world.pause();
        world.advance_spawn_timer(120.0);
        assert_eq!(world.controllers.len(), bots + 1);

        world.end();
        assert!(!world.has_spawner());
        world.advance_spawn_timer(120.0);
        assert_eq!(world.controllers.len(), bots + 1);
    }

    #[test]
    fn test_spawner_catches_up() {
        let mut spawner = BotSpawner::new(30.0);
        assert_eq!(spawner.advance(95.0), 3);
        assert_eq!(spawner.advance(f32::NAN), 0);
        assert_eq!(spawner.advance(25.0), 1);
    }

    #[test]
    fn test_stats_and_rank() {
        let mut world = World::with_profiles(
            small_settings(GameMode::Challenge),
            7,
            vec![
                AiProfile {
                    name: "Big".to_string(),
                    mass: 500.0,
                    skin: Skin::Default,
                    behavior: Default::default(),
                },
                AiProfile {
                    name: "Small".to_string(),
                    mass: 20.0,
                    skin: Skin::Default,
                    behavior: Default::default(),
                },
            ],
        );
        world.refresh_stats();
        assert_eq!(world.stats.score, 50);
        assert_eq!(world.stats.rank, Some(2));

        let board = world.leaderboard();
        assert_eq!(board[0].name, "Big");
        assert!(board[1].is_player);

        for b in world.balls.iter_mut().filter(|b| !b.is_ai) {
            b.get_eaten();
        }
        world.refresh_stats();
        assert_eq!(world.stats.rank, None);
        assert_eq!(world.stats.score, 50);
    }

    #[test]
    fn test_camera_zoom_and_conversion() {
        assert_eq!(Camera::target_zoom(PLAYER_START_MASS), 1.0);
        assert_eq!(Camera::target_zoom(100_000.0), CAMERA_MIN_ZOOM);

        let mut camera = Camera::new(Vec2::ZERO);
        for _ in 0..600 {
            camera.follow(Vec2::new(100.0, 100.0), 2550.0, 1.0 / 60.0);
        }
        assert!((camera.zoom - 0.5).abs() < 1e-3);

        let viewport = Vec2::new(800.0, 600.0);
        let world_pt = camera.screen_to_world(Vec2::new(500.0, 300.0), viewport);
        assert!((world_pt - Vec2::new(300.0, 100.0)).length() < 1.0);
        let back = camera.world_to_screen(world_pt, viewport);
        assert!((back - Vec2::new(500.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(small_settings(GameMode::Timed), 7);
        let snap = world.snapshot();
        assert_eq!(snap.balls.len(), 5);
        assert_eq!(snap.foods.len(), 20);
        assert_eq!(snap.time_remaining, Some(TIMED_LIMIT_SECS));
        assert_eq!(snap.balls.iter().filter(|b| b.is_player).count(), 1);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"leaderboard\""));
    }
}
