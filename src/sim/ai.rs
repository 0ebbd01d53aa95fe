//! Bot controller
//!
//! Each controller owns one ball. It re-plans on a cadence equal to its
//! reaction time and steers every frame toward whatever it is currently after.
//! Planning priority: flee threats, dodge viruses, split-kill, chase, forage,
//! wander.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId};
use super::food::{Food, FoodId, Virus};
use super::grid::SpatialGrid;
use crate::settings::Difficulty;

/// Base sight radius for other balls
pub const VISION_RANGE: f32 = 800.0;
/// Sight radius for food
pub const FOOD_VISION_RANGE: f32 = 400.0;
/// Balls this much heavier are threats
pub const THREAT_RATIO: f32 = 1.2;
/// Balls lighter than this fraction are prey
pub const PREY_RATIO: f32 = 0.8;
/// Above this mass viruses become dangerous to the bot
pub const VIRUS_CAUTION_MASS: f32 = 130.0;
/// Extra clearance kept from viruses
pub const VIRUS_CAUTION_MARGIN: f32 = 50.0;
/// Minimum mass before a bot considers split-killing
pub const SPLIT_KILL_MIN_MASS: f32 = 60.0;
/// Inverse-square numerator for threat repulsion
pub const FLEE_FORCE: f32 = 1000.0;
/// Distance from a map edge where edge repulsion starts
pub const EDGE_MARGIN: f32 = 200.0;
/// Seconds of target motion extrapolated at full prediction strength
pub const PREDICTION_LOOKAHEAD: f32 = 0.5;
/// Waypoints keep this far from the edges
const WANDER_MARGIN: f32 = 100.0;
/// Close enough to a waypoint to pick another
const WANDER_ARRIVE_DIST: f32 = 100.0;
/// Chance per decision of picking a fresh waypoint anyway
const WANDER_REROLL_CHANCE: f32 = 0.2;

/// Tunable behaviour scalars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorProfile {
    /// 0-1: chance of chasing / split-killing when prey is around
    pub aggressiveness: f32,
    /// 0-1: widens how far away threats are noticed
    pub evasion: f32,
    /// 0-1: stretches split-kill lunge range from 4x to 5x radius
    pub split_usage: f32,
    /// Milliseconds between decisions
    pub reaction_time_ms: f32,
    /// 0-1: how far ahead chased targets are led
    pub prediction: f32,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            aggressiveness: 0.5,
            evasion: 0.5,
            split_usage: 0.3,
            reaction_time_ms: 500.0,
            prediction: 0.3,
        }
    }
}

impl BehaviorProfile {
    /// Clamp every scalar into its legal range
    pub fn clamped(self) -> Self {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self {
            aggressiveness: unit(self.aggressiveness),
            evasion: unit(self.evasion),
            split_usage: unit(self.split_usage),
            reaction_time_ms: if self.reaction_time_ms.is_finite() {
                self.reaction_time_ms.clamp(16.0, 5000.0)
            } else {
                500.0
            },
            prediction: unit(self.prediction),
        }
    }

    /// Harder bots react faster and press harder
    pub fn scaled_for(self, difficulty: Difficulty) -> Self {
        let (aggro, reaction) = match difficulty {
            Difficulty::Easy => (0.8, 1.25),
            Difficulty::Normal => (1.0, 1.0),
            Difficulty::Hard => (1.2, 0.8),
        };
        Self {
            aggressiveness: self.aggressiveness * aggro,
            reaction_time_ms: self.reaction_time_ms * reaction,
            ..self
        }
        .clamped()
    }

    /// Threat detection radius
    pub fn threat_range(&self) -> f32 {
        VISION_RANGE * (0.75 + 0.5 * self.evasion)
    }
}

/// Decision state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Wandering,
    Eating,
    Chasing,
    Fleeing,
    /// One-shot: lunge at prey this frame, then keep chasing
    SplitKilling,
}

/// Something to flee from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThreatSource {
    Ball(BallId),
    /// Static hazard (virus center)
    Point(Vec2),
}

/// What the current state is aimed at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    None,
    Ball(BallId),
    Threats(Vec<ThreatSource>),
    Food { id: FoodId, pos: Vec2 },
    Waypoint(Vec2),
}

/// Read-only world data a controller plans against
pub struct AiView<'a> {
    pub balls: &'a [Ball],
    /// Ball id -> index into `balls`
    pub index: &'a HashMap<BallId, usize>,
    pub foods: &'a [Food],
    pub viruses: &'a [Virus],
    /// Built from `balls` this frame
    pub grid: &'a SpatialGrid,
    pub map_size: Vec2,
}

impl AiView<'_> {
    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.index.get(&id).and_then(|&i| self.balls.get(i))
    }
}

/// Per-frame output: where to steer and whether to split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiIntent {
    pub steer_to: Vec2,
    pub split: bool,
}

/// Controller for one bot ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    pub ball_id: BallId,
    pub behavior: BehaviorProfile,
    pub state: AiState,
    pub target: Target,
    pub wander_target: Vec2,
    /// Seconds since the last decision
    decision_timer: f32,
}

impl AiController {
    pub fn new<R: Rng>(ball_id: BallId, behavior: BehaviorProfile, rng: &mut R, map_size: Vec2) -> Self {
        let behavior = behavior.clamped();
        Self {
            ball_id,
            behavior,
            state: AiState::Wandering,
            target: Target::None,
            wander_target: random_waypoint(rng, map_size),
            // First update plans immediately
            decision_timer: behavior.reaction_time_ms / 1000.0,
        }
    }

    /// Seconds between decisions
    pub fn decision_interval(&self) -> f32 {
        self.behavior.reaction_time_ms / 1000.0
    }

    /// Plan if the cadence allows, then steer
    ///
    /// Returns `None` when the owned ball is gone or no longer active.
    pub fn update<R: Rng>(&mut self, dt: f32, view: &AiView, rng: &mut R) -> Option<AiIntent> {
        let me = view.ball(self.ball_id).filter(|b| b.is_active())?;

        self.decision_timer += dt;
        if self.decision_timer >= self.decision_interval() {
            self.decision_timer = 0.0;
            self.decide(me, view, rng);
        }

        Some(self.execute(me, view))
    }

    /// Re-evaluate state and target
    pub fn decide<R: Rng>(&mut self, me: &Ball, view: &AiView, rng: &mut R) {
        let my_index = view.index.get(&me.id).copied();
        let threat_range = self.behavior.threat_range();
        let scan = threat_range.max(VISION_RANGE);

        let nearby: Vec<&Ball> = view
            .grid
            .query(me.pos, scan, my_index)
            .into_iter()
            .filter_map(|i| view.balls.get(i))
            .filter(|b| b.id != me.id && b.is_active())
            .collect();

        // A. Threats: flee from all of them at once
        let threats: Vec<ThreatSource> = nearby
            .iter()
            .filter(|b| !b.is_ejector)
            .filter(|b| b.mass >= me.mass * THREAT_RATIO)
            .filter(|b| b.pos.distance(me.pos) < threat_range)
            .map(|b| ThreatSource::Ball(b.id))
            .collect();
        if !threats.is_empty() {
            self.state = AiState::Fleeing;
            self.target = Target::Threats(threats);
            return;
        }

        // B. Viruses, once big enough to be shattered
        if me.mass > VIRUS_CAUTION_MASS {
            let danger = me.radius() + VIRUS_CAUTION_MARGIN;
            let viruses: Vec<ThreatSource> = view
                .viruses
                .iter()
                .filter(|v| v.pos.distance(me.pos) < danger)
                .map(|v| ThreatSource::Point(v.pos))
                .collect();
            if !viruses.is_empty() {
                self.state = AiState::Fleeing;
                self.target = Target::Threats(viruses);
                return;
            }
        }

        let mut prey: Vec<&Ball> = nearby
            .iter()
            .copied()
            .filter(|b| b.mass < me.mass * PREY_RATIO)
            .filter(|b| b.pos.distance(me.pos) < VISION_RANGE)
            .collect();
        prey.sort_by(|a, b| {
            a.pos
                .distance_squared(me.pos)
                .total_cmp(&b.pos.distance_squared(me.pos))
                .then(a.id.cmp(&b.id))
        });

        // C. Split-kill: half of us must still dominate the prey
        if self.can_use_split(me) && rng.random::<f32>() < self.behavior.aggressiveness {
            let lunge = me.radius() * (4.0 + self.behavior.split_usage);
            let half = me.mass / 2.0;
            if let Some(p) = prey
                .iter()
                .find(|p| p.pos.distance(me.pos) < lunge && p.mass < half * PREY_RATIO)
            {
                self.state = AiState::SplitKilling;
                self.target = Target::Ball(p.id);
                return;
            }
        }

        // D. Chase the nearest prey
        if let Some(p) = prey.first() {
            if rng.random::<f32>() < self.behavior.aggressiveness {
                self.state = AiState::Chasing;
                self.target = Target::Ball(p.id);
                return;
            }
        }

        // E. Forage
        let food = view
            .foods
            .iter()
            .map(|f| (f, f.pos.distance_squared(me.pos)))
            .filter(|(_, d2)| *d2 < FOOD_VISION_RANGE * FOOD_VISION_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((f, _)) = food {
            self.state = AiState::Eating;
            self.target = Target::Food { id: f.id, pos: f.pos };
            return;
        }

        // F. Wander
        self.start_wandering(me, view.map_size, rng);
    }

    fn start_wandering<R: Rng>(&mut self, me: &Ball, map_size: Vec2, rng: &mut R) {
        self.state = AiState::Wandering;
        if rng.random::<f32>() < WANDER_REROLL_CHANCE
            || me.pos.distance(self.wander_target) < WANDER_ARRIVE_DIST
        {
            self.wander_target = random_waypoint(rng, map_size);
        }
        self.target = Target::Waypoint(self.wander_target);
    }

    /// Fall back to the waypoint when the target went stale
    fn wander_now(&mut self) -> AiIntent {
        self.state = AiState::Wandering;
        self.target = Target::Waypoint(self.wander_target);
        AiIntent {
            steer_to: self.wander_target,
            split: false,
        }
    }

    fn can_use_split(&self, me: &Ball) -> bool {
        me.split_cooldown <= 0.0 && me.mass > SPLIT_KILL_MIN_MASS && !me.split_requested
    }

    /// Steer according to the held state and target
    pub fn execute(&mut self, me: &Ball, view: &AiView) -> AiIntent {
        match self.state {
            AiState::Wandering => AiIntent {
                steer_to: self.wander_target,
                split: false,
            },

            AiState::Eating => match self.target {
                Target::Food { id, pos } if view.foods.iter().any(|f| f.id == id) => AiIntent {
                    steer_to: pos,
                    split: false,
                },
                _ => self.wander_now(),
            },

            AiState::Chasing => match self.live_target_ball(view) {
                Some(prey) => AiIntent {
                    steer_to: predict_position(prey.pos, prey.vel, self.behavior.prediction),
                    split: false,
                },
                None => self.wander_now(),
            },

            AiState::SplitKilling => {
                let intent = self.live_target_ball(view).map(|prey| AiIntent {
                    steer_to: predict_position(prey.pos, prey.vel, self.behavior.prediction),
                    split: true,
                });
                self.state = AiState::Chasing;
                intent.unwrap_or_else(|| self.wander_now())
            }

            AiState::Fleeing => {
                let sources: Vec<Vec2> = match &self.target {
                    Target::Threats(list) => list
                        .iter()
                        .filter_map(|src| match *src {
                            ThreatSource::Ball(id) => {
                                view.ball(id).filter(|b| b.is_active()).map(|b| b.pos)
                            }
                            ThreatSource::Point(p) => Some(p),
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                if sources.is_empty() {
                    return self.wander_now();
                }
                let flee = flee_vector(me.pos, &sources, view.map_size);
                AiIntent {
                    steer_to: me.pos + flee * 100.0,
                    split: false,
                }
            }
        }
    }

    fn live_target_ball<'a>(&self, view: &'a AiView) -> Option<&'a Ball> {
        match self.target {
            Target::Ball(id) => view.ball(id).filter(|b| b.is_active()),
            _ => None,
        }
    }
}

/// Random point at least `WANDER_MARGIN` from every edge (center on tiny maps)
pub fn random_waypoint<R: Rng>(rng: &mut R, map_size: Vec2) -> Vec2 {
    let axis = |rng: &mut R, len: f32| {
        if len > 2.0 * WANDER_MARGIN {
            rng.random_range(WANDER_MARGIN..len - WANDER_MARGIN)
        } else {
            len / 2.0
        }
    };
    let x = axis(rng, map_size.x);
    let y = axis(rng, map_size.y);
    Vec2::new(x, y)
}

/// Linear lead of a moving target
///
/// Negligible prediction strength aims at the current position.
pub fn predict_position(pos: Vec2, vel: Vec2, prediction: f32) -> Vec2 {
    if prediction < 0.1 || !vel.is_finite() {
        return pos;
    }
    pos + vel * (PREDICTION_LOOKAHEAD * prediction)
}

/// Sum of unit vectors away from each source, weighted by `FLEE_FORCE / d^2`
pub fn threat_repulsion(pos: Vec2, sources: &[Vec2]) -> Vec2 {
    sources.iter().fold(Vec2::ZERO, |acc, &src| {
        let away = pos - src;
        // Coincident centers: no defined direction, and d is floored at 1
        let dist = away.length().max(1.0);
        match away.try_normalize() {
            Some(dir) => acc + dir * (FLEE_FORCE / (dist * dist)),
            None => acc,
        }
    })
}

/// Push back from any map edge closer than `EDGE_MARGIN`
pub fn edge_repulsion(pos: Vec2, map_size: Vec2) -> Vec2 {
    let mut push = Vec2::ZERO;
    if pos.x < EDGE_MARGIN {
        push.x += EDGE_MARGIN / pos.x.max(1.0);
    }
    if pos.x > map_size.x - EDGE_MARGIN {
        push.x -= EDGE_MARGIN / (map_size.x - pos.x).max(1.0);
    }
    if pos.y < EDGE_MARGIN {
        push.y += EDGE_MARGIN / pos.y.max(1.0);
    }
    if pos.y > map_size.y - EDGE_MARGIN {
        push.y -= EDGE_MARGIN / (map_size.y - pos.y).max(1.0);
    }
    push
}

/// Composite escape vector: threats plus walls
pub fn flee_vector(pos: Vec2, sources: &[Vec2], map_size: Vec2) -> Vec2 {
    threat_repulsion(pos, sources) + edge_repulsion(pos, map_size)
}

/// Behaviour for a generic bot with randomised traits
pub fn random_behavior<R: Rng>(rng: &mut R) -> BehaviorProfile {
    BehaviorProfile {
        aggressiveness: rng.random_range(0.3..0.7),
        evasion: rng.random_range(0.3..0.7),
        split_usage: rng.random_range(0.2..0.5),
        reaction_time_ms: rng.random_range(400.0..800.0),
        prediction: rng.random_range(0.0..0.4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_CELL_SIZE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const MAP: Vec2 = Vec2::new(3000.0, 3000.0);

    struct Fixture {
        balls: Vec<Ball>,
        index: HashMap<BallId, usize>,
        foods: Vec<Food>,
        viruses: Vec<Virus>,
        grid: SpatialGrid,
    }

    impl Fixture {
        fn new(balls: Vec<Ball>, foods: Vec<Food>, viruses: Vec<Virus>) -> Self {
            let index = balls.iter().enumerate().map(|(i, b)| (b.id, i)).collect();
            let mut grid = SpatialGrid::new(GRID_CELL_SIZE);
            grid.rebuild(&balls);
            Self {
                balls,
                index,
                foods,
                viruses,
                grid,
            }
        }

        fn view(&self) -> AiView<'_> {
            AiView {
                balls: &self.balls,
                index: &self.index,
                foods: &self.foods,
                viruses: &self.viruses,
                grid: &self.grid,
                map_size: MAP,
            }
        }
    }

    fn bot(aggressiveness: f32) -> AiController {
        let behavior = BehaviorProfile {
            aggressiveness,
            ..BehaviorProfile::default()
        };
        AiController::new(1, behavior, &mut Pcg32::seed_from_u64(1), MAP)
    }

    fn ball(id: BallId, x: f32, y: f32, mass: f32) -> Ball {
        Ball::new(id, Vec2::new(x, y), mass)
    }

    #[test]
    fn test_symmetric_threats_cancel_laterally() {
        let me = Vec2::new(1500.0, 1500.0);
        let sources = [Vec2::new(1600.0, 1550.0), Vec2::new(1600.0, 1450.0)];
        let v = flee_vector(me, &sources, MAP);
        assert!(v.y.abs() < 1e-6);
        assert!(v.x < 0.0);
    }

    #[test]
    fn test_inverse_square_falloff() {
        let me = Vec2::new(1500.0, 1500.0);
        let near = threat_repulsion(me, &[Vec2::new(1550.0, 1500.0)]);
        let far = threat_repulsion(me, &[Vec2::new(1600.0, 1500.0)]);
        assert!(near.length() >= 4.0 * far.length() - 1e-6);
    }

    #[test]
    fn test_coincident_threat_is_ignored() {
        let me = Vec2::new(1500.0, 1500.0);
        let v = threat_repulsion(me, &[me]);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_edge_repulsion_points_inward() {
        let push = edge_repulsion(Vec2::new(50.0, 2950.0), MAP);
        assert!(push.x > 0.0);
        assert!(push.y < 0.0);
        assert_eq!(edge_repulsion(Vec2::new(1500.0, 1500.0), MAP), Vec2::ZERO);
        // Sitting exactly on the edge stays finite
        assert!(edge_repulsion(Vec2::new(0.0, 0.0), MAP).is_finite());
    }

    #[test]
    fn test_predict_position() {
        let p = predict_position(Vec2::new(10.0, 10.0), Vec2::new(100.0, 0.0), 0.05);
        assert_eq!(p, Vec2::new(10.0, 10.0));
        let p = predict_position(Vec2::new(10.0, 10.0), Vec2::new(100.0, 0.0), 1.0);
        assert_eq!(p, Vec2::new(60.0, 10.0));
    }

    #[test]
    fn test_flees_from_every_threat() {
        let f = Fixture::new(
            vec![
                ball(1, 1500.0, 1500.0, 100.0),
                ball(2, 1700.0, 1500.0, 200.0),
                ball(3, 1300.0, 1500.0, 500.0),
                ball(4, 1500.0, 1600.0, 10.0),
            ],
            vec![],
            vec![],
        );
        let mut ai = bot(1.0);
        let mut rng = Pcg32::seed_from_u64(5);
        ai.decide(&f.balls[0], &f.view(), &mut rng);
        assert_eq!(ai.state, AiState::Fleeing);
        assert_eq!(
            ai.target,
            Target::Threats(vec![ThreatSource::Ball(2), ThreatSource::Ball(3)])
        );
    }

    #[test]
    fn test_avoids_virus_when_big() {
        let viruses = vec![Virus::new(1, Vec2::new(1560.0, 1500.0))];
        let f = Fixture::new(vec![ball(1, 1500.0, 1500.0, 400.0)], vec![], viruses.clone());
        let mut ai = bot(0.5);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::Fleeing);
        let intent = ai.execute(&f.balls[0], &f.view());
        assert!(intent.steer_to.x < 1500.0);

        // Small bots ignore viruses
        let f = Fixture::new(vec![ball(1, 1500.0, 1500.0, 100.0)], vec![], viruses);
        let mut ai = bot(0.0);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::Wandering);
    }

    #[test]
    fn test_split_kill_then_chase() {
        let f = Fixture::new(
            vec![ball(1, 1500.0, 1500.0, 400.0), ball(2, 1600.0, 1500.0, 50.0)],
            vec![],
            vec![],
        );
        let mut ai = bot(1.0);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::SplitKilling);
        assert_eq!(ai.target, Target::Ball(2));

        let intent = ai.execute(&f.balls[0], &f.view());
        assert!(intent.split);
        assert_eq!(ai.state, AiState::Chasing);

        let intent = ai.execute(&f.balls[0], &f.view());
        assert!(!intent.split);
        assert_eq!(intent.steer_to, Vec2::new(1600.0, 1500.0));
    }

    #[test]
    fn test_no_split_kill_on_cooldown() {
        let mut me = ball(1, 1500.0, 1500.0, 400.0);
        me.split_cooldown = 1.0;
        let f = Fixture::new(vec![me, ball(2, 1600.0, 1500.0, 50.0)], vec![], vec![]);
        let mut ai = bot(1.0);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::Chasing);
    }

    #[test]
    fn test_passive_bot_forages() {
        let f = Fixture::new(
            vec![ball(1, 1500.0, 1500.0, 100.0), ball(2, 1700.0, 1500.0, 20.0)],
            vec![
                Food::new(10, Vec2::new(1800.0, 1500.0)),
                Food::new(11, Vec2::new(1450.0, 1500.0)),
            ],
            vec![],
        );
        let mut ai = bot(0.0);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::Eating);
        assert_eq!(
            ai.target,
            Target::Food {
                id: 11,
                pos: Vec2::new(1450.0, 1500.0)
            }
        );
    }

    #[test]
    fn test_eaten_food_reverts_to_wander() {
        let f = Fixture::new(vec![ball(1, 1500.0, 1500.0, 100.0)], vec![], vec![]);
        let mut ai = bot(0.0);
        ai.state = AiState::Eating;
        ai.target = Target::Food {
            id: 3,
            pos: Vec2::new(1510.0, 1500.0),
        };
        let intent = ai.execute(&f.balls[0], &f.view());
        assert_eq!(ai.state, AiState::Wandering);
        assert_eq!(intent.steer_to, ai.wander_target);
    }

    #[test]
    fn test_dead_target_reverts_to_wander() {
        let mut prey = ball(2, 1600.0, 1500.0, 20.0);
        prey.get_eaten();
        let f = Fixture::new(vec![ball(1, 1500.0, 1500.0, 100.0), prey], vec![], vec![]);
        let mut ai = bot(1.0);
        ai.state = AiState::Chasing;
        ai.target = Target::Ball(2);
        let intent = ai.execute(&f.balls[0], &f.view());
        assert_eq!(ai.state, AiState::Wandering);
        assert!(!intent.split);
    }

    #[test]
    fn test_wanders_with_nothing_around() {
        let f = Fixture::new(vec![ball(1, 1500.0, 1500.0, 100.0)], vec![], vec![]);
        let mut ai = bot(1.0);
        ai.decide(&f.balls[0], &f.view(), &mut Pcg32::seed_from_u64(5));
        assert_eq!(ai.state, AiState::Wandering);
        let wp = ai.wander_target;
        assert!(wp.x >= 100.0 && wp.x <= 2900.0);
        assert!(wp.y >= 100.0 && wp.y <= 2900.0);
    }

    #[test]
    fn test_decision_cadence() {
        let f = Fixture::new(
            vec![ball(1, 1500.0, 1500.0, 100.0), ball(2, 1700.0, 1500.0, 300.0)],
            vec![],
            vec![],
        );
        let mut ai = bot(0.5);
        let mut rng = Pcg32::seed_from_u64(5);

        // First update decides immediately
        ai.update(1.0 / 60.0, &f.view(), &mut rng).unwrap();
        assert_eq!(ai.state, AiState::Fleeing);

        // Force a different state; it must persist until the cadence elapses
        ai.state = AiState::Wandering;
        ai.update(0.1, &f.view(), &mut rng).unwrap();
        assert_eq!(ai.state, AiState::Wandering);
        ai.update(0.45, &f.view(), &mut rng).unwrap();
        assert_eq!(ai.state, AiState::Fleeing);
    }

    #[test]
    fn test_update_none_when_ball_gone() {
        let mut me = ball(1, 1500.0, 1500.0, 100.0);
        me.get_eaten();
        let f = Fixture::new(vec![me], vec![], vec![]);
        let mut ai = bot(0.5);
        assert!(ai.update(0.1, &f.view(), &mut Pcg32::seed_from_u64(1)).is_none());
    }

    #[test]
    fn test_behavior_clamped_and_scaled() {
        let b = BehaviorProfile {
            aggressiveness: 3.0,
            prediction: -1.0,
            reaction_time_ms: f32::NAN,
            ..BehaviorProfile::default()
        }
        .clamped();
        assert_eq!(b.aggressiveness, 1.0);
        assert_eq!(b.prediction, 0.0);
        assert_eq!(b.reaction_time_ms, 500.0);

        let hard = BehaviorProfile::default().scaled_for(Difficulty::Hard);
        assert!(hard.reaction_time_ms < 500.0);
        assert!(hard.aggressiveness > 0.5);
    }
}
