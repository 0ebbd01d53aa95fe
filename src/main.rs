//! Ball Battle headless runner
//!
//! Plays one session with an autopilot standing in for the mouse, then
//! records the result in the local high score table.
//!
//! Usage: `ball-battle [--mode M] [--difficulty D] [settings.json] [scores.json]`
//!
//! `--mode` and `--difficulty` override the values from the settings file.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use ball_battle::consts::*;
use ball_battle::highscores::{HighScores, ScoreReporter};
use ball_battle::settings::{Difficulty, GameMode, Settings};
use ball_battle::sim::ai::{AiController, AiView, BehaviorProfile};
use ball_battle::sim::{
    GameEvent, SpatialGrid, TickInput, World, basic_profiles, profiles_from_records, tick,
};

/// Host frame length (a 60 Hz display)
const HOST_DT: f32 = 1.0 / 60.0;
/// Cap on simulation steps per host frame
const MAX_SUBSTEPS: u32 = 5;
/// Sessions that never end on their own are cut off here
const MAX_SESSION_SECS: f32 = 600.0;
const DEFAULT_SCORES_PATH: &str = "ball_battle_scores.json";

/// Command line: optional mode/difficulty flags, then up to two paths
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    settings_path: Option<String>,
    scores_path: Option<String>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut cli = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => {
                    let value = args.next().ok_or("--mode needs a value")?;
                    cli.mode = Some(
                        GameMode::from_str(&value).ok_or_else(|| format!("Unknown mode '{value}'"))?,
                    );
                }
                "--difficulty" => {
                    let value = args.next().ok_or("--difficulty needs a value")?;
                    cli.difficulty = Some(
                        Difficulty::from_str(&value)
                            .ok_or_else(|| format!("Unknown difficulty '{value}'"))?,
                    );
                }
                _ if cli.settings_path.is_none() => cli.settings_path = Some(arg),
                _ if cli.scores_path.is_none() => cli.scores_path = Some(arg),
                _ => return Err(format!("Unexpected argument '{arg}'")),
            }
        }
        Ok(cli)
    }
}

/// Drives the player's cells the way a bot would
struct Autopilot {
    controller: Option<AiController>,
    grid: SpatialGrid,
    rng: Pcg32,
}

impl Autopilot {
    fn new(seed: u64, cell_size: f32) -> Self {
        Self {
            controller: None,
            grid: SpatialGrid::new(cell_size),
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
        }
    }

    /// Pointer and split trigger for the next frame
    fn sample(&mut self, world: &World) -> TickInput {
        let Some(player) = world.player() else {
            return TickInput::default();
        };

        let behavior = BehaviorProfile {
            aggressiveness: 0.7,
            evasion: 0.8,
            split_usage: 0.4,
            reaction_time_ms: 250.0,
            prediction: 0.5,
        };
        let map_size = world.map_size();
        // Control follows the largest cell
        if self.controller.as_ref().map(|c| c.ball_id) != Some(player.id) {
            self.controller = Some(AiController::new(player.id, behavior, &mut self.rng, map_size));
        }

        self.grid.rebuild(&world.balls);
        let index = world.ball_index();
        let view = AiView {
            balls: &world.balls,
            index: &index,
            foods: &world.foods,
            viruses: &world.viruses,
            grid: &self.grid,
            map_size,
        };

        let Some(controller) = self.controller.as_mut() else {
            return TickInput::default();
        };
        match controller.update(HOST_DT, &view, &mut self.rng) {
            Some(intent) => TickInput {
                pointer: Some(intent.steer_to),
                split: intent.split,
                ..Default::default()
            },
            None => TickInput::default(),
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Ball Battle (headless) starting...");

    let cli = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let mut settings = match cli.settings_path.as_deref() {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    let scores_path = cli
        .scores_path
        .unwrap_or_else(|| DEFAULT_SCORES_PATH.to_string());

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut scores = HighScores::load_or_default(&scores_path);

    // Past sessions come back as ghosts; basic bots fill the rest
    let mut profiles = profiles_from_records(&scores.entries, settings.difficulty);
    let fill = settings.basic_bot_count.saturating_sub(profiles.len());
    let mut roster_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    profiles.extend(basic_profiles(&mut roster_rng, fill, settings.difficulty));

    let mode = settings.mode;
    let cell_size = settings.grid_cell_size;
    let mut world = World::with_profiles(settings, seed, profiles);
    let mut autopilot = Autopilot::new(seed, cell_size);
    world.start();

    let mut accumulator = 0.0_f32;
    let mut input = TickInput::default();
    let mut host_time = 0.0_f32;
    let mut final_stats = None;

    while final_stats.is_none() {
        host_time += HOST_DT;
        accumulator += HOST_DT.min(MAX_FRAME_DT);

        let sampled = autopilot.sample(&world);
        input.pointer = sampled.pointer;
        input.split |= sampled.split;

        let mut substeps = 0;
        while accumulator >= REFERENCE_DT && substeps < MAX_SUBSTEPS {
            tick(&mut world, &input, REFERENCE_DT);
            accumulator -= REFERENCE_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.split = false;
            input.eject = false;
            input.pause = false;
        }

        world.advance_spawn_timer(HOST_DT);

        for event in world.drain_events() {
            match event {
                GameEvent::PlayerDied => log::info!("Player eaten at {:.1}s", world.elapsed),
                GameEvent::GameOver(stats) => final_stats = Some(stats),
                _ => {}
            }
        }

        if final_stats.is_none() && mode != GameMode::Timed && host_time >= MAX_SESSION_SECS {
            log::info!("Session cut off after {MAX_SESSION_SECS:.0}s");
            world.end();
        }
    }

    let Some(stats) = final_stats else {
        return;
    };
    println!(
        "Final: score {}, kills {}, survived {:.1}s, peak mass {:.0}, rank {}",
        stats.score,
        stats.kills,
        stats.survival_time,
        stats.max_mass,
        stats
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    scores.report(&stats, mode);
    if let Err(e) = scores.save(&scores_path) {
        log::warn!("{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        CliArgs::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_cli_flags_and_paths() {
        let cli = parse(&["--mode", "timed", "s.json", "--difficulty", "HARD", "h.json"]).unwrap();
        assert_eq!(cli.mode, Some(GameMode::Timed));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.settings_path.as_deref(), Some("s.json"));
        assert_eq!(cli.scores_path.as_deref(), Some("h.json"));

        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        assert!(parse(&["--mode", "sprint"]).is_err());
        assert!(parse(&["--difficulty"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }
}
