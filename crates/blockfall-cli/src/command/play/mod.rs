use std::{path::PathBuf, time::Duration};

use blockfall_ai::{placement_evaluator::HeuristicEvaluator, placement_search::PlacementSearch};
use blockfall_engine::GameSession;
use blockfall_runtime::Runtime;

use self::{
    app::PlayApp,
    controller::{ControllerConfig, GameController, Mode},
};
use crate::util;

mod app;
mod controller;

const DEFAULT_AI_DELAY_MS: u64 = 100;
const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;
const DEFAULT_RESTART_DELAY_MS: u64 = 500;
const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Start in player mode instead of letting the AI play
    #[clap(long)]
    manual: bool,
    /// Seed for the piece sequence
    #[clap(long)]
    seed: Option<u64>,
    /// Path to a heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Delay before the AI places a freshly spawned piece
    #[clap(long, default_value_t = DEFAULT_AI_DELAY_MS)]
    ai_delay_ms: u64,
    /// Gravity interval in player mode
    #[clap(long, default_value_t = DEFAULT_DROP_INTERVAL_MS)]
    drop_interval_ms: u64,
    /// How long the game-over screen stays before a new game starts
    #[clap(long, default_value_t = DEFAULT_RESTART_DELAY_MS)]
    restart_delay_ms: u64,
    /// Frames per second
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            manual: false,
            seed: None,
            weights: None,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
            fps: DEFAULT_FPS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        manual,
        seed,
        weights,
        ai_delay_ms,
        drop_interval_ms,
        restart_delay_ms,
        fps,
    } = arg;

    let weights = util::read_weights_or_default(weights.as_deref())?;
    let search = PlacementSearch::new(Box::new(HeuristicEvaluator::new(weights)));
    let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
    let mode = if *manual { Mode::Manual } else { Mode::Autonomous };
    let config = ControllerConfig {
        ai_delay: Duration::from_millis(*ai_delay_ms),
        drop_interval: Duration::from_millis(*drop_interval_ms),
        restart_delay: Duration::from_millis(*restart_delay_ms),
    };
    tracing::info!(?seed, ?weights, ?config, "starting play");

    let mut app = PlayApp::new(GameController::new(session, mode, search, config), *fps);
    Runtime::new().run(&mut app)?;

    let stats = app.controller().session().stats();
    tracing::info!(
        score = stats.score(),
        pieces = stats.completed_pieces(),
        "play finished"
    );
    Ok(())
}
