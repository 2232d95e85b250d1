use std::path::PathBuf;

use blockfall_ai::{
    placement_evaluator::HeuristicEvaluator, placement_search::PlacementSearch,
    weights::HeuristicWeights,
};
use blockfall_engine::GameSession;
use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Stop a game after this many pieces
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Seed of the first game; game `i` uses `seed + i`
    #[clap(long)]
    seed: Option<u64>,
    /// Path to a heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Output file path (stdout if not specified)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    generated_at: DateTime<Utc>,
    weights: HeuristicWeights,
    max_pieces: usize,
    games: Vec<GameReport>,
}

#[derive(Debug, Serialize)]
struct GameReport {
    seed: u64,
    score: usize,
    pieces: usize,
    lines: usize,
    line_cleared_counter: [usize; 5],
    topped_out: bool,
}

impl GameReport {
    fn from_session(seed: u64, session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            seed,
            score: stats.score(),
            pieces: stats.completed_pieces(),
            lines: stats.total_cleared_lines(),
            line_cleared_counter: *stats.line_cleared_counter(),
            topped_out: session.session_state().is_game_over(),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        max_pieces,
        seed,
        weights,
        output,
    } = arg;

    let weights = util::read_weights_or_default(weights.as_deref())?;
    let search = PlacementSearch::new(Box::new(HeuristicEvaluator::new(weights)));
    let base_seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut reports = Vec::with_capacity(*games);
    for i in 0..*games {
        let seed = base_seed.wrapping_add(i as u64);
        let mut session = GameSession::with_seed(seed);
        search.play_session(&mut session, *max_pieces);

        let report = GameReport::from_session(seed, &session);
        tracing::info!(
            game = i,
            seed,
            score = report.score,
            pieces = report.pieces,
            topped_out = report.topped_out,
            "game finished"
        );
        eprintln!(
            "Game {}/{}: score {}, {} pieces, {} lines{}",
            i + 1,
            games,
            report.score,
            report.pieces,
            report.lines,
            if report.topped_out { " (topped out)" } else { "" },
        );
        reports.push(report);
    }

    let report = SimulationReport {
        generated_at: Utc::now(),
        weights,
        max_pieces: *max_pieces,
        games: reports,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
