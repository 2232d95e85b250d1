//! Heuristic AI choosing where the falling piece should land.
//!
//! The crate is organized in three layers:
//!
//! 1. **Board Analysis** ([`board_analysis`]) - Lazily computed metrics of a
//!    candidate grid: column heights, completed lines, holes, bumpiness.
//!
//! 2. **Placement Evaluation** ([`placement_evaluator`]) - Scores a candidate
//!    grid as a weighted sum of those metrics, using [`weights`].
//!
//! 3. **Placement Search** ([`placement_search`]) - Enumerates every rotation
//!    and column of the falling piece and keeps the best-scoring landing spot.
//!
//! # Architecture
//!
//! ```text
//! Placement Search (select best landing spot)
//!     ↓ uses
//! Placement Evaluation (score single candidate grid)
//!     ↓ uses
//! Board Analysis (metrics of the grid)
//! ```
//!
//! # Example
//!
//! ```
//! use blockfall_ai::{
//!     placement_evaluator::HeuristicEvaluator, placement_search::PlacementSearch,
//!     weights::HeuristicWeights,
//! };
//! use blockfall_engine::GameSession;
//!
//! let search = PlacementSearch::new(Box::new(HeuristicEvaluator::new(HeuristicWeights::DEFAULT)));
//! let mut session = GameSession::with_seed(1);
//!
//! let placement = search
//!     .find_best_placement(session.grid(), session.falling_piece())
//!     .unwrap();
//! let (_cleared_lines, result) = session.apply_placement_and_complete(placement.piece());
//! assert!(result.is_ok());
//! ```
//!
//! # Current Limitations
//!
//! - **One-step lookahead**: the next piece is not taken into account.
//! - **Straight drops only**: placements that need a slide or a spin under an
//!   overhang are never considered.

pub mod board_analysis;
pub mod placement_evaluator;
pub mod placement_search;
pub mod weights;
