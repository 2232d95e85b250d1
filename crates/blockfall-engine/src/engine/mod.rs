//! Game rules built on top of the core data structures.
//!
//! - [`GameSession`] - Grid, falling and next piece, statistics, game-over state
//! - [`GameStats`] - Score and line clear counters
//! - [`PieceGenerator`] - Uniformly random, seedable piece kinds
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a seed
//! 2. Player or AI manipulates the falling piece (move, rotate, soft drop)
//! 3. The piece locks on a failed gravity step or a hard drop
//! 4. Full lines are cleared, the score grows, the next piece spawns
//! 5. If the spawned piece collides the grid is filled with the game-over
//!    sentinel, and the session waits for [`GameSession::restart`]
//!
//! # Example
//!
//! ```
//! use blockfall_engine::GameSession;
//!
//! let mut session = GameSession::with_seed(42);
//! session.try_move_left().ok();
//! session.try_rotate().ok();
//!
//! let (cleared_lines, result) = session.hard_drop_and_complete();
//! assert_eq!(cleared_lines, 0);
//! assert!(result.is_ok());
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{game_session::*, game_stats::*, piece_generator::*};

mod game_session;
mod game_stats;
mod piece_generator;
