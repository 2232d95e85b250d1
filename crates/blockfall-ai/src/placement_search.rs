//! Placement search: choosing where the falling piece should land.
//!
//! For each of the four clockwise rotations of the falling piece (applied
//! cumulatively, starting from its current orientation) and each column
//! `x in -2..COLS`, the search:
//!
//! 1. rejects columns where a cell of the shape sticks out sideways,
//! 2. drops the shape straight down from the top row on a copy of the grid,
//!    skipping columns where it does not fit even at the top,
//! 3. merges it into the copy and scores the result with a
//!    [`PlacementEvaluator`].
//!
//! The highest score wins. Ties keep the first candidate found, i.e. the
//! lowest rotation count and then the leftmost column.
//!
//! # Design: Greedy One-Step Lookahead
//!
//! Only the current piece is considered. The next piece is ignored, and
//! candidates that would need sliding under an overhang are never reached.
//!
//! # Usage
//!
//! ```
//! use blockfall_ai::{placement_evaluator::HeuristicEvaluator, placement_search::PlacementSearch};
//! use blockfall_engine::{Grid, Piece, PieceKind};
//!
//! let search = PlacementSearch::new(Box::new(HeuristicEvaluator::default()));
//! let piece = Piece::spawn(PieceKind::O);
//! let placement = search.find_best_placement(&Grid::EMPTY, &piece).unwrap();
//!
//! assert_eq!(placement.rotation(), 0);
//! assert_eq!((placement.piece().x(), placement.piece().y()), (0, 18));
//! ```

use arrayvec::ArrayVec;
use blockfall_engine::{GameSession, Grid, Piece, Shape};

use crate::{board_analysis::BoardAnalysis, placement_evaluator::PlacementEvaluator};

/// Leftmost column tried for the shape's origin.
const MIN_X: i32 = -2;

/// The chosen placement of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    rotation: usize,
    piece: Piece,
    score: f64,
}

impl Placement {
    /// Number of clockwise rotations applied to the falling piece (0-3).
    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// The piece with its final shape, column and landing row.
    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Selects the best placement for the falling piece.
#[derive(Debug)]
pub struct PlacementSearch<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> PlacementSearch<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Evaluates every candidate landing spot for `piece` on `grid`.
    ///
    /// # Returns
    ///
    /// `None` if the piece fits nowhere, which callers treat as game over.
    #[must_use]
    pub fn find_best_placement(&self, grid: &Grid, piece: &Piece) -> Option<Placement> {
        let mut best: Option<Placement> = None;

        for (rotation, candidate) in available_placements(grid, piece) {
            let mut merged = grid.clone();
            merged.merge(&candidate);
            let analysis = BoardAnalysis::from_grid(merged);
            let score = self.placement_evaluator.evaluate_placement(&analysis);
            if best.is_none_or(|best| score > best.score) {
                best = Some(Placement {
                    rotation,
                    piece: candidate,
                    score,
                });
            }
        }

        match &best {
            Some(placement) => tracing::debug!(
                kind = %piece.kind().as_char(),
                rotation = placement.rotation,
                x = placement.piece.x(),
                y = placement.piece.y(),
                score = placement.score,
                "best placement found"
            ),
            None => tracing::debug!(kind = %piece.kind().as_char(), "no placement available"),
        }
        best
    }

    /// Plays the session autonomously until it tops out or `max_pieces`
    /// pieces have been placed.
    ///
    /// A falling piece with no available placement tops the session out.
    pub fn play_session(&self, session: &mut GameSession, max_pieces: usize) {
        for _ in 0..max_pieces {
            if session.session_state().is_game_over() {
                break;
            }
            let Some(placement) = self.find_best_placement(session.grid(), session.falling_piece())
            else {
                session.top_out();
                break;
            };
            let (_cleared_lines, result) = session.apply_placement_and_complete(placement.piece());
            if result.is_err() {
                break;
            }
        }
    }
}

fn rotations(shape: Shape) -> ArrayVec<Shape, 4> {
    let mut shapes = ArrayVec::new();
    let mut shape = shape;
    for _ in 0..4 {
        shapes.push(shape);
        shape = shape.rotated();
    }
    shapes
}

fn fits_horizontally(piece: &Piece) -> bool {
    piece
        .occupied_positions()
        .all(|(x, _y)| Grid::contains_column(x))
}

/// Candidate landing positions in search order, tagged with their rotation.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn available_placements<'g>(
    grid: &'g Grid,
    piece: &Piece,
) -> impl Iterator<Item = (usize, Piece)> + use<'g> {
    rotations(*piece.shape())
        .into_iter()
        .enumerate()
        .flat_map(|(rotation, shape)| {
            (MIN_X..Grid::WIDTH as i32).map(move |x| (rotation, Piece::new(shape, x, 0)))
        })
        .filter(|(_rotation, candidate)| fits_horizontally(candidate))
        .filter(move |(_rotation, candidate)| !grid.collides(candidate))
        .map(move |(rotation, candidate)| (rotation, candidate.simulate_drop_position(grid)))
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Block, GameSession, PieceKind};

    use super::*;
    use crate::placement_evaluator::HeuristicEvaluator;

    fn search() -> PlacementSearch<'static> {
        PlacementSearch::new(Box::new(HeuristicEvaluator::default()))
    }

    #[test]
    fn test_o_piece_on_empty_grid_goes_left() {
        let placement = search()
            .find_best_placement(&Grid::EMPTY, &Piece::spawn(PieceKind::O))
            .unwrap();
        assert_eq!(placement.rotation(), 0);
        assert_eq!((placement.piece().x(), placement.piece().y()), (0, 18));
        // height 4, bumpiness 2
        assert!((placement.score() - (4.0 * -0.51 + 2.0 * -0.18)).abs() < 1e-9);
    }

    #[test]
    fn test_i_piece_completes_line() {
        let grid = Grid::from_ascii("....######");
        let placement = search()
            .find_best_placement(&grid, &Piece::spawn(PieceKind::I))
            .unwrap();
        assert_eq!(placement.rotation(), 0);
        assert_eq!((placement.piece().x(), placement.piece().y()), (0, 19));
        assert!(
            (placement.score() - -4.34).abs() < 1e-9,
            "score = {}",
            placement.score()
        );
    }

    #[test]
    fn test_vertical_i_fills_well() {
        let grid = Grid::from_ascii(
            "
            IIIIIIIII.
            IIIIIIIII.
            IIIIIIIII.
            IIIIIIIII.
            ",
        );
        let placement = search()
            .find_best_placement(&grid, &Piece::spawn(PieceKind::I))
            .unwrap();
        // Rotations 1 and 3 tie; the first one wins.
        assert_eq!(placement.rotation(), 1);
        assert_eq!(placement.piece().shape().width(), 1);
        assert_eq!((placement.piece().x(), placement.piece().y()), (9, 16));
    }

    #[test]
    fn test_search_is_deterministic() {
        let grid = Grid::from_ascii(
            "
            ..S.......
            .SS..Z....
            .S..ZZ.L..
            JJJ.Z.LLL.
            ",
        );
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            let a = search().find_best_placement(&grid, &piece);
            let b = search().find_best_placement(&grid, &piece);
            assert_eq!(a, b);
            assert!(a.is_some());
        }
    }

    #[test]
    fn test_full_grid_has_no_placement() {
        let mut grid = Grid::EMPTY;
        grid.fill(Block::GameOver);
        for kind in PieceKind::ALL {
            assert!(search().find_best_placement(&grid, &Piece::spawn(kind)).is_none());
        }
    }

    #[test]
    fn test_candidates_stay_inside_grid() {
        let grid = Grid::EMPTY;
        for kind in PieceKind::ALL {
            for (_rotation, candidate) in available_placements(&grid, &Piece::spawn(kind)) {
                assert!(!grid.collides(&candidate), "{candidate:?}");
                assert!(grid.collides(&candidate.down()), "{candidate:?}");
            }
        }
    }

    #[test]
    fn test_play_session_respects_piece_limit() {
        let mut session = GameSession::with_seed(42);
        search().play_session(&mut session, 50);
        assert!(session.stats().completed_pieces() <= 50);
        if session.session_state().is_playing() {
            assert_eq!(session.stats().completed_pieces(), 50);
        }
    }
}
