use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{
        grid::{Block, Grid},
        piece::{Piece, PieceKind},
    },
};

use super::{GameStats, PieceGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// All mutable game state: grid, active and next piece, statistics.
///
/// A session never ends by itself. When a freshly spawned piece collides, the
/// grid is filled with [`Block::GameOver`] and the state becomes
/// [`SessionState::GameOver`] until [`GameSession::restart`] is called.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    falling_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
    piece_id: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Creates a session whose piece sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let falling_piece = Piece::spawn(generator.next_kind());
        let next_piece = Piece::spawn(generator.next_kind());
        Self {
            grid: Grid::EMPTY,
            falling_piece,
            next_piece,
            generator,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            piece_id: 0,
        }
    }

    /// Creates a session from an existing grid and explicit pieces.
    ///
    /// Pieces after `next` come from a generator seeded with `seed`. If
    /// `falling` does not fit on `grid` the session starts in the game-over
    /// state.
    #[must_use]
    pub fn from_parts(grid: Grid, falling: PieceKind, next: PieceKind, seed: u64) -> Self {
        let mut session = Self {
            grid,
            falling_piece: Piece::spawn(falling),
            next_piece: Piece::spawn(next),
            generator: PieceGenerator::with_seed(seed),
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            piece_id: 0,
        };
        if session.grid.collides(&session.falling_piece) {
            session.top_out();
        }
        session
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Identifier of the current falling piece.
    ///
    /// Increases by one every time a new piece becomes the falling piece,
    /// including on restart, and is never reset.
    #[must_use]
    pub fn piece_id(&self) -> u64 {
        self.piece_id
    }

    /// Replaces the falling piece if it fits on the grid.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.grid.collides(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.right())
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.down())
    }

    /// Rotates clockwise, nudging sideways if needed.
    ///
    /// On failure the falling piece keeps its previous shape and position.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .nudge_rotated(&self.grid)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Moves the piece one row down, locking it if it cannot move.
    ///
    /// # Returns
    ///
    /// `None` if the piece moved, otherwise the outcome of the lock.
    pub fn auto_drop_and_complete(
        &mut self,
    ) -> Option<(usize, Result<(), CompletePieceDropError>)> {
        if self.try_soft_drop().is_ok() {
            return None;
        }
        Some(self.complete_piece_drop())
    }

    /// Drops the piece to its lowest position and locks it.
    pub fn hard_drop_and_complete(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.falling_piece = self.falling_piece.simulate_drop_position(&self.grid);
        self.complete_piece_drop()
    }

    /// Gives the falling piece the placement's shape and column, then hard-drops it.
    ///
    /// The piece keeps its current row. If the placement does not fit there
    /// the drop starts from the top row instead.
    pub fn apply_placement_and_complete(
        &mut self,
        placement: &Piece,
    ) -> (usize, Result<(), CompletePieceDropError>) {
        assert_eq!(placement.kind(), self.falling_piece.kind());
        let mut piece = placement.with_y(self.falling_piece.y());
        if self.grid.collides(&piece) {
            piece = placement.with_y(0);
        }
        self.falling_piece = piece;
        self.hard_drop_and_complete()
    }

    /// Fills the grid with the game-over sentinel and stops the session.
    pub fn top_out(&mut self) {
        tracing::info!(
            score = self.stats.score(),
            pieces = self.stats.completed_pieces(),
            "game over"
        );
        self.grid.fill(Block::GameOver);
        self.session_state = SessionState::GameOver;
    }

    /// Starts a new game: empty grid, zero score, two fresh pieces.
    ///
    /// The piece generator keeps its state, so the new game continues the
    /// random sequence instead of repeating it.
    pub fn restart(&mut self) {
        tracing::info!("restarting session");
        self.grid = Grid::EMPTY;
        self.stats = GameStats::new();
        self.falling_piece = Piece::spawn(self.generator.next_kind());
        self.next_piece = Piece::spawn(self.generator.next_kind());
        self.piece_id += 1;
        self.session_state = SessionState::Playing;
    }

    fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.grid.merge(&self.falling_piece);
        let cleared_lines = self.grid.clear_lines();
        self.stats.complete_piece_drop(cleared_lines);
        tracing::debug!(
            kind = %self.falling_piece.kind().as_char(),
            x = self.falling_piece.x(),
            y = self.falling_piece.y(),
            cleared_lines,
            score = self.stats.score(),
            "piece locked"
        );

        self.falling_piece = self.next_piece;
        self.next_piece = Piece::spawn(self.generator.next_kind());
        self.piece_id += 1;
        if self.grid.collides(&self.falling_piece) {
            self.top_out();
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }
}
