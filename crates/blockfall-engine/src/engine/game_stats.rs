/// Points awarded for clearing `lines` rows in a single lock.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 400 points
/// - 3 lines: 900 points
/// - 4 lines: 1600 points
#[must_use]
pub const fn line_clear_score(lines: usize) -> usize {
    let multiplier = if lines > 1 { lines } else { 1 };
    100 * lines * multiplier
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: Points earned from line clears (see [`line_clear_score`])
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of single, double, triple, quad line clears
///
/// The score only ever grows; a new `GameStats` is created on restart.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1600);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Index `n` is the number of locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by this lock (0-4)
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += line_clear_score(cleared_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 900);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_complete_piece_drop_accumulates() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(1);
        stats.complete_piece_drop(2);
        stats.complete_piece_drop(1);

        assert_eq!(stats.score(), 100 + 400 + 100);
        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.total_cleared_lines(), 4);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 1, 0, 0]);
    }
}
