use super::{
    COLS, ROWS,
    piece::{Piece, PieceKind},
};

/// A single cell of the grid.
///
/// Every block maps to a small integer tag: `0` for empty, `1..=7` for the
/// tetromino colours and [`Block::GAME_OVER_TAG`] for the game-over fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked cell of a specific piece type.
    Piece(PieceKind),
    /// Sentinel written over the whole grid when the game is lost.
    GameOver,
}

impl Block {
    pub const GAME_OVER_TAG: u8 = 8;

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.tag(),
            Block::GameOver => Self::GAME_OVER_TAG,
        }
    }

    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Block::Empty),
            Self::GAME_OVER_TAG => Some(Block::GameOver),
            _ => match PieceKind::from_tag(tag) {
                Some(kind) => Some(Block::Piece(kind)),
                None => None,
            },
        }
    }
}

type Row = [Block; COLS];

const EMPTY_ROW: Row = [Block::Empty; COLS];

fn is_row_filled(row: &Row) -> bool {
    row.iter().all(|b| !b.is_empty())
}

/// The playing field: `ROWS × COLS` cells, row 0 at the top.
///
/// `Grid` is the sole authority on move legality ([`Grid::collides`]). It is a
/// plain value: `clone()` yields an independent copy that simulations can
/// mutate freely.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// let piece = Piece::spawn(PieceKind::O).simulate_drop_position(&grid);
/// grid.merge(&piece);
/// assert!(grid.collides(&piece));
/// assert_eq!(grid.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = COLS;
    pub const HEIGHT: usize = ROWS;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; COLS]> + '_ {
        self.rows.iter()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> &[Block; COLS] {
        &self.rows[y]
    }

    #[must_use]
    pub fn block_at(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    pub fn set_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Converts signed coordinates into indices, if they lie on the grid.
    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < COLS)?;
        let y = usize::try_from(y).ok().filter(|y| *y < ROWS)?;
        Some((x, y))
    }

    /// Checks whether a column index lies within the grid.
    #[must_use]
    pub fn contains_column(x: i32) -> bool {
        usize::try_from(x).is_ok_and(|x| x < COLS)
    }

    /// Checks if the piece collides with the walls, the floor, the ceiling or
    /// occupied cells.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(x, y)| match Self::index(x, y) {
                Some((x, y)) => !self.rows[y][x].is_empty(),
                None => true,
            })
    }

    /// Writes the piece's blocks into the grid at its current position.
    ///
    /// Cells that fall outside the grid are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let block = piece.block();
        for (x, y) in piece.occupied_positions() {
            if let Some((x, y)) = Self::index(x, y) {
                self.rows[y][x] = block;
            }
        }
    }

    /// Overwrites every cell with `block`.
    pub fn fill(&mut self, block: Block) {
        self.rows = [[block; COLS]; ROWS];
    }

    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        is_row_filled(&self.rows[y])
    }

    /// Number of rows without any empty cell.
    #[must_use]
    pub fn count_filled_rows(&self) -> usize {
        self.rows.iter().filter(|row| is_row_filled(row)).count()
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows above a cleared line shift down, keeping their order, and the
    /// vacated rows at the top become empty.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..ROWS).rev() {
            if is_row_filled(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Creates a `Grid` from ASCII art, mainly for tests.
    ///
    /// `.` is an empty cell, a piece letter (`I`, `O`, `T`, `S`, `Z`, `L`, `J`)
    /// is a cell of that piece, `#` is a cell of an I-piece and `X` is the
    /// game-over sentinel. Whitespace is ignored. Rows are listed top to
    /// bottom and aligned to the bottom of the grid, so the last line given is
    /// row `ROWS - 1`.
    ///
    /// # Panics
    ///
    /// Panics if a row is not exactly `COLS` cells wide, if there are more
    /// than `ROWS` rows or if an unknown character appears.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= ROWS,
            "At most {ROWS} rows are allowed, got {}",
            lines.len()
        );
        let top = ROWS - lines.len();

        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Block> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Block::Empty,
                    '#' => Block::Piece(PieceKind::I),
                    'X' => Block::GameOver,
                    c => Block::Piece(
                        PieceKind::from_char(c)
                            .unwrap_or_else(|| panic!("Unknown cell character {c:?}")),
                    ),
                })
                .collect();
            assert_eq!(
                cells.len(),
                COLS,
                "Each row must have exactly {COLS} cells, got {} at row {i}",
                cells.len(),
            );
            grid.rows[top + i].copy_from_slice(&cells);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn o_piece_at(x: i32, y: i32) -> Piece {
        Piece::spawn(PieceKind::O).with_x(x).with_y(y)
    }

    #[test]
    fn test_initial_grid() {
        let grid = Grid::EMPTY;
        for (y, row) in grid.rows().enumerate() {
            for (x, block) in row.iter().enumerate() {
                assert_eq!(
                    *block,
                    Block::Empty,
                    "Grid should be empty, got {block:?} at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_block_tags() {
        assert_eq!(Block::Empty.tag(), 0);
        assert_eq!(Block::Piece(PieceKind::I).tag(), 1);
        assert_eq!(Block::Piece(PieceKind::J).tag(), 7);
        assert_eq!(Block::GameOver.tag(), 8);
        for tag in 0..=8 {
            assert_eq!(Block::from_tag(tag).map(Block::tag), Some(tag));
        }
        assert_eq!(Block::from_tag(9), None);
    }

    #[test]
    fn test_collides_with_bounds() {
        let grid = Grid::EMPTY;
        assert!(!grid.collides(&o_piece_at(0, 0)));
        assert!(!grid.collides(&o_piece_at(8, 18)));

        // left, right, bottom, top
        assert!(grid.collides(&o_piece_at(-1, 5)));
        assert!(grid.collides(&o_piece_at(9, 5)));
        assert!(grid.collides(&o_piece_at(4, 19)));
        assert!(grid.collides(&o_piece_at(4, -1)));
    }

    #[test]
    fn test_collides_ignores_empty_cells_of_the_shape() {
        // T is [[0,3,0],[3,3,3]]: its empty top corners may overlap
        // occupied cells.
        let grid = Grid::from_ascii(
            "
            #.#.......
            ..........
            ",
        );
        let t = Piece::spawn(PieceKind::T).with_x(0).with_y(18);
        assert!(!grid.collides(&t));
        assert!(grid.collides(&t.with_x(1)));
    }

    #[test]
    fn test_collides_with_occupied_cells() {
        let grid = Grid::from_ascii("....#.....");
        assert!(grid.collides(&o_piece_at(3, 18)));
        assert!(grid.collides(&o_piece_at(4, 18)));
        assert!(!grid.collides(&o_piece_at(5, 18)));
        assert!(!grid.collides(&o_piece_at(4, 17)));
    }

    #[test]
    fn test_merge() {
        let mut grid = Grid::EMPTY;
        let piece = o_piece_at(4, 18);
        grid.merge(&piece);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(grid.block_at(x, y), Block::Piece(PieceKind::O));
        }
        let occupied = grid
            .rows()
            .flatten()
            .filter(|block| !block.is_empty())
            .count();
        assert_eq!(occupied, 4);
        // The piece itself is untouched.
        assert_eq!((piece.x(), piece.y()), (4, 18));
    }

    #[test]
    fn test_clear_lines_without_full_rows_is_noop() {
        let mut grid = Grid::from_ascii(
            "
            ..T.......
            TTT.####..
            #########.
            ",
        );
        let before = grid.clone();
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_lines_bottom_line() {
        let mut grid = Grid::from_ascii(
            "
            O.........
            OOOOOOOOOO
            ",
        );
        assert_eq!(grid.clear_lines(), 1);
        assert_eq!(
            grid,
            Grid::from_ascii(
                "
                ..........
                O.........
                "
            )
        );
        assert!(grid.row(0).iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_lines_non_consecutive() {
        let mut grid = Grid::from_ascii(
            "
            ...S......
            IIIIIIIIII
            ....Z.....
            JJJJJJJJJJ
            L.........
            ",
        );
        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(
            grid,
            Grid::from_ascii(
                "
                ...S......
                ....Z.....
                L.........
                "
            )
        );
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut grid = Grid::EMPTY;
        grid.fill(Block::Piece(PieceKind::I));
        assert_eq!(grid.count_filled_rows(), ROWS);
        assert_eq!(grid.clear_lines(), ROWS);
        assert_eq!(grid, Grid::EMPTY);
    }

    #[test]
    fn test_from_ascii_is_bottom_aligned() {
        let grid = Grid::from_ascii(
            "
            T.........
            .........X
            ",
        );
        assert_eq!(grid.block_at(0, ROWS - 2), Block::Piece(PieceKind::T));
        assert_eq!(grid.block_at(9, ROWS - 1), Block::GameOver);
        assert_eq!(grid.block_at(0, 0), Block::Empty);
    }
}
