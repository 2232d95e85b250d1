use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::{
    COLS,
    grid::{Block, Grid},
};

/// Largest bounding box side of any tetromino (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Enum representing the type of piece.
///
/// The discriminant doubles as the colour tag written into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// L-piece.
    L = 6,
    /// J-piece.
    J = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Colour tag of this kind, in `1..=7`.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::L),
            7 => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Canonical (spawn) orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize - 1]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            _ => None,
        }
    }
}

/// Occupancy matrix of one tetromino orientation.
///
/// A shape is `height × width` cells inside a fixed 4×4 buffer. Occupied cells
/// hold `Block::Piece(kind)`, the rest are `Block::Empty`. Rotating swaps the
/// two dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: PieceKind,
    width: u8,
    height: u8,
    cells: [[Block; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows(kind: PieceKind, rows: &[&[Block]]) -> Self {
        let height = rows.len();
        let width = rows[0].len();
        assert!(height <= MAX_SHAPE_SIZE && width <= MAX_SHAPE_SIZE);
        let mut cells = [[Block::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < height {
            assert!(rows[r].len() == width);
            let mut c = 0;
            while c < width {
                cells[r][c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self {
            kind,
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns the block at `(col, row)` of the matrix.
    #[must_use]
    pub fn block_at(&self, col: usize, row: usize) -> Block {
        if col >= self.width() || row >= self.height() {
            return Block::Empty;
        }
        self.cells[row][col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns an iterator of occupied `(dx, dy)` offsets within the bounding box.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_dx, block)| !block.is_empty())
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Rotates the shape 90° clockwise.
    ///
    /// Cell `(r, c)` of an `N×M` matrix moves to `(c, N-1-r)` of the `M×N` result.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.height();
        let mut cells = [[Block::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in self.rows().enumerate() {
            for (c, block) in row.iter().enumerate() {
                cells[c][n - 1 - r] = *block;
            }
        }
        Self {
            kind: self.kind,
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const SHAPES: [Shape; PieceKind::LEN] = {
    use Block::Empty as E;
    const I: Block = Block::Piece(PieceKind::I);
    const O: Block = Block::Piece(PieceKind::O);
    const T: Block = Block::Piece(PieceKind::T);
    const S: Block = Block::Piece(PieceKind::S);
    const Z: Block = Block::Piece(PieceKind::Z);
    const L: Block = Block::Piece(PieceKind::L);
    const J: Block = Block::Piece(PieceKind::J);
    [
        Shape::from_rows(PieceKind::I, &[&[I, I, I, I]]),
        Shape::from_rows(PieceKind::O, &[&[O, O], &[O, O]]),
        Shape::from_rows(PieceKind::T, &[&[E, T, E], &[T, T, T]]),
        Shape::from_rows(PieceKind::S, &[&[S, S, E], &[E, S, S]]),
        Shape::from_rows(PieceKind::Z, &[&[E, Z, Z], &[Z, Z, E]]),
        Shape::from_rows(PieceKind::L, &[&[L, E, E], &[L, L, L]]),
        Shape::from_rows(PieceKind::J, &[&[E, E, J], &[J, J, J]]),
    ]
};

/// A tetromino with its current orientation and grid position.
///
/// `(x, y)` is the top-left corner of the shape's bounding box in grid
/// coordinates. Positions may be negative or past the right edge; legality is
/// decided by [`Grid::collides`]. Movement operations return new values and
/// never check the grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::O);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
/// let moved = piece.left().down();
/// assert_eq!((moved.x(), moved.y()), (3, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of `kind` in its canonical orientation, horizontally
    /// centred on the top row.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let x = (COLS / 2) as i32 - (shape.width() / 2) as i32;
        Self::new(shape, x, 0)
    }

    #[must_use]
    pub const fn new(shape: Shape, x: i32, y: i32) -> Self {
        Self { shape, x, y }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn block(&self) -> Block {
        Block::Piece(self.kind())
    }

    /// Returns an iterator of occupied `(x, y)` grid positions.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_positions()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    #[must_use]
    pub fn with_x(&self, x: i32) -> Self {
        Self { x, ..*self }
    }

    #[must_use]
    pub fn with_y(&self, y: i32) -> Self {
        Self { y, ..*self }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.with_x(self.x - 1)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.with_x(self.x + 1)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.with_y(self.y - 1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.with_y(self.y + 1)
    }

    /// Rotates the shape clockwise in place, keeping the top-left corner.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Rotates clockwise and nudges sideways until the piece fits.
    ///
    /// The nudge offsets are `+1, -2, +3, -4, ...` applied cumulatively, so the
    /// tried columns are `x+1, x-1, x+2, x-2, ...`. The search gives up once the
    /// next offset exceeds the rotated width plus one.
    ///
    /// # Returns
    ///
    /// The rotated piece, or `None` if no tried column is legal.
    #[must_use]
    pub fn nudge_rotated(&self, grid: &Grid) -> Option<Self> {
        let mut piece = self.rotated();
        let limit = i32::from(piece.shape.width) + 1;
        let mut offset: i32 = 1;
        while grid.collides(&piece) {
            piece = piece.with_x(piece.x + offset);
            offset = -(offset + offset.signum());
            if offset > limit {
                return None;
            }
        }
        Some(piece)
    }

    /// Returns the lowest legal position reachable by falling straight down.
    ///
    /// If the piece already collides, it is returned unchanged.
    #[must_use]
    pub fn simulate_drop_position(&self, grid: &Grid) -> Self {
        let mut dropped = *self;
        loop {
            let next = dropped.down();
            if grid.collides(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(shape: &Shape) -> Vec<(usize, usize)> {
        shape.occupied_positions().collect()
    }

    #[test]
    fn test_shape_catalog() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.kind(), kind);
            assert_eq!(occupied(&shape).len(), 4, "{kind:?} must have 4 cells");
            for (dx, dy) in shape.occupied_positions() {
                assert_eq!(shape.block_at(dx, dy), Block::Piece(kind));
            }
        }
        assert_eq!((PieceKind::I.shape().width(), PieceKind::I.shape().height()), (4, 1));
        assert_eq!((PieceKind::O.shape().width(), PieceKind::O.shape().height()), (2, 2));
        assert_eq!(
            occupied(&PieceKind::T.shape()),
            vec![(1, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_tag_round_trip() {
        for kind in PieceKind::ALL {
            assert!((1..=7).contains(&kind.tag()));
            assert_eq!(PieceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(PieceKind::from_tag(0), None);
        assert_eq!(PieceKind::from_tag(8), None);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let t = PieceKind::T.shape();
        let rotated = t.rotated();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // [[0,3,0],[3,3,3]] -> [[3,0],[3,3],[3,0]]
        assert_eq!(occupied(&rotated), vec![(0, 0), (0, 1), (1, 1), (0, 2)]);

        let i = PieceKind::I.shape().rotated();
        assert_eq!((i.width(), i.height()), (1, 4));
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let once = shape.rotated();
            assert_eq!((once.width(), once.height()), (shape.height(), shape.width()));
            let back = once.rotated().rotated().rotated();
            assert_eq!(back, shape, "{kind:?} should return to its original shape");
        }
    }

    #[test]
    fn test_spawn_position() {
        let i = Piece::spawn(PieceKind::I);
        assert_eq!((i.x(), i.y()), (3, 0));
        let o = Piece::spawn(PieceKind::O);
        assert_eq!((o.x(), o.y()), (4, 0));
        let t = Piece::spawn(PieceKind::T);
        assert_eq!((t.x(), t.y()), (4, 0));
        assert_eq!(
            o.occupied_positions().collect::<Vec<_>>(),
            vec![(4, 0), (5, 0), (4, 1), (5, 1)]
        );
    }

    #[test]
    fn test_nudge_rotated_in_open_space() {
        let grid = Grid::EMPTY;
        let piece = Piece::spawn(PieceKind::T).down();
        let rotated = piece.nudge_rotated(&grid).unwrap();
        assert_eq!((rotated.x(), rotated.y()), (piece.x(), piece.y()));
        assert_eq!(rotated.shape(), &piece.shape().rotated());
    }

    #[test]
    fn test_nudge_rotated_off_the_right_wall() {
        let grid = Grid::EMPTY;
        // Columns tried from x=8: 8, 9, 7, 10, 6. Column 6 is the first fit.
        let vertical = Piece::new(PieceKind::I.shape().rotated(), 8, 5);
        assert!(!grid.collides(&vertical));
        let rotated = vertical.nudge_rotated(&grid);
        assert_eq!(rotated.map(|p| (p.x(), p.y())), Some((6, 5)));

        // From x=9 the search stops before reaching column 6.
        let vertical = Piece::new(PieceKind::I.shape().rotated(), 9, 5);
        assert!(!grid.collides(&vertical));
        assert_eq!(vertical.nudge_rotated(&grid), None);
    }

    #[test]
    fn test_nudge_rotated_gives_up() {
        // Fill everything but a vertical slot for the I-piece in column 0.
        let grid = Grid::from_ascii(
            "
            .#########
            .#########
            .#########
            .#########
            ",
        );
        let vertical = Piece::new(PieceKind::I.shape().rotated(), 0, 16);
        assert!(!grid.collides(&vertical));
        assert_eq!(vertical.nudge_rotated(&grid), None);
    }

    #[test]
    fn test_simulate_drop_position() {
        let grid = Grid::EMPTY;
        let dropped = Piece::spawn(PieceKind::O).simulate_drop_position(&grid);
        assert_eq!(dropped.y(), 18);
    }
}
