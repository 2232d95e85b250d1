pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;

/// Number of columns in the grid.
pub const COLS: usize = 10;
/// Number of rows in the grid.
pub const ROWS: usize = 20;
