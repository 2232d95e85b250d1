use std::{cell::OnceCell, iter};

use blockfall_engine::{COLS, Grid, ROWS};

/// Lazily computed metrics of a candidate grid.
///
/// The grid is analysed as given: rows that are full are counted by
/// [`BoardAnalysis::completed_lines`] but not removed, so heights and holes
/// describe the grid before line clearing.
#[derive(Debug)]
pub struct BoardAnalysis {
    grid: Grid,
    column_heights: OnceCell<[u8; COLS]>,
    column_occupied_cells: OnceCell<[u8; COLS]>,
    aggregate_height: OnceCell<u32>,
    completed_lines: OnceCell<u32>,
    num_holes: OnceCell<u32>,
    bumpiness: OnceCell<u32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            column_heights: OnceCell::new(),
            column_occupied_cells: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            completed_lines: OnceCell::new(),
            num_holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Height of each column: `ROWS - y` of its topmost occupied cell, or 0.
    #[must_use]
    pub fn column_heights(&self) -> &[u8; COLS] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; COLS];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let min_y = self
                    .grid
                    .rows()
                    .position(|row| !row[x].is_empty());
                let Some(min_y) = min_y else {
                    continue;
                };
                *h = u8::try_from(ROWS - min_y).unwrap();
            }
            column_heights
        })
    }

    #[must_use]
    pub fn column_occupied_cells(&self) -> &[u8; COLS] {
        self.column_occupied_cells.get_or_init(|| {
            let mut column_occupied_cells = [0; COLS];
            for row in self.grid.rows() {
                for (block, o) in iter::zip(row, &mut column_occupied_cells) {
                    if !block.is_empty() {
                        *o += 1;
                    }
                }
            }
            column_occupied_cells
        })
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        *self
            .aggregate_height
            .get_or_init(|| self.column_heights().iter().copied().map(u32::from).sum())
    }

    /// Number of rows with no empty cell.
    #[must_use]
    pub fn completed_lines(&self) -> u32 {
        *self
            .completed_lines
            .get_or_init(|| u32::try_from(self.grid.count_filled_rows()).unwrap())
    }

    /// Empty cells lying below the topmost occupied cell of their column.
    #[must_use]
    pub fn num_holes(&self) -> u32 {
        *self.num_holes.get_or_init(|| {
            iter::zip(self.column_heights(), self.column_occupied_cells())
                .map(|(h, occ)| u32::from(h - occ))
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| u32::from(w[0].abs_diff(w[1])))
                .sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let analysis = BoardAnalysis::from_grid(Grid::EMPTY);
        assert_eq!(analysis.column_heights(), &[0; COLS]);
        assert_eq!(analysis.aggregate_height(), 0);
        assert_eq!(analysis.completed_lines(), 0);
        assert_eq!(analysis.num_holes(), 0);
        assert_eq!(analysis.bumpiness(), 0);
    }

    #[test]
    fn test_features() {
        let analysis = BoardAnalysis::from_grid(Grid::from_ascii(
            "
            .T........
            TTT.......
            .Z.....O..
            IIIIIIIIII
            ",
        ));
        assert_eq!(analysis.column_heights(), &[3, 4, 3, 1, 1, 1, 1, 2, 1, 1]);
        assert_eq!(analysis.column_occupied_cells(), &[2, 4, 2, 1, 1, 1, 1, 2, 1, 1]);
        assert_eq!(analysis.aggregate_height(), 18);
        assert_eq!(analysis.completed_lines(), 1);
        // Column 0 and column 2 each have one empty cell under their top.
        assert_eq!(analysis.num_holes(), 2);
        // 1 + 1 + 2 + 0 + 0 + 0 + 1 + 1 + 0
        assert_eq!(analysis.bumpiness(), 6);
    }

    #[test]
    fn test_holes_counted_from_column_top() {
        let analysis = BoardAnalysis::from_grid(Grid::from_ascii(
            "
            S.........
            ..........
            ..........
            S.........
            ",
        ));
        assert_eq!(analysis.column_heights()[0], 4);
        assert_eq!(analysis.num_holes(), 2);
    }

    #[test]
    fn test_game_over_cells_are_occupied() {
        let analysis = BoardAnalysis::from_grid(Grid::from_ascii("XXXXXXXXXX"));
        assert_eq!(analysis.completed_lines(), 1);
        assert_eq!(analysis.aggregate_height(), 10);
    }
}
