use blockfall_engine::{MAX_SHAPE_SIZE, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// Preview of a single shape, centred in a box fitting any tetromino.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    shape: Option<Shape>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            shape: None,
            block: None,
        }
    }

    pub fn shape(self, shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(shape) = &self.shape else {
            return;
        };
        let (w, h) = (shape.width() as u16, shape.height() as u16);
        let piece_area = area.centered(
            Constraint::Length(w * BlockDisplay::width()),
            Constraint::Length(h * BlockDisplay::height()),
        );

        let col_constraints = (0..w).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..h).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let block_display = BlockDisplay::from_block(shape.block_at(x, y), false);
                Widget::render(&block_display, grid_cell, buf);
            }
        }
    }
}
