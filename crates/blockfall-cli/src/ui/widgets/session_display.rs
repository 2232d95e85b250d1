use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Board in the centre, statistics on the left, next piece on the right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    mode_label: &'a str,
    autonomous: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            mode_label: "",
            autonomous: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Shows the control mode under the board.
    pub fn mode(self, label: &'a str, autonomous: bool) -> Self {
        Self {
            mode_label: label,
            autonomous,
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Playing if self.autonomous => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.session.grid()).block(
                Block::bordered()
                    .title_bottom(Line::from(format!(" {} ", self.mode_label)).centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            // The spawned piece overlaps the game-over fill; keep the fill intact.
            if self.session.session_state().is_playing() {
                widget.falling_piece(*self.session.falling_piece())
            } else {
                widget
            }
        };
        let next_panel = PieceDisplay::new()
            .shape(*self.session.next_piece().shape())
            .block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let session_stats = SessionStatsDisplay::new(self.session.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if self.session.session_state().is_game_over() {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER!!", style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
