//! Show screen: input/output arrays, the cell board and playback status.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tokio::time::Instant;

use crate::player::{Player, PlayerState};
use crate::render::board::BOARD_HEIGHT;
use crate::render::transcript::join;
use crate::render::{BoardView, CellBoard};
use crate::ui::components::{ACCENT_SUCCESS, ACCENT_WARNING, TEXT_MUTED, TEXT_PRIMARY};

pub struct ShowPanel<'a> {
    input: &'a [i64],
    sorted: &'a [i64],
    board: &'a CellBoard,
    player: &'a Player,
    total_steps: usize,
    now: Instant,
}

impl<'a> ShowPanel<'a> {
    pub fn new(
        input: &'a [i64],
        sorted: &'a [i64],
        board: &'a CellBoard,
        player: &'a Player,
        total_steps: usize,
        now: Instant,
    ) -> Self {
        Self {
            input,
            sorted,
            board,
            player,
            total_steps,
            now,
        }
    }

    fn array_line(label: &'static str, values: &[i64]) -> Line<'static> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(TEXT_MUTED)),
            Span::styled(join(values), Style::default().fg(TEXT_PRIMARY)),
        ])
    }

    fn status_line(&self) -> Line<'static> {
        let state = self.player.state();
        let color = match state {
            PlayerState::Running => ACCENT_SUCCESS,
            PlayerState::Paused => ACCENT_WARNING,
            PlayerState::Finished => ACCENT_SUCCESS,
            PlayerState::Idle => TEXT_MUTED,
        };
        let label = match state {
            PlayerState::Finished => "sorted".to_string(),
            other => other.to_string(),
        };
        Line::from(vec![
            Span::styled(format!("● {label}"), Style::default().fg(color)),
            Span::styled(
                format!("   step {}/{}", self.player.consumed(), self.total_steps),
                Style::default().fg(TEXT_MUTED),
            ),
        ])
    }
}

impl Widget for ShowPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [arrays_area, _, board_area, _, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(BOARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(vec![
            Self::array_line("Input:  ", self.input),
            Self::array_line("Sorted: ", self.sorted),
        ])
        .render(arrays_area, buf);

        BoardView::new(self.board, self.now).render(board_area, buf);
        Paragraph::new(self.status_line()).render(status_area, buf);
    }
}
