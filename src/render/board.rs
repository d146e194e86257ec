//! Cell row renderer for the TUI.
//!
//! [`CellBoard`] holds the visual state the player mutates through
//! [`Renderer`]; [`BoardView`] draws it into a ratatui buffer at a given
//! instant so swap animations can be interpolated.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use tokio::time::Instant;

use super::{Element, Renderer};

/// Columns taken by one cell, border included.
pub const CELL_WIDTH: u16 = 6;
/// Rows taken by one cell, border included.
pub const CELL_HEIGHT: u16 = 3;
/// Rows the board needs: cells plus the compare marker line.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT + 1;

const CELL_FG: Color = Color::Rgb(220, 220, 220);
const COMPARE_FG: Color = Color::Rgb(255, 196, 0);
const SETTLED_FG: Color = Color::Rgb(80, 200, 120);
const DONE_FG: Color = Color::Rgb(120, 120, 120);

/// Left edge of the cell at `position`, saturating far off to the right.
fn column_offset(position: usize) -> u16 {
    u16::try_from(position)
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Normal,
    Compared,
    Settled,
}

#[derive(Debug, Clone, Copy)]
struct SwapAnimation {
    /// Positions after the swap; the element now at `a` came from `b`.
    a: usize,
    b: usize,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct CellBoard {
    /// Elements by position.
    cells: Vec<Element>,
    settled: Vec<bool>,
    /// Right-hand position of the compared pair.
    compare: Option<usize>,
    finished: bool,
    animation: Option<SwapAnimation>,
    animation_duration: Duration,
    /// Instant of the tick being applied, stamped on swap animations.
    tick_at: Option<Instant>,
}

impl CellBoard {
    pub fn new(animation_duration: Duration) -> Self {
        Self {
            cells: Vec::new(),
            settled: Vec::new(),
            compare: None,
            finished: false,
            animation: None,
            animation_duration,
            tick_at: None,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.cells
    }

    pub fn values(&self) -> Vec<i64> {
        self.cells.iter().map(|e| e.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Positions currently highlighted by the compare marker.
    pub fn compared(&self) -> Option<(usize, usize)> {
        self.compare.map(|i| (i.saturating_sub(1), i))
    }

    pub fn cell_state(&self, position: usize) -> CellState {
        if self.settled.get(position).copied().unwrap_or(false) {
            CellState::Settled
        } else if self
            .compared()
            .is_some_and(|(l, r)| position == l || position == r)
        {
            CellState::Compared
        } else {
            CellState::Normal
        }
    }

    /// Horizontal offset of the cell at `position` at instant `now`, in
    /// columns from the board origin.
    pub fn cell_x(&self, position: usize, now: Instant) -> u16 {
        let Some(anim) = self.animation else {
            return column_offset(position);
        };
        let origin = if position == anim.a {
            anim.b
        } else if position == anim.b {
            anim.a
        } else {
            return column_offset(position);
        };
        let target = position as f64 * f64::from(CELL_WIDTH);
        let progress = if self.animation_duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(anim.started).as_secs_f64()
                / self.animation_duration.as_secs_f64())
            .min(1.0)
        };
        let from = origin as f64 * f64::from(CELL_WIDTH);
        (from + (target - from) * progress).round() as u16
    }

    /// Whether a swap is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation
            .is_some_and(|a| now.saturating_duration_since(a.started) < self.animation_duration)
    }
}

impl Default for CellBoard {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Renderer for CellBoard {
    fn begin_tick(&mut self, now: Instant) {
        self.tick_at = Some(now);
    }

    fn render_initial(&mut self, elements: &[Element]) {
        self.cells = elements.to_vec();
        self.settled = vec![false; elements.len()];
        self.compare = None;
        self.finished = false;
        self.animation = None;
    }

    fn apply_compare(&mut self, i: usize) {
        self.compare = Some(i);
    }

    fn apply_swap(&mut self, i: usize, j: usize) {
        if i >= self.cells.len() || j >= self.cells.len() {
            tracing::warn!(i, j, len = self.cells.len(), "Swap outside board");
            return;
        }
        self.cells.swap(i, j);
        self.animation = Some(SwapAnimation {
            a: i,
            b: j,
            started: self.tick_at.unwrap_or_else(Instant::now),
        });
    }

    fn apply_mark_max(&mut self, i: usize) {
        self.compare = None;
        if let Some(slot) = self.settled.get_mut(i) {
            *slot = true;
        }
    }

    fn apply_end(&mut self) {
        self.compare = None;
        self.finished = true;
        self.settled.iter_mut().for_each(|s| *s = true);
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.settled.clear();
        self.compare = None;
        self.finished = false;
        self.animation = None;
        self.tick_at = None;
    }
}

/// Draws a [`CellBoard`] as it looks at `now`.
pub struct BoardView<'a> {
    board: &'a CellBoard,
    now: Instant,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a CellBoard, now: Instant) -> Self {
        Self { board, now }
    }

    fn cell_style(&self, position: usize) -> Style {
        if self.board.finished {
            return Style::default().fg(SETTLED_FG);
        }
        match self.board.cell_state(position) {
            CellState::Normal => Style::default().fg(CELL_FG),
            CellState::Compared => Style::default().fg(COMPARE_FG),
            CellState::Settled => Style::default().fg(SETTLED_FG).add_modifier(Modifier::BOLD),
        }
    }

    fn render_cell(&self, position: usize, area: Rect, buf: &mut Buffer) {
        let x = area.x.saturating_add(self.board.cell_x(position, self.now));
        if x.saturating_add(CELL_WIDTH) > area.right() || area.height < CELL_HEIGHT {
            return;
        }
        let rect = Rect::new(x, area.y, CELL_WIDTH, CELL_HEIGHT);
        let style = self.cell_style(position);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        Paragraph::new(self.board.cells[position].value.to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(block)
            .render(rect, buf);
    }

    fn render_marker(&self, area: Rect, buf: &mut Buffer) {
        if area.height < BOARD_HEIGHT {
            return;
        }
        let y = area.y + CELL_HEIGHT;
        let (marker, style) = if self.board.finished {
            ("─".repeat(CELL_WIDTH as usize), Style::default().fg(DONE_FG))
        } else {
            ("▔".repeat(CELL_WIDTH as usize), Style::default().fg(COMPARE_FG))
        };
        let positions: Vec<usize> = match self.board.compared() {
            Some((l, r)) if !self.board.finished => vec![l, r],
            _ if self.board.finished => (0..self.board.cells.len()).collect(),
            _ => Vec::new(),
        };
        for position in positions {
            let x = area.x.saturating_add(column_offset(position));
            if x.saturating_add(CELL_WIDTH) > area.right() {
                break;
            }
            buf.set_string(x, y, &marker, style);
        }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let moving = self
            .board
            .animation
            .filter(|_| self.board.is_animating(self.now))
            .map(|a| [a.a, a.b]);

        // Moving cells go last so they pass over their neighbours.
        for position in 0..self.board.cells.len() {
            if moving.is_some_and(|m| m.contains(&position)) {
                continue;
            }
            self.render_cell(position, area, buf);
        }
        if let Some(moving) = moving {
            for position in moving {
                self.render_cell(position, area, buf);
            }
        }
        self.render_marker(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(values: &[i64]) -> CellBoard {
        let mut board = CellBoard::new(Duration::from_millis(300));
        board.render_initial(&Element::from_values(values));
        board
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn compare_then_mark_max_updates_states() {
        let mut b = board(&[3, 1, 2]);
        b.apply_compare(2);
        assert_eq!(b.compared(), Some((1, 2)));
        assert_eq!(b.cell_state(0), CellState::Normal);
        assert_eq!(b.cell_state(1), CellState::Compared);

        b.apply_mark_max(2);
        assert_eq!(b.compared(), None);
        assert_eq!(b.cell_state(2), CellState::Settled);
    }

    #[test]
    fn swap_moves_elements_and_keeps_ids() {
        let mut b = board(&[3, 1, 2]);
        b.apply_swap(0, 1);
        assert_eq!(b.values(), vec![1, 3, 2]);
        assert_eq!(b.elements()[0].id, 1);
        assert_eq!(b.elements()[1].id, 0);
    }

    #[test]
    fn swap_animation_interpolates_then_lands() {
        let mut b = board(&[3, 1]);
        b.apply_swap(0, 1);
        let started = b.animation.unwrap().started;

        assert_eq!(b.cell_x(0, started), CELL_WIDTH);
        assert_eq!(b.cell_x(1, started), 0);
        assert_eq!(b.cell_x(0, started + Duration::from_millis(150)), CELL_WIDTH / 2);
        assert!(b.is_animating(started + Duration::from_millis(150)));

        let done = started + Duration::from_millis(300);
        assert_eq!(b.cell_x(0, done), 0);
        assert_eq!(b.cell_x(1, done), CELL_WIDTH);
        assert!(!b.is_animating(done));
    }

    #[test]
    fn out_of_range_swap_is_ignored() {
        let mut b = board(&[1, 2]);
        b.apply_swap(1, 5);
        assert_eq!(b.values(), vec![1, 2]);
    }

    #[test]
    fn end_settles_everything_and_clear_empties() {
        let mut b = board(&[2, 1]);
        b.apply_compare(1);
        b.apply_end();
        assert!(b.is_finished());
        assert_eq!(b.compared(), None);
        assert_eq!(b.cell_state(0), CellState::Settled);

        b.clear();
        assert!(b.is_empty());
        assert!(!b.is_finished());
    }

    #[test]
    fn view_draws_values_and_marker() {
        let mut b = board(&[7, 42]);
        b.apply_compare(1);
        let area = Rect::new(0, 0, 20, BOARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        BoardView::new(&b, Instant::now()).render(area, &mut buf);

        let middle = row_text(&buf, 1);
        assert!(middle.contains('7'), "row was {middle:?}");
        assert!(middle.contains("42"), "row was {middle:?}");
        assert!(row_text(&buf, CELL_HEIGHT).starts_with(&"▔".repeat(12)));
    }

    #[test]
    fn swap_animation_starts_on_the_tick() {
        let mut b = board(&[3, 1]);
        let tick = Instant::now() + Duration::from_secs(60);
        b.begin_tick(tick);
        b.apply_swap(0, 1);
        assert_eq!(b.animation.unwrap().started, tick);
        assert_eq!(b.cell_x(1, tick), 0);
        assert!(b.is_animating(tick + Duration::from_millis(100)));
    }

    #[test]
    fn huge_finished_board_renders_without_overflow() {
        let count = usize::from(u16::MAX / CELL_WIDTH) + 100;
        let values: Vec<i64> = (0..count as i64).collect();
        let mut b = board(&values);
        b.apply_compare(count - 1);
        let area = Rect::new(0, 0, 80, BOARD_HEIGHT);

        let mut buf = Buffer::empty(area);
        BoardView::new(&b, Instant::now()).render(area, &mut buf);
        assert_eq!(b.cell_x(count - 1, Instant::now()), u16::MAX);

        b.apply_end();
        let mut buf = Buffer::empty(area);
        BoardView::new(&b, Instant::now()).render(area, &mut buf);
        assert!(row_text(&buf, CELL_HEIGHT).starts_with(&"─".repeat(78)));
    }

    #[test]
    fn view_skips_cells_that_do_not_fit() {
        let b = board(&[1, 2, 3, 4]);
        let area = Rect::new(0, 0, CELL_WIDTH * 2, BOARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        BoardView::new(&b, Instant::now()).render(area, &mut buf);
        let middle = row_text(&buf, 1);
        assert!(middle.contains('1') && middle.contains('2'));
        assert!(!middle.contains('3'));
    }
}
