//! Renderer seam between the player and whatever draws the cells.
//!
//! The player only ever calls [`Renderer`] methods; it never looks at visual
//! state. Two adapters ship with the crate:
//! - [`CellBoard`]: cell row drawn with ratatui, used by the TUI
//! - [`Transcript`]: one text line per call, used by `--plain` mode

pub mod board;
pub mod transcript;

pub use board::{BoardView, CellBoard, CellState};
pub use transcript::Transcript;

use tokio::time::Instant;

/// A value-bearing slot in the visual row.
///
/// `id` is the element's index in the input array and never changes; its
/// current position is tracked by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: usize,
    pub value: i64,
}

impl Element {
    /// One element per input value, ids in input order.
    pub fn from_values(values: &[i64]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(id, &value)| Element { id, value })
            .collect()
    }
}

/// Receives the visual side effects of trace playback.
pub trait Renderer {
    /// Called by the player with the tick instant before it applies a
    /// command, so time-based effects start on the tick and not on the
    /// wall clock.
    fn begin_tick(&mut self, _now: Instant) {}

    /// Lay out `elements` in order, discarding anything drawn before.
    fn render_initial(&mut self, elements: &[Element]);

    /// Highlight positions `i - 1` and `i`.
    fn apply_compare(&mut self, i: usize);

    /// Move the elements at positions `i` and `j` past each other.
    fn apply_swap(&mut self, i: usize, j: usize);

    /// Clear the compare highlight and mark position `i` as settled.
    fn apply_mark_max(&mut self, i: usize);

    /// Finalize the display once the trace is exhausted.
    fn apply_end(&mut self);

    /// Drop all visual state.
    fn clear(&mut self);
}
