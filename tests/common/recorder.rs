//! Recording renderer for playback tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bubbleshow::{Element, Player, Renderer};
use tokio::time::Instant;

/// One renderer call, as seen by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initial(Vec<i64>),
    Compare(usize),
    Swap(usize, usize),
    MarkMax(usize),
    End,
    Clear,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls since the last `render_initial`, excluding it.
    pub fn since_initial(&self) -> &[Call] {
        match self
            .calls
            .iter()
            .rposition(|c| matches!(c, Call::Initial(_)))
        {
            Some(i) => &self.calls[i + 1..],
            None => &self.calls,
        }
    }
}

impl Renderer for Recorder {
    fn render_initial(&mut self, elements: &[Element]) {
        self.calls
            .push(Call::Initial(elements.iter().map(|e| e.value).collect()));
    }

    fn apply_compare(&mut self, i: usize) {
        self.calls.push(Call::Compare(i));
    }

    fn apply_swap(&mut self, i: usize, j: usize) {
        self.calls.push(Call::Swap(i, j));
    }

    fn apply_mark_max(&mut self, i: usize) {
        self.calls.push(Call::MarkMax(i));
    }

    fn apply_end(&mut self) {
        self.calls.push(Call::End);
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
}

/// A player whose completion callback bumps the returned counter.
pub fn counting_player(interval: std::time::Duration) -> (Player, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let player = Player::new(interval).with_on_finish(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (player, count)
}

/// Poll at each deadline until nothing is scheduled. Returns the last
/// instant polled.
pub fn run_to_idle<R: Renderer + ?Sized>(
    player: &mut Player,
    renderer: &mut R,
    mut now: Instant,
) -> Instant {
    while let Some(deadline) = player.next_deadline() {
        now = deadline;
        player.poll(now, renderer);
    }
    now
}
