//! Async helper that drives a [`Player`] against the tokio clock.

use tokio::time::{sleep_until, Instant};

use super::{Player, PlayerState, Tick};
use crate::render::Renderer;

/// Sleep until each scheduled tick and poll, until nothing is scheduled.
///
/// Returns the state the player settled in: `Finished` after a full run, or
/// whatever state left no tick pending (for example `Paused`).
pub async fn play_until_idle<R: Renderer + ?Sized>(
    player: &mut Player,
    renderer: &mut R,
) -> PlayerState {
    while let Some(deadline) = player.next_deadline() {
        sleep_until(deadline).await;
        if let Some(Tick::Finished) = player.poll(Instant::now(), renderer) {
            break;
        }
    }
    player.state()
}
