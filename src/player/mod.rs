//! Fixed-cadence trace playback.
//!
//! [`Player`] is a cooperative state machine. It never sleeps or spawns; it
//! owns the deadline of its next tick and the host loop calls
//! [`Player::poll`] once that deadline has passed (see [`driver`] for the
//! async helper used by `--plain` mode and tests).

pub mod driver;

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::render::{Element, Renderer};
use crate::trace::{Command, Trace};

/// Default interval between two applied commands.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Running => "running",
            PlayerState::Paused => "paused",
            PlayerState::Finished => "finished",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: PlayerState,
    },
    #[error("Trace expects {expected} elements, got {actual}")]
    ElementCountMismatch { expected: usize, actual: usize },
}

/// What a call to [`Player::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A command was applied and the next tick is scheduled.
    Applied(Command),
    /// The trace is exhausted; the completion callback has run.
    Finished,
}

/// Cursor and layout for one playback run.
#[derive(Debug)]
struct Session {
    trace: Trace,
    cursor: usize,
    /// `positions[p]` is the id of the element currently at position `p`.
    positions: Vec<usize>,
}

type FinishCallback = Box<dyn FnMut() + Send>;

pub struct Player {
    interval: Duration,
    state: PlayerState,
    session: Option<Session>,
    /// Deadline of the scheduled tick. `None` means nothing is scheduled.
    pending: Option<Instant>,
    on_finish: Option<FinishCallback>,
}

impl Player {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PlayerState::Idle,
            session: None,
            pending: None,
            on_finish: None,
        }
    }

    /// Register the completion callback, fired once per run on reaching
    /// [`PlayerState::Finished`].
    pub fn with_on_finish(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_finish = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Number of commands applied so far in this run.
    pub fn consumed(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.cursor)
    }

    /// Commands not yet applied.
    pub fn remaining(&self) -> &[Command] {
        match &self.session {
            Some(s) => &s.trace.commands()[s.cursor..],
            None => &[],
        }
    }

    /// Element ids by position, or `None` while idle.
    pub fn positions(&self) -> Option<&[usize]> {
        self.session.as_ref().map(|s| s.positions.as_slice())
    }

    /// Begin playing `trace` over `values`. The first command is applied one
    /// interval after `now`.
    pub fn start<R: Renderer + ?Sized>(
        &mut self,
        values: &[i64],
        trace: Trace,
        renderer: &mut R,
        now: Instant,
    ) -> Result<(), PlayerError> {
        self.expect_state("start", PlayerState::Idle)?;
        if values.len() != trace.element_count() {
            return Err(PlayerError::ElementCountMismatch {
                expected: trace.element_count(),
                actual: values.len(),
            });
        }

        tracing::debug!(
            elements = values.len(),
            commands = trace.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Starting playback"
        );

        renderer.render_initial(&Element::from_values(values));
        self.session = Some(Session {
            positions: (0..values.len()).collect(),
            trace,
            cursor: 0,
        });
        self.state = PlayerState::Running;
        self.pending = Some(now + self.interval);
        Ok(())
    }

    /// Cancel the scheduled tick. Nothing is consumed.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.expect_state("pause", PlayerState::Running)?;
        self.pending = None;
        self.state = PlayerState::Paused;
        tracing::debug!(consumed = self.consumed(), "Playback paused");
        Ok(())
    }

    /// Re-enter the cadence: the next command is applied one interval after
    /// `now`, with the cursor and layout left as they were.
    pub fn resume(&mut self, now: Instant) -> Result<(), PlayerError> {
        self.expect_state("resume", PlayerState::Paused)?;
        self.pending = Some(now + self.interval);
        self.state = PlayerState::Running;
        tracing::debug!(consumed = self.consumed(), "Playback resumed");
        Ok(())
    }

    /// Flip between running and paused, the way a single pause button does.
    pub fn toggle_pause(&mut self, now: Instant) -> Result<PlayerState, PlayerError> {
        match self.state {
            PlayerState::Running => self.pause()?,
            PlayerState::Paused => self.resume(now)?,
            state => {
                return Err(PlayerError::InvalidTransition {
                    action: "toggle pause",
                    state,
                })
            }
        }
        Ok(self.state)
    }

    /// Return to `Idle` from any state. Cancels the scheduled tick before
    /// discarding the session so a late poll has nothing to fire.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.pending = None;
        self.session = None;
        let previous = std::mem::replace(&mut self.state, PlayerState::Idle);
        renderer.clear();
        tracing::debug!(from = %previous, "Playback reset");
    }

    /// Apply at most one command if the scheduled tick is due at `now`.
    pub fn poll<R: Renderer + ?Sized>(&mut self, now: Instant, renderer: &mut R) -> Option<Tick> {
        if self.state != PlayerState::Running {
            return None;
        }
        let deadline = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;

        let session = self.session.as_mut()?;
        let Some(&command) = session.trace.commands().get(session.cursor) else {
            self.finish();
            return Some(Tick::Finished);
        };
        session.cursor += 1;
        renderer.begin_tick(now);

        tracing::debug!(step = session.cursor, %command, "Applying command");
        match command {
            Command::Compare { i } => renderer.apply_compare(i),
            Command::Swap { i, j } => {
                session.positions.swap(i, j);
                renderer.apply_swap(i, j);
            }
            Command::MarkMax { i } => renderer.apply_mark_max(i),
            Command::End => {
                renderer.apply_end();
                self.finish();
                return Some(Tick::Finished);
            }
        }

        self.pending = Some(now + self.interval);
        Some(Tick::Applied(command))
    }

    fn finish(&mut self) {
        self.state = PlayerState::Finished;
        self.pending = None;
        tracing::debug!(consumed = self.consumed(), "Playback finished");
        if let Some(callback) = self.on_finish.as_mut() {
            callback();
        }
    }

    fn expect_state(&self, action: &'static str, expected: PlayerState) -> Result<(), PlayerError> {
        if self.state == expected {
            return Ok(());
        }
        tracing::warn!(action, state = %self.state, "Rejected playback transition");
        Err(PlayerError::InvalidTransition {
            action,
            state: self.state,
        })
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("interval", &self.interval)
            .field("state", &self.state)
            .field("consumed", &self.consumed())
            .field("pending", &self.pending)
            .finish()
    }
}
