//! Bubble sort tracing.
//!
//! [`trace`] sorts a copy of its input and records every comparison, swap and
//! settled position as a [`Command`]. The resulting [`Trace`] is immutable and
//! is what the [`Player`](crate::player::Player) replays.

mod command;

pub use command::Command;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("Trace is empty")]
    Empty,
    #[error("Trace must end with exactly one end marker")]
    MissingEnd,
    #[error("End marker found at {0} before the last command")]
    EarlyEnd(usize),
    #[error("Command {index} ({command}) is out of range for {len} elements")]
    OutOfRange {
        index: usize,
        command: Command,
        len: usize,
    },
    #[error("Trace covers {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Ordered command sequence for one input array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    len: usize,
    commands: Vec<Command>,
}

impl Trace {
    /// Build a trace from an externally assembled command list.
    ///
    /// `len` is the number of elements the commands operate on.
    pub fn from_commands(len: usize, commands: Vec<Command>) -> Result<Self, TraceError> {
        let trace = Self { len, commands };
        trace.validate()?;
        Ok(trace)
    }

    /// Check the shape invariant: non-empty, a single trailing `End`, and
    /// every position inside `0..len`.
    pub fn validate(&self) -> Result<(), TraceError> {
        let last = self.commands.len().checked_sub(1).ok_or(TraceError::Empty)?;
        if !self.commands[last].is_end() {
            return Err(TraceError::MissingEnd);
        }
        for (index, command) in self.commands.iter().enumerate() {
            if command.is_end() && index != last {
                return Err(TraceError::EarlyEnd(index));
            }
            let compare_without_left = matches!(command, Command::Compare { i: 0 });
            let beyond = command.max_position().is_some_and(|p| p >= self.len);
            if compare_without_left || beyond {
                return Err(TraceError::OutOfRange {
                    index,
                    command: *command,
                    len: self.len,
                });
            }
        }
        Ok(())
    }

    /// Number of elements the trace was generated for.
    pub fn element_count(&self) -> usize {
        self.len
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn swap_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Swap { .. }))
            .count()
    }

    pub fn compare_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Compare { .. }))
            .count()
    }

    /// Apply every `Swap` in order to a copy of `input`, which must have
    /// exactly [`element_count`](Self::element_count) elements.
    pub fn replay_swaps<T: Clone>(&self, input: &[T]) -> Result<Vec<T>, TraceError> {
        if input.len() != self.len {
            return Err(TraceError::LengthMismatch {
                expected: self.len,
                actual: input.len(),
            });
        }
        let mut arr = input.to_vec();
        for command in &self.commands {
            if let Command::Swap { i, j } = *command {
                arr.swap(i, j);
            }
        }
        Ok(arr)
    }
}

/// Output of [`trace`].
#[derive(Debug, Clone, PartialEq)]
pub struct Traced<T> {
    pub sorted: Vec<T>,
    pub trace: Trace,
}

/// Bubble sort `input` and record the commands needed to replay it.
///
/// Passes shrink from the full length down to 2; after each pass the last
/// position of the pass is marked as settled. Equal values are never swapped.
pub fn trace<T: PartialOrd + Clone>(input: &[T]) -> Traced<T> {
    let mut arr = input.to_vec();
    let len = arr.len();
    let mut commands = Vec::new();

    for m in (2..=len).rev() {
        for i in 1..m {
            commands.push(Command::Compare { i });
            if arr[i] < arr[i - 1] {
                arr.swap(i - 1, i);
                commands.push(Command::Swap { i: i - 1, j: i });
            }
        }
        commands.push(Command::MarkMax { i: m - 1 });
    }
    commands.push(Command::End);

    Traced {
        sorted: arr,
        trace: Trace { len, commands },
    }
}
