use std::fmt;

/// One discrete visual operation recorded while sorting.
///
/// Indices are *positions* in the visual row at the moment the command is
/// consumed, not identities of the values being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Compare positions `i - 1` and `i`.
    Compare { i: usize },
    /// Exchange the elements at positions `i` and `j`.
    Swap { i: usize, j: usize },
    /// Position `i` holds its final value for the current pass.
    MarkMax { i: usize },
    /// Terminal marker. Exactly one per trace, always last.
    End,
}

impl Command {
    /// Largest position this command touches, if any.
    pub fn max_position(&self) -> Option<usize> {
        match *self {
            Command::Compare { i } | Command::MarkMax { i } => Some(i),
            Command::Swap { i, j } => Some(i.max(j)),
            Command::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Command::End)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Compare { i } => write!(f, "compare {i}"),
            Command::Swap { i, j } => write!(f, "swap {i} {j}"),
            Command::MarkMax { i } => write!(f, "mark-max {i}"),
            Command::End => f.write_str("end"),
        }
    }
}
