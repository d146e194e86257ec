//! Input arrays for a show.
//!
//! An [`ArrayConfig`] is a snapshot of the setup form. It is either turned
//! into a random array or its raw text is parsed into values.

use rand::Rng;
use thiserror::Error;

use crate::config::ArrayDefaults;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Range start {from} is greater than range end {to}")]
    InvalidRange { from: i64, to: i64 },
    #[error("Length {length} is outside {min}..={max}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}

/// Where the array comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Generate,
    Manual,
}

impl InputMode {
    pub fn toggle(self) -> Self {
        match self {
            InputMode::Generate => InputMode::Manual,
            InputMode::Manual => InputMode::Generate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Generate => "generate",
            InputMode::Manual => "manual",
        }
    }
}

/// Whether a generation parameter is drawn at random or taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    #[default]
    Random,
    Fixed,
}

/// Generation parameter focused on the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Length,
    RangeFrom,
    RangeTo,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Length => Field::RangeFrom,
            Field::RangeFrom => Field::RangeTo,
            Field::RangeTo => Field::Length,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Length => Field::RangeTo,
            Field::RangeFrom => Field::Length,
            Field::RangeTo => Field::RangeFrom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayConfig {
    pub length_mode: ParamMode,
    pub length: usize,
    pub range_mode: ParamMode,
    pub range_from: i64,
    pub range_to: i64,
    pub input_mode: InputMode,
    pub raw_values: String,
}

impl ArrayConfig {
    /// Random length and range within `defaults`.
    pub fn random(defaults: &ArrayDefaults) -> Self {
        Self {
            length_mode: ParamMode::Random,
            length: defaults.quantity,
            range_mode: ParamMode::Random,
            range_from: defaults.range_from,
            range_to: defaults.range_to,
            input_mode: InputMode::Generate,
            raw_values: String::new(),
        }
    }

    /// Values typed by the user.
    pub fn manual(raw: impl Into<String>, defaults: &ArrayDefaults) -> Self {
        Self {
            input_mode: InputMode::Manual,
            raw_values: raw.into(),
            ..Self::random(defaults)
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length_mode = ParamMode::Fixed;
        self.length = length;
        self
    }

    pub fn with_range(mut self, from: i64, to: i64) -> Self {
        self.range_mode = ParamMode::Fixed;
        self.range_from = from;
        self.range_to = to;
        self
    }

    pub fn param_mode(&self, field: Field) -> ParamMode {
        match field {
            Field::Length => self.length_mode,
            Field::RangeFrom | Field::RangeTo => self.range_mode,
        }
    }

    /// Switch `field` between random and fixed. Both range ends share one
    /// mode.
    pub fn toggle_param_mode(&mut self, field: Field) {
        let mode = match field {
            Field::Length => &mut self.length_mode,
            Field::RangeFrom | Field::RangeTo => &mut self.range_mode,
        };
        *mode = match *mode {
            ParamMode::Random => ParamMode::Fixed,
            ParamMode::Fixed => ParamMode::Random,
        };
    }

    /// Append a decimal digit to `field`. Typing into a random parameter
    /// fixes it. Digits that would overflow are ignored.
    pub fn push_digit(&mut self, field: Field, digit: u32) {
        if digit > 9 {
            return;
        }
        self.fix(field);
        let updated = match field {
            Field::Length => self
                .length
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .map(|v| self.length = v),
            Field::RangeFrom => push_signed(self.range_from, digit).map(|v| self.range_from = v),
            Field::RangeTo => push_signed(self.range_to, digit).map(|v| self.range_to = v),
        };
        if updated.is_none() {
            tracing::debug!(?field, digit, "Ignoring digit that overflows");
        }
    }

    /// Drop the last digit of `field`.
    pub fn pop_digit(&mut self, field: Field) {
        self.fix(field);
        match field {
            Field::Length => self.length /= 10,
            Field::RangeFrom => self.range_from /= 10,
            Field::RangeTo => self.range_to /= 10,
        }
    }

    /// Flip the sign of a range bound. Lengths have no sign.
    pub fn negate(&mut self, field: Field) {
        self.fix(field);
        match field {
            Field::Length => {}
            Field::RangeFrom => self.range_from = self.range_from.saturating_neg(),
            Field::RangeTo => self.range_to = self.range_to.saturating_neg(),
        }
    }

    /// Zero `field`.
    pub fn clear_field(&mut self, field: Field) {
        self.fix(field);
        match field {
            Field::Length => self.length = 0,
            Field::RangeFrom => self.range_from = 0,
            Field::RangeTo => self.range_to = 0,
        }
    }

    fn fix(&mut self, field: Field) {
        match field {
            Field::Length => self.length_mode = ParamMode::Fixed,
            Field::RangeFrom | Field::RangeTo => self.range_mode = ParamMode::Fixed,
        }
    }

    /// Produce the array this configuration describes.
    pub fn build<R: Rng + ?Sized>(
        &self,
        defaults: &ArrayDefaults,
        rng: &mut R,
    ) -> Result<Vec<i64>, InputError> {
        match self.input_mode {
            InputMode::Manual => Ok(parse_values(&self.raw_values)),
            InputMode::Generate => {
                let length = self.resolve_length(defaults, rng)?;
                let (from, to) = self.resolve_range(defaults, rng)?;
                Ok(generate(length, from, to, rng))
            }
        }
    }

    fn resolve_length<R: Rng + ?Sized>(
        &self,
        defaults: &ArrayDefaults,
        rng: &mut R,
    ) -> Result<usize, InputError> {
        let (min, max) = (defaults.quantity_min, defaults.quantity_max);
        match self.length_mode {
            ParamMode::Random => Ok(rng.random_range(min..=max.max(min))),
            ParamMode::Fixed if (min..=max).contains(&self.length) => Ok(self.length),
            ParamMode::Fixed => Err(InputError::InvalidLength {
                length: self.length,
                min,
                max,
            }),
        }
    }

    fn resolve_range<R: Rng + ?Sized>(
        &self,
        defaults: &ArrayDefaults,
        rng: &mut R,
    ) -> Result<(i64, i64), InputError> {
        match self.range_mode {
            ParamMode::Random => {
                let (lo, hi) = (defaults.range_from, defaults.range_to.max(defaults.range_from));
                let from = rng.random_range(lo..=hi);
                let to = rng.random_range(from..=hi);
                Ok((from, to))
            }
            ParamMode::Fixed if self.range_from <= self.range_to => {
                Ok((self.range_from, self.range_to))
            }
            ParamMode::Fixed => Err(InputError::InvalidRange {
                from: self.range_from,
                to: self.range_to,
            }),
        }
    }
}

fn push_signed(value: i64, digit: u32) -> Option<i64> {
    let digit = i64::from(digit);
    let shifted = value.checked_mul(10)?;
    if value < 0 {
        shifted.checked_sub(digit)
    } else {
        shifted.checked_add(digit)
    }
}

/// `length` values drawn uniformly from `from..=to`.
pub fn generate<R: Rng + ?Sized>(length: usize, from: i64, to: i64, rng: &mut R) -> Vec<i64> {
    (0..length).map(|_| rng.random_range(from..=to)).collect()
}

/// Parse free text into integers.
///
/// Tokens are separated by commas or whitespace. Cells hold whole numbers,
/// so only tokens that parse as `i64` are kept: decimals such as `2.5` are
/// dropped along with words, the same as any other non-integer token.
pub fn parse_values(raw: &str) -> Vec<i64> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::debug!(token, "Dropping non-integer token");
                None
            }
        })
        .collect()
}
