//! Plain-text renderer.
//!
//! Writes one line per renderer call and keeps its own copy of the row so
//! swaps can be shown as the resulting layout.

use std::io::{self, Write};

use super::{Element, Renderer};

pub struct Transcript<W: Write> {
    out: W,
    row: Vec<i64>,
    /// First write failure. Renderer calls cannot fail, so it is reported
    /// from [`Transcript::finish`].
    error: Option<io::Error>,
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            row: Vec::new(),
            error: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flush and hand back the writer, or the first error hit while writing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, text: String) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "Transcript write failed");
            self.error = Some(e);
        }
    }

    fn row_text(&self) -> String {
        join(&self.row)
    }

    fn value_at(&self, position: usize) -> String {
        self.row
            .get(position)
            .map_or_else(|| "?".to_string(), |v| v.to_string())
    }
}

impl<W: Write> Renderer for Transcript<W> {
    fn render_initial(&mut self, elements: &[Element]) {
        self.row = elements.iter().map(|e| e.value).collect();
        let text = format!("cells: {}", self.row_text());
        self.line(text);
    }

    fn apply_compare(&mut self, i: usize) {
        let left = i.saturating_sub(1);
        let text = format!(
            "compare [{left}]={} [{i}]={}",
            self.value_at(left),
            self.value_at(i)
        );
        self.line(text);
    }

    fn apply_swap(&mut self, i: usize, j: usize) {
        if i < self.row.len() && j < self.row.len() {
            self.row.swap(i, j);
        }
        let text = format!("swap [{i}] [{j}] -> {}", self.row_text());
        self.line(text);
    }

    fn apply_mark_max(&mut self, i: usize) {
        let text = format!("settled [{i}]={}", self.value_at(i));
        self.line(text);
    }

    fn apply_end(&mut self) {
        let text = format!("done: {}", self.row_text());
        self.line(text);
    }

    fn clear(&mut self) {
        self.row.clear();
        self.line("cleared".to_string());
    }
}

/// Space-separated values, `-` for an empty row.
pub fn join(values: &[i64]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
