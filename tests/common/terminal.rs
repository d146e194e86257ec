//! TUI testing utilities using Ratatui's TestBackend
//!
//! Provides helpers for rendering the app to a test buffer and converting
//! the output to strings.

use bubbleshow::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tokio::time::Instant;

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string, trimming trailing whitespace per line
pub fn buffer_to_trimmed_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Draw one frame of `app` at `now` and return the screen text.
pub fn render_app(app: &App, now: Instant) -> String {
    let mut terminal = create_test_terminal_sized(80, 20);
    terminal
        .draw(|f| app.draw(f, now))
        .expect("Failed to draw app");
    buffer_to_trimmed_string(terminal.backend().buffer())
}

/// Assert that the rendered screen contains `expected`
pub fn assert_screen_contains(screen: &str, expected: &str) {
    assert!(
        screen.contains(expected),
        "Screen does not contain {expected:?}.\nScreen:\n{screen}"
    );
}
