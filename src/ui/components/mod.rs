mod footer;
mod key_hints;
mod setup_panel;
mod show_panel;

pub use footer::Footer;
pub use key_hints::{render_key_hints, KeyHint, KeyHintBarStyle};
pub use setup_panel::SetupPanel;
pub use show_panel::ShowPanel;

use ratatui::style::Color;

pub const ACCENT_PRIMARY: Color = Color::Rgb(97, 175, 239);
pub const ACCENT_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const ACCENT_WARNING: Color = Color::Rgb(255, 196, 0);
pub const ACCENT_ERROR: Color = Color::Rgb(224, 108, 117);

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const TEXT_MUTED: Color = Color::Rgb(130, 130, 130);
pub const TEXT_FAINT: Color = Color::Rgb(80, 80, 80);

pub const BORDER_DEFAULT: Color = Color::Rgb(70, 70, 70);
pub const BORDER_FOCUSED: Color = ACCENT_PRIMARY;

pub const FOOTER_BG: Color = Color::Rgb(24, 24, 24);
pub const KEY_HINT_BG: Color = Color::Rgb(50, 50, 50);
