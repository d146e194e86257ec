//! Shared key hint rendering utilities.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{FOOTER_BG, KEY_HINT_BG, TEXT_FAINT, TEXT_MUTED, TEXT_SECONDARY};

#[derive(Debug, Clone, Copy)]
pub struct KeyHintBarStyle {
    pub key_style: Style,
    pub action_style: Style,
    pub disabled_style: Style,
    pub item_gap: &'static str,
    pub alignment: Alignment,
    pub background: Option<Color>,
}

impl KeyHintBarStyle {
    pub fn footer_bar() -> Self {
        Self {
            key_style: Style::default().fg(TEXT_SECONDARY).bg(KEY_HINT_BG),
            action_style: Style::default().fg(TEXT_MUTED),
            disabled_style: Style::default().fg(TEXT_FAINT),
            item_gap: "   ",
            alignment: Alignment::Left,
            background: Some(FOOTER_BG),
        }
    }
}

/// One entry in a hint bar. Disabled hints are drawn faint, the way the
/// show's buttons grey out when an action is not available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: String,
    pub action: &'static str,
    pub enabled: bool,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: &'static str) -> Self {
        Self {
            key: key.into(),
            action,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

pub fn render_key_hints(area: Rect, buf: &mut Buffer, hints: &[KeyHint], style: KeyHintBarStyle) {
    let mut spans = vec![Span::raw(" ")];

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 && !style.item_gap.is_empty() {
            spans.push(Span::raw(style.item_gap));
        }
        let (key_style, action_style) = if hint.enabled {
            (style.key_style, style.action_style)
        } else {
            (style.disabled_style, style.disabled_style)
        };
        spans.push(Span::styled(format!(" {} ", hint.key), key_style));
        spans.push(Span::styled(format!(" {}", hint.action), action_style));
    }

    let mut paragraph = Paragraph::new(Line::from(spans)).alignment(style.alignment);
    if let Some(bg) = style.background {
        paragraph = paragraph.style(Style::default().bg(bg));
    }
    paragraph.render(area, buf);
}
