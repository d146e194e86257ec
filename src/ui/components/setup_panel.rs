//! Setup screen: choose between a generated array and typed values.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::config::ArrayDefaults;
use crate::input::{parse_values, ArrayConfig, Field, InputMode, ParamMode};
use crate::ui::components::{
    ACCENT_ERROR, ACCENT_PRIMARY, BORDER_DEFAULT, BORDER_FOCUSED, TEXT_MUTED, TEXT_PRIMARY,
};

pub struct SetupPanel<'a> {
    array: &'a ArrayConfig,
    defaults: &'a ArrayDefaults,
    focus: Field,
    error: Option<&'a str>,
}

impl<'a> SetupPanel<'a> {
    pub fn new(array: &'a ArrayConfig, defaults: &'a ArrayDefaults) -> Self {
        Self {
            array,
            defaults,
            focus: Field::default(),
            error: None,
        }
    }

    pub fn focus(mut self, focus: Field) -> Self {
        self.focus = focus;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    fn mode_line(&self) -> Line<'static> {
        let tab = |mode: InputMode| {
            let style = if self.array.input_mode == mode {
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(TEXT_MUTED)
            };
            Span::styled(format!(" {} ", mode.label()), style)
        };
        Line::from(vec![
            Span::styled("Input: ", Style::default().fg(TEXT_MUTED)),
            tab(InputMode::Generate),
            Span::raw(" "),
            tab(InputMode::Manual),
        ])
    }

    fn generate_lines(&self) -> Vec<Line<'static>> {
        let d = self.defaults;
        let random_range = format!("random within {}..={}", d.range_from, d.range_to);
        let random_length = format!("random, {}..={}", d.quantity_min, d.quantity_max);
        [
            (Field::Length, "Length", random_length, self.array.length.to_string()),
            (
                Field::RangeFrom,
                "From",
                random_range.clone(),
                self.array.range_from.to_string(),
            ),
            (Field::RangeTo, "To", random_range, self.array.range_to.to_string()),
        ]
        .into_iter()
        .map(|(field, label, random, fixed)| {
            let value = match self.array.param_mode(field) {
                ParamMode::Random => random,
                ParamMode::Fixed => fixed,
            };
            let (marker, style) = if field == self.focus {
                ("▸ ", Style::default().fg(ACCENT_PRIMARY).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(TEXT_PRIMARY))
            };
            Line::styled(format!("{marker}{label}: {value}"), style)
        })
        .collect()
    }

    fn manual_lines(&self) -> Vec<Line<'static>> {
        let parsed = parse_values(&self.array.raw_values);
        vec![
            Line::from(vec![
                Span::styled(self.array.raw_values.clone(), Style::default().fg(TEXT_PRIMARY)),
                Span::styled("▏", Style::default().fg(ACCENT_PRIMARY)),
            ]),
            Line::styled(
                format!("{} value(s), whole numbers only", parsed.len()),
                Style::default().fg(TEXT_MUTED),
            ),
        ]
    }
}

impl Widget for SetupPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [mode_area, body_area, error_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .areas(area);

        Paragraph::new(self.mode_line()).render(mode_area, buf);

        let (title, lines, border) = match self.array.input_mode {
            InputMode::Generate => (" Random array ", self.generate_lines(), BORDER_DEFAULT),
            InputMode::Manual => (" Values (comma or space separated) ", self.manual_lines(), BORDER_FOCUSED),
        };
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .wrap(Wrap { trim: false })
            .render(body_area, buf);

        if let Some(error) = self.error {
            Paragraph::new(Line::styled(error.to_string(), Style::default().fg(ACCENT_ERROR)))
                .wrap(Wrap { trim: true })
                .render(error_area, buf);
        }
    }
}
