use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::config::{KeyContext, KeybindingConfig};
use crate::input::InputMode;
use crate::ui::action::Action;
use crate::ui::components::{render_key_hints, KeyHint, KeyHintBarStyle};

/// Footer listing the keys for the current screen
pub struct Footer {
    hints: Vec<KeyHint>,
}

impl Footer {
    /// Field hints only apply to generated input.
    pub fn setup(keys: &KeybindingConfig, mode: InputMode) -> Self {
        let actions: &[Action] = match mode {
            InputMode::Generate => &[
                Action::StartShow,
                Action::ToggleInputMode,
                Action::NextField,
                Action::ToggleParamMode,
                Action::Quit,
            ],
            InputMode::Manual => &[
                Action::StartShow,
                Action::ToggleInputMode,
                Action::ClearInput,
                Action::Quit,
            ],
        };
        Self {
            hints: hints_for(keys, KeyContext::Setup, actions, |_| true),
        }
    }

    /// `can_pause` greys out pause/resume once the show has finished.
    pub fn show(keys: &KeybindingConfig, can_pause: bool) -> Self {
        let actions = [Action::TogglePause, Action::Reset, Action::Quit];
        Self {
            hints: hints_for(keys, KeyContext::Show, &actions, |a| {
                a != Action::TogglePause || can_pause
            }),
        }
    }

    pub fn hints(&self) -> &[KeyHint] {
        &self.hints
    }
}

fn hints_for(
    keys: &KeybindingConfig,
    context: KeyContext,
    actions: &[Action],
    enabled: impl Fn(Action) -> bool,
) -> Vec<KeyHint> {
    actions
        .iter()
        .filter_map(|&action| {
            let key = keys.key_for(action, context)?;
            Some(KeyHint::new(key.to_string(), action.label()).enabled(enabled(action)))
        })
        .collect()
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_key_hints(area, buf, &self.hints, KeyHintBarStyle::footer_bar());
    }
}
