//! Actions that can be triggered by keybindings

/// All mappable UI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Build the input array and start playback
    StartShow,
    /// Pause a running show or resume a paused one
    TogglePause,
    /// Stop the show and return to setup
    Reset,
    /// Switch between generated and typed input
    ToggleInputMode,
    /// Delete the last character of the typed input
    Backspace,
    /// Clear the typed input, or the focused generation parameter
    ClearInput,
    /// Focus the next generation parameter
    NextField,
    /// Focus the previous generation parameter
    PrevField,
    /// Switch the focused generation parameter between random and fixed
    ToggleParamMode,
}

impl Action {
    /// Short label used in key hints.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::StartShow => "start",
            Action::TogglePause => "pause/resume",
            Action::Reset => "reset",
            Action::ToggleInputMode => "input mode",
            Action::Backspace => "delete",
            Action::ClearInput => "clear",
            Action::NextField | Action::PrevField => "field",
            Action::ToggleParamMode => "random/fixed",
        }
    }
}

/// Parse an action name string into an Action
pub fn parse_action(name: &str) -> Option<Action> {
    match name {
        "quit" | "q" => Some(Action::Quit),
        "start_show" | "start" => Some(Action::StartShow),
        "toggle_pause" | "pause" => Some(Action::TogglePause),
        "reset" => Some(Action::Reset),
        "toggle_input_mode" => Some(Action::ToggleInputMode),
        "backspace" => Some(Action::Backspace),
        "clear_input" => Some(Action::ClearInput),
        "next_field" => Some(Action::NextField),
        "prev_field" => Some(Action::PrevField),
        "toggle_param_mode" => Some(Action::ToggleParamMode),
        _ => None,
    }
}
