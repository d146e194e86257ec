//! Default keybindings
//!
//! Used when no user configuration is present; user bindings from
//! `config.toml` are merged on top.

use std::collections::HashMap;

use super::keys::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;

fn bind(map: &mut HashMap<KeyCombo, Action>, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        map.insert(combo, action);
    }
}

/// Create the default keybindings configuration
pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    bind(&mut config.global, "C-q", Action::Quit);
    bind(&mut config.global, "C-c", Action::Quit);

    // Setup screen: letters go to the manual input box, so only
    // non-printing keys are bound here.
    let setup = config.context.entry(KeyContext::Setup).or_default();
    bind(setup, "<CR>", Action::StartShow);
    bind(setup, "<Tab>", Action::ToggleInputMode);
    bind(setup, "<BS>", Action::Backspace);
    bind(setup, "C-u", Action::ClearInput);
    bind(setup, "<Esc>", Action::Quit);
    bind(setup, "<Down>", Action::NextField);
    bind(setup, "<Up>", Action::PrevField);
    bind(setup, "C-r", Action::ToggleParamMode);

    let show = config.context.entry(KeyContext::Show).or_default();
    bind(show, "<Space>", Action::TogglePause);
    bind(show, "p", Action::TogglePause);
    bind(show, "r", Action::Reset);
    bind(show, "<Esc>", Action::Reset);
    bind(show, "q", Action::Quit);

    config
}
