use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::player::DEFAULT_INTERVAL;
use crate::ui::action::{parse_action, Action};
use crate::util::paths::config_path;

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyCombo, KeyContext, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Time between two applied sort steps
    pub interval: Duration,
    /// Swap animations last `interval / animation_divisor`
    pub animation_divisor: u32,
    /// Parameters for generated arrays
    pub array: ArrayDefaults,
    /// Keybinding configuration
    pub keybindings: KeybindingConfig,
}

/// Bounds used when generating arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDefaults {
    pub quantity_min: usize,
    pub quantity_max: usize,
    /// Length used when the length is fixed but not given
    pub quantity: usize,
    pub range_from: i64,
    pub range_to: i64,
}

impl Default for ArrayDefaults {
    fn default() -> Self {
        Self {
            quantity_min: 2,
            quantity_max: 20,
            quantity: 10,
            range_from: 0,
            range_to: 99,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            animation_divisor: 3,
            array: ArrayDefaults::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub interval_ms: Option<u64>,
    pub animation_divisor: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlArrayConfig {
    pub quantity_min: Option<usize>,
    pub quantity_max: Option<usize>,
    pub quantity: Option<usize>,
    pub range_from: Option<i64>,
    pub range_to: Option<i64>,
}

/// TOML representation of keybinding configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlKeybindings {
    /// Global keybindings (apply to both screens)
    #[serde(flatten)]
    pub global: HashMap<String, String>,
    /// Setup screen keybindings
    pub setup: Option<HashMap<String, String>>,
    /// Show screen keybindings
    pub show: Option<HashMap<String, String>>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub playback: Option<TomlPlaybackConfig>,
    pub array: Option<TomlArrayConfig>,
    pub keys: Option<TomlKeybindings>,
}

impl TomlKeybindings {
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();
        parse_bindings(&mut config.global, &self.global);
        if let Some(setup) = &self.setup {
            parse_bindings(config.context.entry(KeyContext::Setup).or_default(), setup);
        }
        if let Some(show) = &self.show {
            parse_bindings(config.context.entry(KeyContext::Show).or_default(), show);
        }
        config
    }
}

fn parse_bindings(
    target: &mut HashMap<KeyCombo, Action>,
    bindings: &HashMap<String, String>,
) {
    for (action_name, key_str) in bindings {
        match (parse_key_notation(key_str), parse_action(action_name)) {
            (Ok(combo), Some(action)) => {
                target.insert(combo, action);
            }
            (Err(e), _) => {
                tracing::warn!(key = %key_str, error = %e, "Ignoring keybinding");
            }
            (_, None) => {
                tracing::warn!(action = %action_name, "Ignoring keybinding for unknown action");
            }
        }
    }
}

impl Config {
    /// Load configuration from file, merging with defaults
    pub fn load() -> Self {
        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match fs::read_to_string(&config_file) {
            Ok(contents) => Self::from_toml_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Invalid config file, using defaults"
                );
                Config::default()
            }),
            Err(e) => {
                tracing::debug!(error = %e, "No config file, using defaults");
                Config::default()
            }
        }
    }

    /// Parse TOML contents and merge them over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        Ok(Config::default().merged(toml_config))
    }

    fn merged(mut self, toml_config: TomlConfig) -> Self {
        if let Some(playback) = toml_config.playback {
            if let Some(ms) = playback.interval_ms {
                self.interval = Duration::from_millis(ms);
            }
            if let Some(divisor) = playback.animation_divisor {
                self.animation_divisor = divisor.max(1);
            }
        }

        if let Some(array) = toml_config.array {
            let a = &mut self.array;
            a.quantity_min = array.quantity_min.unwrap_or(a.quantity_min);
            a.quantity_max = array.quantity_max.unwrap_or(a.quantity_max);
            a.quantity = array.quantity.unwrap_or(a.quantity);
            a.range_from = array.range_from.unwrap_or(a.range_from);
            a.range_to = array.range_to.unwrap_or(a.range_to);
            if a.quantity_min > a.quantity_max {
                tracing::warn!(
                    min = a.quantity_min,
                    max = a.quantity_max,
                    "quantity_min exceeds quantity_max, swapping"
                );
                std::mem::swap(&mut a.quantity_min, &mut a.quantity_max);
            }
            if a.range_from > a.range_to {
                tracing::warn!(
                    from = a.range_from,
                    to = a.range_to,
                    "range_from exceeds range_to, swapping"
                );
                std::mem::swap(&mut a.range_from, &mut a.range_to);
            }
        }

        if let Some(keys) = toml_config.keys {
            self.keybindings.merge(keys.to_keybinding_config());
        }

        self
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Duration of renderer-side animations
    pub fn animation_duration(&self) -> Duration {
        self.interval / self.animation_divisor.max(1)
    }
}
