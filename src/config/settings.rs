use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sim::Action;

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyBindings};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Default recording length, in ticks, when nobody quits.
pub const DEFAULT_MAX_TICKS: u64 = 300;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Target tick rate of the live run
    pub tick_rate_hz: u32,
    /// Recording stops after this many ticks (None = until quit)
    pub max_ticks: Option<u64>,
    /// Default log filter directive
    pub log_level: String,
    /// Keybinding configuration
    pub keybindings: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            max_ticks: Some(DEFAULT_MAX_TICKS),
            log_level: "warn".to_string(),
            keybindings: default_keybindings(),
        }
    }
}

/// One key or several keys for an action
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TomlKeyList {
    One(String),
    Many(Vec<String>),
}

impl TomlKeyList {
    fn notations(&self) -> Vec<&str> {
        match self {
            TomlKeyList::One(s) => vec![s.as_str()],
            TomlKeyList::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlLogConfig {
    pub level: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub tick_rate_hz: Option<u32>,
    pub max_ticks: Option<u64>,
    pub log: Option<TomlLogConfig>,
    /// action name -> key notation(s)
    pub keys: Option<HashMap<String, TomlKeyList>>,
}

/// Convert the `[keys]` table into bindings. Unknown actions and invalid
/// notation are skipped with a warning.
fn parse_keys(keys: &HashMap<String, TomlKeyList>) -> KeyBindings {
    let mut bindings = KeyBindings::empty();
    for (action_name, list) in keys {
        let Some(action) = Action::from_name(action_name) else {
            tracing::warn!(action = %action_name, "Unknown action in [keys], ignoring");
            continue;
        };
        for notation in list.notations() {
            match parse_key_notation(notation) {
                Ok(combo) => bindings.bind(combo, action),
                Err(e) => {
                    tracing::warn!(
                        action = %action_name,
                        key = %notation,
                        error = %e,
                        "Invalid key notation in [keys], ignoring"
                    );
                }
            }
        }
    }
    bindings
}

impl Config {
    /// Load configuration from `path`, merging it over the defaults. A missing
    /// file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML config contents, merging them over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(toml_config);
        Ok(config)
    }

    fn apply(&mut self, toml_config: TomlConfig) {
        if let Some(hz) = toml_config.tick_rate_hz {
            self.tick_rate_hz = hz.max(1);
        }
        if let Some(max) = toml_config.max_ticks {
            self.max_ticks = (max > 0).then_some(max);
        }
        if let Some(level) = toml_config.log.and_then(|log| log.level) {
            self.log_level = level;
        }
        if let Some(keys) = toml_config.keys {
            self.keybindings.merge(parse_keys(&keys));
        }
    }

    /// Write the bundled example config to `path` unless a file is already
    /// there. Returns whether a file was written.
    pub fn write_example(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, EXAMPLE_CONFIG).map_err(write_err)?;
        Ok(true)
    }

    /// Human-readable summary for `retrace config show`.
    pub fn describe(&self) -> String {
        let max_ticks = self
            .max_ticks
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        let mut out = format!(
            "tick_rate_hz = {}\nmax_ticks = {}\nlog.level = {}\n",
            self.tick_rate_hz, max_ticks, self.log_level
        );
        for action in [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Halt,
            Action::Quit,
        ] {
            let keys: Vec<String> = self
                .keybindings
                .keys_for(action)
                .iter()
                .map(|k| k.to_string())
                .collect();
            out.push_str(&format!("keys.{} = {}\n", action.name(), keys.join(", ")));
        }
        out
    }
}
