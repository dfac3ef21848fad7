//! Configuration schema definitions and loading.
//!
//! The configuration file is optional TOML; every section falls back to
//! its defaults when absent. Command line flags override file values.

mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use paths::ConfigPaths;

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Main configuration structure for mediabar.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Status line rendering.
    #[serde(default)]
    pub output: OutputConfig,

    /// Which players may become active.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// D-Bus shift signal identity.
    #[serde(default)]
    pub shift: ShiftConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this configuration was read from, `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Shape of each emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The bare status text
    Text,

    /// A `{"text", "class", "alt"}` record for Waybar's `return-type = json`
    #[default]
    Json,
}

/// Status line rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Shape of each emitted line.
    pub format: OutputFormat,

    /// Prepended to the player name to form the JSON `class` field.
    pub class_prefix: String,

    /// Show the title alone when the artist is missing.
    pub title_fallback: bool,

    /// Show the artist alone when the title is missing.
    pub artist_fallback: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            class_prefix: "custom-".to_string(),
            title_fallback: true,
            artist_fallback: false,
        }
    }
}

/// Which players may become active
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Only this player (backend or instance name) ever produces output.
    pub player: Option<String>,

    /// Bus name patterns of players that are never tracked.
    pub ignored_players: Vec<String>,
}

/// D-Bus signal that requests re-picking the active player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShiftConfig {
    /// Signal interface name.
    pub interface: String,

    /// Signal member name.
    pub member: String,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            interface: "org.mediabar.Control".to_string(),
            member: "Shift".to_string(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file.
    pub file: bool,
}
