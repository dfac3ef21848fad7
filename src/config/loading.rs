use std::{fs, io::ErrorKind, path::Path};

use super::{Config, ConfigPaths};
use crate::{MediabarError, Result};

impl Config {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the
    /// default location is tried and a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// for this schema.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = ConfigPaths::main_config()?;
                if default_path.exists() {
                    Self::load_file(&default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load and parse one configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MediabarError::io_at("config file not found", path),
            _ => MediabarError::io_at(e, path),
        })?;

        let mut config = Self::from_toml(&content).map_err(|e| match e {
            MediabarError::TomlParseError { details, .. } => {
                MediabarError::toml_parse(details, Some(path))
            }
            other => other,
        })?;

        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns `MediabarError::TomlParseError` on invalid content.
    pub fn from_toml(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| MediabarError::toml_parse(e, None))
    }
}
