//! Command line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

use crate::{
    Result,
    config::{Config, OutputFormat},
    tracing_config,
};

/// Print the active MPRIS player as a Waybar status line
#[derive(Debug, Parser)]
#[command(name = "mediabar", version, about)]
pub struct Cli {
    /// Increase log verbosity; repeat for more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only show this player (e.g. `spotify` or `firefox.instance_1_42`)
    #[arg(short, long)]
    pub player: Option<String>,

    /// Output shape, overriding the config file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/mediabar/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log threshold requested on the command line
    pub fn log_level(&self) -> LevelFilter {
        tracing_config::verbosity_level(self.verbose)
    }

    /// Load the configuration file and apply command line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply command line values on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(player) = &self.player {
            config.selection.player = Some(player.clone());
        }

        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}
