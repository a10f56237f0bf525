//! Command-line interface for click-chess.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::config::MatchConfig;
use crate::error::ConfigError;

/// Click Chess - two players, one board, every move logged
#[derive(Parser, Debug, Default)]
#[command(name = "click-chess")]
#[command(about = "Point-and-click chess for two players with a move log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of the White player
    #[arg(long)]
    pub white: Option<String>,

    /// Name of the Black player
    #[arg(long)]
    pub black: Option<String>,

    /// Directory for move log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Do not write a move log
    #[arg(long)]
    pub no_log: bool,
}

impl Cli {
    /// Load the config file (or defaults) and apply the flags on top
    pub fn resolve_config(&self) -> Result<MatchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_file(path)?,
            None => MatchConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut MatchConfig) {
        if let Some(white) = &self.white {
            config.players.white = white.clone();
        }
        if let Some(black) = &self.black {
            config.players.black = black.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log.directory = dir.clone();
        }
        if self.no_log {
            config.log.enabled = false;
        }
        debug!(?config, "configuration resolved");
    }
}
