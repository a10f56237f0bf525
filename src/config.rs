//! Match configuration, loaded from TOML with command-line overrides applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::BoardGeometry;
use crate::error::ConfigError;
use crate::models::LogDestination;

/// Longest player name kept, in characters
pub const MAX_NAME_LEN: usize = 24;

/// Default square size in pixels
pub const DEFAULT_SQUARE_SIZE: f32 = 80.0;

/// Default board offset in pixels
pub const DEFAULT_BOARD_PADDING: f32 = 20.0;

/// Complete match configuration. Every field has a default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub players: PlayersConfig,
    pub board: BoardConfig,
    pub log: LogConfig,
}

/// Raw player names as written in the file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub white: String,
    pub black: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            white: "White".to_string(),
            black: "Black".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Initial square size in pixels
    pub square: f32,
    /// Board origin offset from the top-left corner
    pub padding: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            square: DEFAULT_SQUARE_SIZE,
            padding: DEFAULT_BOARD_PADDING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    /// Directory the per-game log files go into
    pub directory: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("."),
        }
    }
}

/// Player names after trimming and capping
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Players {
    pub white: String,
    pub black: String,
}

impl Players {
    pub fn new(white: &str, black: &str) -> Self {
        Self {
            white: sanitize_name(white, "White"),
            black: sanitize_name(black, "Black"),
        }
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// Trim, cap at [`MAX_NAME_LEN`] characters, fall back when blank
fn sanitize_name(name: &str, fallback: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(white = %config.players.white, black = %config.players.black, "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn players(&self) -> Players {
        Players::new(&self.players.white, &self.players.black)
    }

    /// Initial board geometry; non-positive sizes fall back to the defaults
    pub fn geometry(&self) -> BoardGeometry {
        let square = if self.board.square.is_finite() && self.board.square > 0.0 {
            self.board.square
        } else {
            DEFAULT_SQUARE_SIZE
        };
        let padding = if self.board.padding.is_finite() && self.board.padding >= 0.0 {
            self.board.padding
        } else {
            DEFAULT_BOARD_PADDING
        };
        BoardGeometry::new(padding, padding, square)
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log.enabled {
            LogDestination::Directory(self.log.directory.clone())
        } else {
            LogDestination::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.players(), Players::new("White", "Black"));
        assert_eq!(config.geometry(), BoardGeometry::new(20.0, 20.0, 80.0));
        assert!(matches!(
            config.log_destination(),
            LogDestination::Directory(dir) if dir == Path::new(".")
        ));
    }

    #[test]
    fn test_partial_toml() {
        let config = MatchConfig::from_toml(
            r#"
            [players]
            black = "Magnus"

            [log]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.players.white, "White");
        assert_eq!(config.players.black, "Magnus");
        assert_eq!(config.board, BoardConfig::default());
        assert!(matches!(config.log_destination(), LogDestination::Disabled));
    }

    #[test]
    fn test_bad_geometry_falls_back() {
        let config = MatchConfig::from_toml("[board]\nsquare = 0.0\npadding = -5.0\n").unwrap();
        assert_eq!(config.geometry(), BoardGeometry::new(20.0, 20.0, 80.0));
    }

    #[test]
    fn test_name_sanitizing() {
        let players = Players::new("   ", "  Garry  ");
        assert_eq!(players.white, "White");
        assert_eq!(players.black, "Garry");

        let long = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(Players::new(long, "").white, "abcdefghijklmnopqrstuvwx");
        assert_eq!(Players::new(long, "").white.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            MatchConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[players\nwhite = 1").unwrap();
        assert!(matches!(
            MatchConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[players]\nwhite = \"Judit\"\n").unwrap();
        assert_eq!(MatchConfig::from_file(&good).unwrap().players.white, "Judit");
    }
}
