use crate::consts;
use crate::game::Grid;
use crate::highscores::{HighScoreFile, HighScoreStore, MemoryStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings that shape the game itself
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("powersnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the store that the high score should be kept in.
    ///
    /// If `self.files.save_high_score` is `false`, or if no path is configured
    /// and the default path cannot be determined, the high score is only kept
    /// in memory.
    pub(crate) fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        if !self.files.save_high_score {
            return Box::new(MemoryStore::default());
        }
        match self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreFile::default_path)
        {
            Some(path) => {
                let store = HighScoreFile::new(path);
                tracing::debug!(path = %store.path().display(), "using high score file");
                Box::new(store)
            }
            None => {
                tracing::warn!(
                    "could not determine high score file path; high score will not be saved"
                );
                Box::new(MemoryStore::default())
            }
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// The playing field
    pub(crate) grid: Grid,

    /// Whether sound starts out enabled
    pub(crate) sound: bool,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid: Grid::default(),
            sound: true,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    grid_size: u16,
    sound: bool,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            grid_size: consts::DEFAULT_GRID_SIZE,
            sound: true,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GridSizeError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GridSizeError> {
        if !(consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE).contains(&value.grid_size) {
            return Err(GridSizeError(value.grid_size));
        }
        Ok(GameConfig {
            grid: Grid::new(value.grid_size),
            sound: value.sound,
        })
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error(
    "grid-size must be between {min} and {max}, got {0}",
    min = consts::MIN_GRID_SIZE,
    max = consts::MAX_GRID_SIZE
)]
pub(crate) struct GridSizeError(u16);

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,

    /// File to write log messages to; no logging happens without one
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_score_file: Option<String>,
    save_high_score: bool,
    log_file: Option<String>,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            high_score_file: value
                .high_score_file
                .map(expanduser::expanduser)
                .transpose()?,
            save_high_score: value.save_high_score,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
