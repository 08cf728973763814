//! Settings read from `pawnchess.toml`.
//!
//! ```toml
//! difficulty = 4
//! human = "black"
//! starter = "machine"
//!
//! [rules]
//! double_step_requires_clear_path = true
//!
//! [search]
//! root_tie_break = "earliest_child"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use minimax_engine::RootTieBreak;
use pawn_core::{Difficulty, GameConfig, Role, RuleSet, Side};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pawnchess.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub root_tie_break: RootTieBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub difficulty: Difficulty,
    /// Colour the human plays
    pub human: Side,
    /// Who makes the first move
    pub starter: Role,
    pub rules: RuleSet,
    pub search: SearchConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human: Side::White,
            starter: Role::Human,
            rules: RuleSet::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads an explicitly requested file; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }

    /// Uses `path` when given, otherwise [`DEFAULT_CONFIG_FILE`] if it
    /// exists, otherwise the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn game_config(&self) -> GameConfig {
        let starting = match self.starter {
            Role::Human => self.human,
            Role::Machine => self.human.other(),
        };
        GameConfig {
            starting,
            human: self.human,
            difficulty: self.difficulty,
            rules: self.rules,
        }
    }
}
