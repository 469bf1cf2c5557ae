//! Configuration file loading for the chesskit driver.
//!
//! Settings live in a TOML file, `chesskit.toml` in the current directory
//! unless `--config` points elsewhere. Every field is optional.

use chesskit_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `default_promotion` is not one of `q`, `r`, `b`, `n`.
    #[error("Invalid default promotion: {0:?}")]
    InvalidPromotion(String),
}

/// Driver settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChesskitConfig {
    /// FEN used by `play` and `status` when none is given on the command line.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Piece a pawn promotes to when a move names none. Defaults to "q".
    #[serde(default = "default_promotion")]
    pub default_promotion: String,
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_promotion() -> String {
    "q".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for ChesskitConfig {
    fn default() -> Self {
        ChesskitConfig {
            start_fen: None,
            default_promotion: default_promotion(),
            log_filter: default_log_filter(),
        }
    }
}

impl ChesskitConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::InvalidPromotion`] for an unusable promotion piece.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.promotion_piece()?;
        Ok(config)
    }

    /// Default location of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chesskit.toml")
    }

    /// The configured promotion piece.
    pub fn promotion_piece(&self) -> Result<PieceKind, ConfigError> {
        let mut chars = self.default_promotion.chars();
        match (chars.next().and_then(PieceKind::from_char), chars.next()) {
            (Some(kind), None) if PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
            _ => Err(ConfigError::InvalidPromotion(self.default_promotion.clone())),
        }
    }
}
