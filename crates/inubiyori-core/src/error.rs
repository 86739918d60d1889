//! Error types for the kennel engine.

use std::io;
use std::path::PathBuf;

use inubiyori_logic::InputError;
use thiserror::Error;

/// A save document could not be read or written.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// The kennel configuration could not be loaded or is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Failures surfaced by [`Roster`](crate::roster::Roster) operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("no live pet with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
