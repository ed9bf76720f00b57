#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown lookup window kind: {name}")]
    UnknownWindowKind { name: String },

    #[error("unknown reset policy: {name}")]
    UnknownResetPolicy { name: String },

    #[error("keyword must not be empty: {role}")]
    EmptyKeyword { role: &'static str },
}

impl FinderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
