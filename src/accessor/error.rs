use thiserror::Error;

use crate::flag::error_message;

/// Errors returned by the typed accessors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("no such configuration setting {0}")]
    NotFound(String),

    #[error("value for configuration setting {0} must be slice")]
    ShapeMismatch(String),

    /// The flag rejected the value; `message` is clap's own error text.
    #[error("configuration setting {path}: {message}")]
    Conversion {
        path: String,
        message: String,
        source: clap::Error,
    },
}

impl AccessError {
    pub(crate) fn conversion(path: &str, source: clap::Error) -> Self {
        Self::Conversion {
            path: path.to_string(),
            message: error_message(&source),
            source,
        }
    }

    /// The configuration path the error is about.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound(path) | Self::ShapeMismatch(path) => path,
            Self::Conversion { path, .. } => path,
        }
    }

    /// The kind of clap error behind a failed conversion.
    pub fn kind(&self) -> Option<clap::error::ErrorKind> {
        match self {
            Self::Conversion { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
