//! Error types for the smartdate library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all smartdate operations.
///
/// Formatting itself degrades gracefully (unknown locale, unknown mode, empty
/// phrase), so the only formatting failure is [`SmartdateError::InvalidTimestamp`].
/// The remaining variants come from configuration and document I/O.
#[derive(Error, Debug)]
pub enum SmartdateError {
    /// Input that cannot be interpreted as an instant
    #[error("Invalid timestamp: {input}")]
    InvalidTimestamp { input: String },
    /// Locale registered without one of the required modes
    #[error("Locale '{locale}' is missing required mode '{mode}'")]
    IncompleteLocale { locale: String, mode: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SmartdateError {
    /// Creates an invalid timestamp error from anything printable.
    pub fn invalid_timestamp(input: impl fmt::Display) -> Self {
        Self::InvalidTimestamp {
            input: input.to_string(),
        }
    }

    /// Creates a file system error for `path`.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to SmartdateError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| SmartdateError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for smartdate operations
pub type Result<T> = std::result::Result<T, SmartdateError>;
