//! Error types for the catalog checker.

use camino::Utf8PathBuf;
use thiserror::Error;
use tslocale_common::i18n::{CatalogParseError, UnknownLanguageError};

/// Failures that stop a checker command.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A catalog file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Path of the catalog.
        path: Utf8PathBuf,
        /// Description of the I/O failure.
        reason: String,
    },

    /// A catalog file is not a valid document.
    #[error("{path}: {source}")]
    Parse {
        /// Path of the catalog.
        path: Utf8PathBuf,
        /// The parse failure.
        #[source]
        source: CatalogParseError,
    },

    /// The requested language has no loaded catalog.
    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguageError),

    /// One or more catalogs failed the check.
    #[error("{failed} of {checked} catalog(s) failed the check")]
    CheckFailed {
        /// Catalogs that failed.
        failed: usize,
        /// Catalogs examined.
        checked: usize,
    },

    /// Writing the report failed.
    #[error("failed to write output: {reason}")]
    Output {
        /// Description of the I/O failure.
        reason: String,
    },
}

impl From<std::io::Error> for CheckError {
    fn from(error: std::io::Error) -> Self {
        Self::Output {
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(error: serde_json::Error) -> Self {
        Self::Output {
            reason: error.to_string(),
        }
    }
}

/// Result alias for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;
