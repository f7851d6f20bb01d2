//! Startup configuration read from `tslocale.toml`.
//!
//! The file names the initial language, the fallback language whose catalog
//! renders source text verbatim, and where catalog documents live. Every
//! field has a default so an empty file, or no file at all, is valid.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;
use tslocale_common::i18n::{
    FALLBACK_LOCALE, LanguageId, LanguageIdError, LoaderOptions, normalise_language,
};

/// Conventional configuration file name.
pub const CONFIG_FILE: &str = "tslocale.toml";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the I/O failure.
        reason: String,
    },

    /// The configuration file is not valid TOML or carries unknown keys.
    #[error("invalid configuration in {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Inline configuration text is not valid.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Description of the parse failure.
        reason: String,
    },
}

/// Locale settings for an application.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Preferred initial language. Blank values count as unset, so
    /// templated files such as `language = ""` fall back cleanly.
    pub language: Option<String>,
    /// Language of the identity catalog that renders source text.
    pub fallback_language: String,
    /// Directory scanned for `*.ts` catalog documents.
    pub catalog_dir: Option<Utf8PathBuf>,
    /// Additional catalog documents loaded after the directory scan.
    pub catalogs: Vec<Utf8PathBuf>,
    /// Whether translations marked unfinished are served.
    pub include_unfinished: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: None,
            fallback_language: FALLBACK_LOCALE.to_owned(),
            catalog_dir: None,
            catalogs: Vec::new(),
            include_unfinished: LoaderOptions::default().include_unfinished,
        }
    }
}

impl LocaleConfig {
    /// Read configuration from `path`.
    ///
    /// Relative catalog paths are resolved against the directory holding
    /// the file, so the configuration can travel with its catalogs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;
        let config = toml::from_str::<Self>(&text).map_err(|error| ConfigError::Parse {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;
        let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Parse configuration from TOML text. Paths are kept as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use tslocale::LocaleConfig;
    ///
    /// let config = LocaleConfig::from_toml_str("language = \"de_DE\"\n").unwrap();
    /// assert_eq!(config.language(), Some("de_DE"));
    /// assert_eq!(config.fallback_language, "en_US");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|error| ConfigError::Invalid {
            reason: error.to_string(),
        })
    }

    /// Resolve relative catalog paths against `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Utf8Path) -> Self {
        let rebase = |path: Utf8PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.catalog_dir = self.catalog_dir.map(rebase);
        self.catalogs = self.catalogs.into_iter().map(rebase).collect();
        self
    }

    /// The configured initial language, ignoring blank values.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        normalise_language(self.language.as_deref())
    }

    /// The fallback language as a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns the identifier error when the configured tag is malformed.
    pub fn fallback_language(&self) -> Result<LanguageId, LanguageIdError> {
        LanguageId::from_setting(&self.fallback_language)
    }

    /// Loader options derived from this configuration.
    #[must_use]
    pub const fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            include_unfinished: self.include_unfinished,
        }
    }
}
