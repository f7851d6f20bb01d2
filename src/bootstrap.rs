//! Process startup: load catalogs, pick the initial language, activate it.
//!
//! Individual catalog problems never abort startup. Unreadable files and
//! documents that fail to parse are collected in the [`BootstrapReport`] and
//! the application continues with whatever loaded, falling back to source
//! text for anything missing.

use std::env;
use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use glob::glob;
use log::{info, warn};
use thiserror::Error;
use tslocale_common::i18n::global;
use tslocale_common::i18n::{
    CatalogLoader, LANGUAGE_ENV, LanguageIdError, LanguageSelection, LoadFailure, LoadSummary,
    Translator, resolve_language,
};

use crate::config::LocaleConfig;

/// Startup failures that leave no usable translator.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configured fallback language is not a valid tag.
    #[error("invalid fallback language `{value}`: {source}")]
    InvalidFallback {
        /// The configured value.
        value: String,
        /// Why the tag was rejected.
        #[source]
        source: LanguageIdError,
    },

    /// The catalog directory cannot be turned into a search pattern.
    #[error("cannot scan catalog directory {directory}: {reason}")]
    CatalogPattern {
        /// The configured directory.
        directory: Utf8PathBuf,
        /// Description of the pattern failure.
        reason: String,
    },
}

/// A catalog file that could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnreadableCatalog {
    /// Path of the file.
    pub path: Utf8PathBuf,
    /// Description of the I/O failure.
    pub reason: String,
}

/// What happened during startup.
#[derive(Clone, Debug)]
pub struct BootstrapReport {
    /// Catalog files that were attempted, in load order.
    pub files: Vec<Utf8PathBuf>,
    /// Files that could not be read.
    pub unreadable: Vec<UnreadableCatalog>,
    /// Registered catalogs and per-document parse failures.
    pub summary: LoadSummary,
    /// The initial language and where it came from.
    pub selection: LanguageSelection,
}

impl BootstrapReport {
    /// Whether every catalog file was read and parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unreadable.is_empty() && self.summary.is_clean()
    }

    /// Total warning-level load diagnostics across registered catalogs.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.summary
            .reports
            .iter()
            .map(tslocale_common::i18n::LoadReport::warning_count)
            .sum()
    }
}

/// A ready translator and the report of how it was built.
#[derive(Debug)]
pub struct Bootstrap {
    /// The translator with the initial language active.
    pub translator: Arc<Translator>,
    /// Startup report.
    pub report: BootstrapReport,
}

impl Bootstrap {
    /// Install the translator as the process-wide handle.
    ///
    /// Returns any translator that was installed before.
    pub fn install_global(&self) -> Option<Arc<Translator>> {
        global::install(Arc::clone(&self.translator))
    }
}

/// Build a translator from `config`, consulting `TSLOCALE_LANGUAGE`.
///
/// # Errors
///
/// See [`bootstrap_with`].
pub fn bootstrap(
    config: &LocaleConfig,
    explicit: Option<&str>,
) -> Result<Bootstrap, BootstrapError> {
    bootstrap_with(config, explicit, env::var(LANGUAGE_ENV).ok())
}

/// Build a translator from `config` with an explicit environment value.
///
/// Catalogs are read from `catalog_dir` (every `*.ts` file, sorted by path)
/// and then from `catalogs`. A later document for an already loaded language
/// replaces the earlier one. The initial language is chosen from `explicit`,
/// then `environment`, then the configured language, then the fallback.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidFallback`] when the fallback tag is
/// malformed and [`BootstrapError::CatalogPattern`] when the catalog
/// directory cannot be scanned.
pub fn bootstrap_with(
    config: &LocaleConfig,
    explicit: Option<&str>,
    environment: Option<String>,
) -> Result<Bootstrap, BootstrapError> {
    let fallback = config
        .fallback_language()
        .map_err(|source| BootstrapError::InvalidFallback {
            value: config.fallback_language.clone(),
            source,
        })?;
    let translator = Translator::with_loader(
        fallback.clone(),
        CatalogLoader::new(config.loader_options()),
    );

    let mut files = match &config.catalog_dir {
        Some(directory) => discover_catalogs(directory)?,
        None => Vec::new(),
    };
    files.extend(config.catalogs.iter().cloned());

    let mut unreadable = Vec::new();
    let mut summary = LoadSummary::default();
    for path in &files {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(target: "tslocale::loader", "cannot read catalog {path}: {error}");
                unreadable.push(UnreadableCatalog {
                    path: path.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };
        match translator.load_bytes(&bytes) {
            Ok(report) => summary.reports.push(report),
            Err(error) => {
                warn!(target: "tslocale::loader", "skipping catalog {path}: {error}");
                summary.failures.push(LoadFailure {
                    origin: path.to_string(),
                    error,
                });
            }
        }
    }

    let selection = resolve_language(
        explicit,
        environment,
        config.language(),
        &translator.languages(),
        &fallback,
    );
    selection.log_outcome();
    if let Err(error) = translator.set_active_language(selection.language().as_str()) {
        warn!(target: "tslocale::selection", "{error}");
    }

    info!(
        target: "tslocale::loader",
        "loaded {} catalog(s); {} active",
        summary.reports.len(),
        translator.active_language(),
    );

    Ok(Bootstrap {
        translator: Arc::new(translator),
        report: BootstrapReport {
            files,
            unreadable,
            summary,
            selection,
        },
    })
}

/// Discover `*.ts` documents inside `directory`, sorted by path.
///
/// A missing directory yields no catalogs.
///
/// # Errors
///
/// Returns [`BootstrapError::CatalogPattern`] when the directory name is not
/// a valid search pattern.
pub fn discover_catalogs(directory: &Utf8Path) -> Result<Vec<Utf8PathBuf>, BootstrapError> {
    let escaped = glob::Pattern::escape(directory.as_str());
    let pattern = Utf8Path::new(&escaped).join("*.ts");
    let walker = glob(pattern.as_str()).map_err(|error| BootstrapError::CatalogPattern {
        directory: directory.to_owned(),
        reason: error.to_string(),
    })?;

    let mut catalogs = Vec::new();
    for entry in walker {
        let found = match entry {
            Ok(found) => found,
            Err(error) => {
                warn!(target: "tslocale::loader", "skipping catalog entry: {error}");
                continue;
            }
        };
        match Utf8PathBuf::from_path_buf(found) {
            Ok(path) if path.is_file() => catalogs.push(path),
            Ok(_) => {}
            Err(raw) => {
                warn!(
                    target: "tslocale::loader",
                    "skipping catalog with a non UTF-8 path: {}",
                    raw.display(),
                );
            }
        }
    }

    if catalogs.is_empty() {
        warn!(target: "tslocale::loader", "no catalogs found in {directory}");
    }
    catalogs.sort();
    Ok(catalogs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_directory_yields_no_catalogs() {
        let catalogs = discover_catalogs(Utf8Path::new("/nonexistent/tslocale/i18n"))
            .expect("pattern should be valid");

        assert!(catalogs.is_empty());
    }

    #[rstest]
    fn invalid_fallback_is_fatal() {
        let config = LocaleConfig {
            fallback_language: String::from("!!"),
            ..LocaleConfig::default()
        };

        let error = bootstrap_with(&config, None, None).expect_err("fallback should be rejected");

        assert!(matches!(error, BootstrapError::InvalidFallback { .. }));
    }

    #[rstest]
    fn empty_configuration_serves_source_text() {
        let outcome =
            bootstrap_with(&LocaleConfig::default(), Some("de_DE"), None).expect("bootstrap");

        assert!(outcome.report.is_clean());
        assert!(outcome.report.selection.used_fallback());
        assert_eq!(
            outcome.translator.resolve("", "Set folder to %1", &[&"/srv"]),
            "Set folder to /srv"
        );
    }
}
