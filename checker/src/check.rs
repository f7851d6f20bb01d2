//! Catalog validation.
//!
//! Each file is parsed independently. A file that cannot be read or parsed
//! fails the check; load diagnostics are reported and fail the check only
//! under `--deny-warnings`.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tslocale_common::i18n::{CatalogLoader, LoadDiagnostic, LoaderOptions, Severity};

use crate::cli::CheckArgs;
use crate::error::{CheckError, Result};

/// One diagnostic as printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticLine {
    /// `note` or `warning`.
    pub severity: String,
    /// Human-readable description.
    pub message: String,
}

impl From<&LoadDiagnostic> for DiagnosticLine {
    fn from(diagnostic: &LoadDiagnostic) -> Self {
        Self {
            severity: diagnostic.severity().to_string(),
            message: diagnostic.to_string(),
        }
    }
}

/// Result of checking one catalog file.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogReport {
    /// Path of the file.
    pub path: Utf8PathBuf,
    /// Declared language, when the file parsed.
    pub language: Option<String>,
    /// Indexed entries.
    pub entries: usize,
    /// Entries with a non-empty translation.
    pub translated: usize,
    /// Load diagnostics.
    pub diagnostics: Vec<DiagnosticLine>,
    /// Why the file could not be loaded.
    pub error: Option<String>,
}

impl CatalogReport {
    fn failed(path: &Utf8Path, error: &CheckError) -> Self {
        Self {
            path: path.to_owned(),
            language: None,
            entries: 0,
            translated: 0,
            diagnostics: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Number of warning-level diagnostics.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|line| line.severity == Severity::Warning.to_string())
            .count()
    }

    /// Whether this catalog fails the check.
    #[must_use]
    pub fn fails(&self, deny_warnings: bool) -> bool {
        self.error.is_some() || (deny_warnings && self.warning_count() > 0)
    }
}

/// Result of a whole check run.
#[derive(Clone, Debug, Serialize)]
pub struct CheckReport {
    /// One report per file, in argument order.
    pub catalogs: Vec<CatalogReport>,
}

impl CheckReport {
    /// Number of catalogs failing the check.
    #[must_use]
    pub fn failed(&self, deny_warnings: bool) -> usize {
        self.catalogs
            .iter()
            .filter(|catalog| catalog.fails(deny_warnings))
            .count()
    }
}

/// Check one catalog file.
#[must_use]
pub fn check_file(loader: &CatalogLoader, path: &Utf8Path) -> CatalogReport {
    let parsed = fs::read(path)
        .map_err(|error| CheckError::Read {
            path: path.to_owned(),
            reason: error.to_string(),
        })
        .and_then(|bytes| {
            loader
                .parse_bytes(&bytes)
                .map_err(|source| CheckError::Parse {
                    path: path.to_owned(),
                    source,
                })
        });

    match parsed {
        Ok(loaded) => CatalogReport {
            path: path.to_owned(),
            language: Some(loaded.catalog.language().to_string()),
            entries: loaded.catalog.len(),
            translated: loaded.catalog.translated_len(),
            diagnostics: loaded.diagnostics.iter().map(DiagnosticLine::from).collect(),
            error: None,
        },
        Err(error) => CatalogReport::failed(path, &error),
    }
}

/// Run the check command, writing the report to `out`.
///
/// # Errors
///
/// Returns [`CheckError::CheckFailed`] when any catalog fails, and
/// [`CheckError::Output`] when the report cannot be written.
pub fn check(args: &CheckArgs, out: &mut dyn Write) -> Result<CheckReport> {
    let loader = CatalogLoader::new(LoaderOptions {
        include_unfinished: !args.exclude_unfinished,
    });
    let report = CheckReport {
        catalogs: args
            .catalogs
            .iter()
            .map(|path| check_file(&loader, path))
            .collect(),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_report(&report, args.quiet, out)?;
    }

    let failed = report.failed(args.deny_warnings);
    if failed > 0 {
        return Err(CheckError::CheckFailed {
            failed,
            checked: report.catalogs.len(),
        });
    }
    Ok(report)
}

fn write_report(report: &CheckReport, quiet: bool, out: &mut dyn Write) -> std::io::Result<()> {
    for catalog in &report.catalogs {
        match (&catalog.error, &catalog.language) {
            (Some(error), _) => writeln!(out, "{}: error: {error}", catalog.path)?,
            (None, language) => writeln!(
                out,
                "{}: {} ({} entries, {} translated)",
                catalog.path,
                language.as_deref().unwrap_or_default(),
                catalog.entries,
                catalog.translated,
            )?,
        }
        for line in &catalog.diagnostics {
            if quiet && line.severity != Severity::Warning.to_string() {
                continue;
            }
            writeln!(out, "  {}: {}", line.severity, line.message)?;
        }
    }
    Ok(())
}
