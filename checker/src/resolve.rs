//! Render one message through loaded catalogs.

use std::fmt::Display;
use std::fs;
use std::io::Write;

use tslocale_common::i18n::{FallbackReason, Origin, Resolution, Translator};

use crate::cli::ResolveArgs;
use crate::error::{CheckError, Result};

/// Load the requested catalogs, activate the language and resolve the
/// message. The rendered text goes to `out`; how it was resolved goes to
/// `notes`.
///
/// # Errors
///
/// Fails when a catalog cannot be read or parsed, or when no loaded catalog
/// matches the requested language.
pub fn resolve(
    args: &ResolveArgs,
    out: &mut dyn Write,
    notes: &mut dyn Write,
) -> Result<Resolution> {
    let translator = Translator::default();
    for path in &args.catalogs {
        let bytes = fs::read(path).map_err(|error| CheckError::Read {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        translator
            .load_bytes(&bytes)
            .map_err(|source| CheckError::Parse {
                path: path.clone(),
                source,
            })?;
    }
    translator.set_active_language(&args.language)?;

    let values: Vec<&dyn Display> = args.args.iter().map(|arg| arg as &dyn Display).collect();
    let resolution = translator.lookup(&args.context, &args.source, &values);

    writeln!(out, "{}", resolution.text())?;
    match resolution.origin() {
        Origin::Translated => {}
        Origin::Fallback(FallbackReason::Missing) => writeln!(
            notes,
            "note: no {} entry for this message; rendered the source text",
            resolution.language(),
        )?,
        Origin::Fallback(FallbackReason::Untranslated) => writeln!(
            notes,
            "note: the {} entry is untranslated; rendered the source text",
            resolution.language(),
        )?,
    }
    for index in resolution.missing_arguments() {
        writeln!(notes, "warning: no value supplied for %{index}")?;
    }
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;
    use tslocale_common::i18n::testing::TsDocument;

    fn resolve_args(
        catalogs: Vec<Utf8PathBuf>,
        language: &str,
        source: &str,
        args: &[&str],
    ) -> ResolveArgs {
        ResolveArgs {
            catalogs,
            language: language.to_owned(),
            context: String::from("QObject"),
            source: source.to_owned(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }

    fn german_catalog(directory: &Utf8Path) -> Utf8PathBuf {
        let path = directory.join("app_de.ts");
        let document = TsDocument::new("de_DE")
            .context("QObject")
            .messages([
                (
                    "[VISION] Decoding image batch %1/%2 (%3%)",
                    "[VISION] Bildbatch %1/%2 wird decodiert (%3%)",
                ),
                ("Set folder to %1", "Ordner auf %1 gesetzt"),
            ])
            .render();
        fs::write(&path, document).expect("catalog should be written");
        path
    }

    #[rstest]
    fn renders_translation_with_literal_percent() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let root = Utf8Path::from_path(directory.path()).expect("UTF-8 path");
        let args = resolve_args(
            vec![german_catalog(root)],
            "de_DE",
            "[VISION] Decoding image batch %1/%2 (%3%)",
            &["4", "10", "40"],
        );
        let (mut out, mut notes) = (Vec::new(), Vec::new());

        let resolution = resolve(&args, &mut out, &mut notes).expect("resolution should succeed");

        assert_eq!(resolution.origin(), Origin::Translated);
        assert_eq!(
            String::from_utf8(out).expect("UTF-8"),
            "[VISION] Bildbatch 4/10 wird decodiert (40%)\n"
        );
        assert!(notes.is_empty());
    }

    #[rstest]
    fn notes_fallback_and_missing_arguments() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let root = Utf8Path::from_path(directory.path()).expect("UTF-8 path");
        let args = resolve_args(vec![german_catalog(root)], "de_DE", "Rename %1 to %2", &["a"]);
        let (mut out, mut notes) = (Vec::new(), Vec::new());

        resolve(&args, &mut out, &mut notes).expect("resolution should succeed");

        assert_eq!(String::from_utf8(out).expect("UTF-8"), "Rename a to %2\n");
        let notes = String::from_utf8(notes).expect("UTF-8");
        assert!(notes.contains("no de_DE entry"));
        assert!(notes.contains("no value supplied for %2"));
    }

    #[rstest]
    fn unknown_language_is_an_error() {
        let args = resolve_args(Vec::new(), "de_DE", "Ready", &[]);

        let error = resolve(&args, &mut Vec::new(), &mut Vec::new())
            .expect_err("de_DE was never loaded");

        assert!(matches!(error, CheckError::UnknownLanguage(_)));
    }
}
