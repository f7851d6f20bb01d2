//! In-memory catalogs and their load-time validation.
//!
//! A [`Catalog`] maps `(context, source_text)` to a [`CatalogEntry`] for one
//! language. Keys match exactly: no trimming, case folding, or
//! normalisation. Catalogs are immutable once built; replacing one means
//! building a new catalog and registering it.

use std::collections::HashMap;

use super::diagnostics::LoadDiagnostic;
use super::{LanguageId, placeholder};

/// Translation state recorded in the catalog document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryStatus {
    /// A reviewed translation.
    #[default]
    Finished,
    /// A draft translation.
    Unfinished,
    /// A translation for a source string that no longer exists.
    Obsolete,
}

/// One `(context, source_text) -> translated_text` mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    context: String,
    source_text: String,
    translated_text: String,
    status: EntryStatus,
}

impl CatalogEntry {
    /// Construct a finished entry.
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            status: EntryStatus::Finished,
        }
    }

    /// Replace the entry status.
    #[must_use]
    pub const fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Context the entry belongs to.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Canonical source string.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Translation template; empty when untranslated.
    #[must_use]
    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    /// Translation state.
    #[must_use]
    pub const fn status(&self) -> EntryStatus {
        self.status
    }

    /// Whether the entry carries a usable translation.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        !self.translated_text.is_empty()
    }
}

/// All translations for one language.
#[derive(Clone, Debug)]
pub struct Catalog {
    language: LanguageId,
    source_language: Option<LanguageId>,
    contexts: HashMap<String, HashMap<String, CatalogEntry>>,
    len: usize,
}

impl Catalog {
    /// An empty catalog: every lookup falls back to the source text.
    #[must_use]
    pub fn identity(language: LanguageId) -> Self {
        Self {
            language,
            source_language: None,
            contexts: HashMap::new(),
            len: 0,
        }
    }

    /// Start building a catalog for `language`.
    #[must_use]
    pub fn builder(language: LanguageId) -> CatalogBuilder {
        CatalogBuilder::new(language)
    }

    /// Language the catalog translates into.
    #[must_use]
    pub const fn language(&self) -> &LanguageId {
        &self.language
    }

    /// Language of the source strings, when the document declared one.
    #[must_use]
    pub const fn source_language(&self) -> Option<&LanguageId> {
        self.source_language.as_ref()
    }

    /// Find the entry for `(context, source_text)`.
    #[must_use]
    pub fn get(&self, context: &str, source_text: &str) -> Option<&CatalogEntry> {
        self.contexts.get(context)?.get(source_text)
    }

    /// Return the translation template for `(context, source_text)` when the
    /// entry exists and is translated.
    #[must_use]
    pub fn translation(&self, context: &str, source_text: &str) -> Option<&str> {
        self.get(context, source_text)
            .filter(|entry| entry.is_translated())
            .map(CatalogEntry::translated_text)
    }

    /// Number of indexed entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of indexed entries carrying a translation.
    #[must_use]
    pub fn translated_len(&self) -> usize {
        self.entries().filter(|entry| entry.is_translated()).count()
    }

    /// Iterate over every indexed entry in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.contexts.values().flat_map(HashMap::values)
    }
}

/// Accumulates entries for a [`Catalog`], validating each as it arrives.
///
/// ```
/// use tslocale_common::i18n::{Catalog, CatalogEntry, LanguageId};
///
/// let language: LanguageId = "de_DE".parse().unwrap();
/// let mut builder = Catalog::builder(language);
/// builder.insert(CatalogEntry::new("", "Ready", "Bereit"));
/// builder.insert(CatalogEntry::new("", "Ready", "Fertig"));
/// let (catalog, diagnostics) = builder.build();
///
/// assert_eq!(catalog.translation("", "Ready"), Some("Bereit"));
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug)]
pub struct CatalogBuilder {
    catalog: Catalog,
    diagnostics: Vec<LoadDiagnostic>,
}

impl CatalogBuilder {
    /// Start an empty builder for `language`.
    #[must_use]
    pub fn new(language: LanguageId) -> Self {
        Self {
            catalog: Catalog::identity(language),
            diagnostics: Vec::new(),
        }
    }

    /// Record the language of the source strings.
    #[must_use]
    pub fn source_language(mut self, language: Option<LanguageId>) -> Self {
        self.catalog.source_language = language;
        self
    }

    /// Add an entry.
    ///
    /// Obsolete entries are reported and skipped. Duplicate keys keep the
    /// first entry.
    pub fn insert(&mut self, entry: CatalogEntry) {
        if entry.status == EntryStatus::Obsolete {
            self.diagnostics.push(LoadDiagnostic::Obsolete {
                context: entry.context,
                source_text: entry.source_text,
            });
            return;
        }

        let scope = self.catalog.contexts.entry(entry.context.clone()).or_default();
        if scope.contains_key(&entry.source_text) {
            self.diagnostics.push(LoadDiagnostic::DuplicateKey {
                context: entry.context,
                source_text: entry.source_text,
                ignored_translation: entry.translated_text,
            });
            return;
        }

        self.diagnostics.extend(validate(&entry));
        scope.insert(entry.source_text.clone(), entry);
        self.catalog.len += 1;
    }

    /// Add several finished entries in the given context.
    pub fn extend<'a>(
        &mut self,
        context: &str,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        for (source_text, translated_text) in pairs {
            self.insert(CatalogEntry::new(context, source_text, translated_text));
        }
    }

    /// Diagnostics gathered so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    /// Finish the catalog, returning it with every diagnostic raised.
    #[must_use]
    pub fn build(self) -> (Catalog, Vec<LoadDiagnostic>) {
        (self.catalog, self.diagnostics)
    }
}

fn validate(entry: &CatalogEntry) -> Vec<LoadDiagnostic> {
    if !entry.is_translated() {
        return vec![LoadDiagnostic::Untranslated {
            context: entry.context.clone(),
            source_text: entry.source_text.clone(),
        }];
    }

    let expected = placeholder::indices(&entry.source_text);
    let found = placeholder::indices(&entry.translated_text);
    let mut diagnostics = Vec::new();

    let extra: Vec<usize> = found.difference(&expected).copied().collect();
    if !extra.is_empty() {
        diagnostics.push(LoadDiagnostic::PlaceholderMismatch {
            context: entry.context.clone(),
            source_text: entry.source_text.clone(),
            indices: extra,
        });
    }

    let dropped: Vec<usize> = expected.difference(&found).copied().collect();
    if !dropped.is_empty() {
        diagnostics.push(LoadDiagnostic::PlaceholderDropped {
            context: entry.context.clone(),
            source_text: entry.source_text.clone(),
            indices: dropped,
        });
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn german() -> LanguageId {
        "de_DE".parse().expect("valid tag")
    }

    #[rstest]
    fn keys_match_exactly(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("QObject", "Ready", "Bereit"));
        let (catalog, _) = builder.build();

        assert_eq!(catalog.translation("QObject", "Ready"), Some("Bereit"));
        assert_eq!(catalog.translation("QObject", "ready"), None);
        assert_eq!(catalog.translation("QObject", "Ready "), None);
        assert_eq!(catalog.translation("", "Ready"), None);
    }

    #[rstest]
    fn first_duplicate_wins(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("", "Close", "Schließen"));
        builder.insert(CatalogEntry::new("", "Close", "Zumachen"));
        let (catalog, diagnostics) = builder.build();

        assert_eq!(catalog.translation("", "Close"), Some("Schließen"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            diagnostics,
            [LoadDiagnostic::DuplicateKey {
                context: String::new(),
                source_text: String::from("Close"),
                ignored_translation: String::from("Zumachen"),
            }]
        );
    }

    #[rstest]
    fn same_source_in_other_context_is_not_duplicate(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("Menu", "File", "Datei"));
        builder.insert(CatalogEntry::new("Table", "File", "Datei (Spalte)"));
        let (catalog, diagnostics) = builder.build();

        assert_eq!(catalog.len(), 2);
        assert!(diagnostics.is_empty());
        assert_eq!(catalog.translation("Table", "File"), Some("Datei (Spalte)"));
    }

    #[rstest]
    fn flags_placeholder_mismatch_but_keeps_entry(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("", "Loaded folder %1", "Ordner %1 aus %2"));
        let (catalog, diagnostics) = builder.build();

        assert_eq!(
            catalog.translation("", "Loaded folder %1"),
            Some("Ordner %1 aus %2")
        );
        assert!(matches!(
            diagnostics.as_slice(),
            [LoadDiagnostic::PlaceholderMismatch { indices, .. }] if indices == &[2]
        ));
    }

    #[rstest]
    fn flags_dropped_placeholders(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("", "Download error: %1", "Downloadfehler"));
        let (_, diagnostics) = builder.build();

        assert!(matches!(
            diagnostics.as_slice(),
            [LoadDiagnostic::PlaceholderDropped { indices, .. }] if indices == &[1]
        ));
    }

    #[rstest]
    fn untranslated_entries_are_indexed_without_translation(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("", "Status", "").with_status(EntryStatus::Unfinished));
        let (catalog, diagnostics) = builder.build();

        assert!(catalog.get("", "Status").is_some());
        assert_eq!(catalog.translation("", "Status"), None);
        assert_eq!(catalog.translated_len(), 0);
        assert!(matches!(
            diagnostics.as_slice(),
            [LoadDiagnostic::Untranslated { .. }]
        ));
    }

    #[rstest]
    fn obsolete_entries_are_skipped(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.insert(CatalogEntry::new("", "Old", "Alt").with_status(EntryStatus::Obsolete));
        let (catalog, diagnostics) = builder.build();

        assert!(catalog.is_empty());
        assert!(catalog.get("", "Old").is_none());
        assert!(matches!(diagnostics.as_slice(), [LoadDiagnostic::Obsolete { .. }]));
    }

    #[rstest]
    fn extend_adds_pairs_in_context(german: LanguageId) {
        let mut builder = Catalog::builder(german);
        builder.extend("QObject", [("Move", "Verschieben"), ("Skipped", "Übersprungen")]);
        let (catalog, _) = builder.build();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries().count(), 2);
        assert_eq!(catalog.translation("QObject", "Skipped"), Some("Übersprungen"));
    }
}
