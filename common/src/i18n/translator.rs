//! Catalog registry, active-language state, and message resolution.
//!
//! The [`Translator`] owns every registered [`Catalog`] and points at the
//! active one. Readers load the whole state through a single atomic pointer,
//! so a resolution never sees one language's catalog paired with another's
//! identity. Writers (registration, reload, language switches) are
//! serialised behind a mutex and publish a fresh state in one store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use log::{debug, info, warn};
use thiserror::Error;

use super::catalog::Catalog;
use super::diagnostics::LoadDiagnostic;
use super::loader::{CatalogLoader, CatalogParseError};
use super::placeholder;
use super::{FALLBACK_LANGUAGE, LanguageId};

/// Error returned when switching to a language without a catalog.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no catalog registered for language `{requested}`; `{active}` remains active")]
pub struct UnknownLanguageError {
    requested: String,
    active: LanguageId,
}

impl UnknownLanguageError {
    /// The language the caller asked for, as supplied.
    #[must_use]
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// The language still in effect.
    #[must_use]
    pub const fn active(&self) -> &LanguageId {
        &self.active
    }
}

/// Why a resolution fell back to the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The active catalog has no entry for the key.
    Missing,
    /// The entry exists but carries no translation.
    Untranslated,
}

/// Where the template of a [`Resolution`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The active catalog supplied a translation.
    Translated,
    /// The source text was used.
    Fallback(FallbackReason),
}

/// Outcome of resolving one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    text: String,
    language: LanguageId,
    origin: Origin,
    missing_arguments: Vec<usize>,
}

impl Resolution {
    /// The rendered, displayable text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language that was active for this resolution.
    #[must_use]
    pub const fn language(&self) -> &LanguageId {
        &self.language
    }

    /// Whether a translation or the source text was rendered.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Placeholder indices left verbatim because no argument was supplied.
    #[must_use]
    pub fn missing_arguments(&self) -> &[usize] {
        &self.missing_arguments
    }

    /// Consume the resolution, yielding the text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Outcome of registering one parsed document.
#[derive(Clone, Debug)]
pub struct LoadReport {
    /// Language of the registered catalog.
    pub language: LanguageId,
    /// Number of indexed entries.
    pub entries: usize,
    /// Whether an existing catalog for the language was replaced.
    pub replaced: bool,
    /// Non-fatal findings raised while building the catalog.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    /// Number of warning-level diagnostics.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_warning())
            .count()
    }
}

/// A document that failed to parse.
#[derive(Clone, Debug)]
pub struct LoadFailure {
    /// Caller-supplied label for the document, e.g. its file name.
    pub origin: String,
    /// The parse failure.
    pub error: CatalogParseError,
}

/// Outcome of [`Translator::load_documents`].
#[derive(Clone, Debug, Default)]
pub struct LoadSummary {
    /// One report per registered document, in input order.
    pub reports: Vec<LoadReport>,
    /// Documents that could not be parsed.
    pub failures: Vec<LoadFailure>,
}

impl LoadSummary {
    /// Languages registered by this load, in input order.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageId> {
        self.reports.iter().map(|report| &report.language).collect()
    }

    /// Whether every document parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
struct State {
    catalogs: HashMap<LanguageId, Arc<Catalog>>,
    active: Arc<Catalog>,
}

/// Consistent view of the active catalog.
///
/// Every message resolved through one snapshot uses the same language, even
/// if the translator switches languages meanwhile.
#[derive(Clone, Debug)]
pub struct Snapshot {
    catalog: Arc<Catalog>,
}

impl Snapshot {
    /// Language of the captured catalog.
    #[must_use]
    pub fn language(&self) -> &LanguageId {
        self.catalog.language()
    }

    /// The captured catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a message, returning the rendered text.
    #[must_use]
    pub fn resolve(&self, context: &str, source_text: &str, args: &[&dyn fmt::Display]) -> String {
        self.lookup(context, source_text, args).into_text()
    }

    /// Resolve a message, returning the text with provenance.
    #[must_use]
    pub fn lookup(
        &self,
        context: &str,
        source_text: &str,
        args: &[&dyn fmt::Display],
    ) -> Resolution {
        resolve_in(&self.catalog, context, source_text, args)
    }
}

fn resolve_in(
    catalog: &Catalog,
    context: &str,
    source_text: &str,
    args: &[&dyn fmt::Display],
) -> Resolution {
    let (template, origin) = match catalog.get(context, source_text) {
        Some(entry) if entry.is_translated() => (entry.translated_text(), Origin::Translated),
        Some(_) => (
            source_text,
            Origin::Fallback(FallbackReason::Untranslated),
        ),
        None => (source_text, Origin::Fallback(FallbackReason::Missing)),
    };

    let (text, missing_arguments) = placeholder::substitute(template, args).into_parts();
    if !missing_arguments.is_empty() {
        warn!(
            target: "tslocale::resolve",
            "`{source_text}` in context `{context}` received {} argument(s) but references {:?}",
            args.len(),
            missing_arguments,
        );
    }

    Resolution {
        text,
        language: catalog.language().clone(),
        origin,
        missing_arguments,
    }
}

/// Registry of catalogs with an atomically switchable active language.
///
/// ```
/// use tslocale_common::i18n::{Catalog, CatalogEntry, Translator};
///
/// let translator = Translator::default();
/// let mut builder = Catalog::builder("de_DE".parse().unwrap());
/// builder.insert(CatalogEntry::new("", "Set folder to %1", "Ordner auf %1 gesetzt"));
/// translator.register(builder.build().0);
///
/// assert_eq!(
///     translator.resolve("", "Set folder to %1", &[&"C:\\data"]),
///     "Set folder to C:\\data"
/// );
///
/// translator.set_active_language("de_DE").unwrap();
/// assert_eq!(
///     translator.resolve("", "Set folder to %1", &[&"C:\\data"]),
///     "Ordner auf C:\\data gesetzt"
/// );
/// ```
#[derive(Debug)]
pub struct Translator {
    state: ArcSwap<State>,
    writer: Mutex<()>,
    fallback: LanguageId,
    loader: CatalogLoader,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(FALLBACK_LANGUAGE.clone())
    }
}

impl Translator {
    /// Create a translator whose identity catalog is registered under
    /// `fallback`. The fallback language starts out active.
    #[must_use]
    pub fn new(fallback: LanguageId) -> Self {
        Self::with_loader(fallback, CatalogLoader::default())
    }

    /// Create a translator that parses documents with `loader`.
    #[must_use]
    pub fn with_loader(fallback: LanguageId, loader: CatalogLoader) -> Self {
        let identity = Arc::new(Catalog::identity(fallback.clone()));
        let catalogs = HashMap::from([(fallback.clone(), Arc::clone(&identity))]);

        Self {
            state: ArcSwap::from_pointee(State {
                catalogs,
                active: identity,
            }),
            writer: Mutex::new(()),
            fallback,
            loader,
        }
    }

    /// Language of the identity catalog.
    #[must_use]
    pub const fn fallback_language(&self) -> &LanguageId {
        &self.fallback
    }

    /// Language currently in effect.
    #[must_use]
    pub fn active_language(&self) -> LanguageId {
        self.state.load().active.language().clone()
    }

    /// Registered languages, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<LanguageId> {
        let mut languages: Vec<LanguageId> = self.state.load().catalogs.keys().cloned().collect();
        languages.sort_unstable();
        languages
    }

    /// Whether a catalog is registered for `language`.
    #[must_use]
    pub fn is_registered(&self, language: &LanguageId) -> bool {
        self.state.load().catalogs.contains_key(language)
    }

    /// Return the catalog registered for `language`.
    #[must_use]
    pub fn catalog(&self, language: &LanguageId) -> Option<Arc<Catalog>> {
        self.state.load().catalogs.get(language).cloned()
    }

    /// Register `catalog`, replacing any catalog for the same language.
    ///
    /// When the replaced catalog is active, the active pointer moves to the
    /// new catalog in the same atomic update. Returns the replaced catalog.
    pub fn register(&self, catalog: Catalog) -> Option<Arc<Catalog>> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.state.load_full();

        let language = catalog.language().clone();
        let catalog = Arc::new(catalog);
        let mut catalogs = current.catalogs.clone();
        let replaced = catalogs.insert(language.clone(), Arc::clone(&catalog));

        let active = if current.active.language() == &language {
            Arc::clone(&catalog)
        } else {
            Arc::clone(&current.active)
        };
        self.state.store(Arc::new(State { catalogs, active }));

        debug!(
            target: "tslocale::translator",
            "registered {} entries for {language}{}",
            catalog.len(),
            if replaced.is_some() { " (reloaded)" } else { "" },
        );
        replaced
    }

    /// Parse `text` and register the resulting catalog.
    ///
    /// This is also the reload path: a catalog already registered for the
    /// document's language is replaced. On a parse failure nothing changes.
    pub fn load_document(&self, text: &str) -> Result<LoadReport, CatalogParseError> {
        let loaded = self.loader.parse(text)?;
        Ok(self.register_loaded(loaded.catalog, loaded.diagnostics))
    }

    /// Parse raw bytes and register the resulting catalog.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<LoadReport, CatalogParseError> {
        let loaded = self.loader.parse_bytes(bytes)?;
        Ok(self.register_loaded(loaded.catalog, loaded.diagnostics))
    }

    /// Load several documents. A failure affects only its own document.
    pub fn load_documents<'a, I>(&self, documents: I) -> LoadSummary
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut summary = LoadSummary::default();
        for (origin, text) in documents {
            match self.load_document(text) {
                Ok(report) => summary.reports.push(report),
                Err(error) => {
                    warn!(
                        target: "tslocale::loader",
                        "skipping catalog `{origin}`: {error}",
                    );
                    summary.failures.push(LoadFailure {
                        origin: origin.to_owned(),
                        error,
                    });
                }
            }
        }
        summary
    }

    fn register_loaded(&self, catalog: Catalog, diagnostics: Vec<LoadDiagnostic>) -> LoadReport {
        let language = catalog.language().clone();
        let entries = catalog.len();
        for diagnostic in &diagnostics {
            diagnostic.log(&language);
        }
        let replaced = self.register(catalog).is_some();

        LoadReport {
            language,
            entries,
            replaced,
            diagnostics,
        }
    }

    /// Make `language` the active language.
    ///
    /// Fails without side effects when `language` is not a registered tag;
    /// the previous language stays active.
    pub fn set_active_language(&self, language: &str) -> Result<LanguageId, UnknownLanguageError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.state.load_full();

        let found = language
            .parse::<LanguageId>()
            .ok()
            .and_then(|id| current.catalogs.get(&id).cloned());
        let Some(catalog) = found else {
            warn!(
                target: "tslocale::translator",
                "cannot switch to `{language}`: no catalog registered; keeping {}",
                current.active.language(),
            );
            return Err(UnknownLanguageError {
                requested: language.to_owned(),
                active: current.active.language().clone(),
            });
        };

        let selected = catalog.language().clone();
        if Arc::ptr_eq(&catalog, &current.active) {
            return Ok(selected);
        }

        self.state.store(Arc::new(State {
            catalogs: current.catalogs.clone(),
            active: catalog,
        }));
        info!(
            target: "tslocale::translator",
            "switched active language from {} to {selected}",
            current.active.language(),
        );
        Ok(selected)
    }

    /// Capture the active catalog for a batch of consistent resolutions.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            catalog: Arc::clone(&self.state.load().active),
        }
    }

    /// Resolve a message in the active language, returning the rendered
    /// text. Never fails: missing translations render the source text.
    #[must_use]
    pub fn resolve(&self, context: &str, source_text: &str, args: &[&dyn fmt::Display]) -> String {
        self.lookup(context, source_text, args).into_text()
    }

    /// Resolve a message, returning the text with provenance.
    #[must_use]
    pub fn lookup(
        &self,
        context: &str,
        source_text: &str,
        args: &[&dyn fmt::Display],
    ) -> Resolution {
        let state = self.state.load();
        resolve_in(&state.active, context, source_text, args)
    }
}
