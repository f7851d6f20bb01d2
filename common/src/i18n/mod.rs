//! Runtime message catalogs for the desktop application.
//!
//! Catalogs are parsed from Qt Linguist `.ts` documents, validated as they
//! load, and registered with a [`Translator`]. The translator resolves a
//! `(context, source_text)` pair plus positional arguments to displayable
//! text in the active language, falling back to the source text whenever a
//! translation is missing or empty. Switching languages is a single atomic
//! pointer swap, so concurrent readers never observe a mixed state.
//!
//! See [`global::tr`] for resolving through the process-wide translator.

mod catalog;
mod diagnostics;
pub mod global;
mod loader;
mod locales;
pub mod placeholder;
mod selection;
pub mod testing;
mod translator;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, EntryStatus};
pub use diagnostics::{LoadDiagnostic, Severity};
pub use loader::{CatalogLoader, CatalogParseError, LoadedCatalog, LoaderOptions};
pub use locales::{FALLBACK_LANGUAGE, FALLBACK_LOCALE, LanguageId, LanguageIdError};
pub use selection::{
    LANGUAGE_ENV, LanguageSelection, LanguageSource, negotiate, normalise_language,
    resolve_language,
};
pub use translator::{
    FallbackReason, LoadFailure, LoadReport, LoadSummary, Origin, Resolution, Snapshot,
    Translator, UnknownLanguageError,
};

#[cfg(test)]
mod tests;
