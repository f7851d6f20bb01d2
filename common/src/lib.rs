//! Message-catalog resolution engine: language identifiers, placeholder
//! substitution, `.ts` catalog loading, and the translator that serves
//! localized strings to UI and worker threads.

pub mod i18n;

pub use i18n::{
    Catalog, CatalogBuilder, CatalogEntry, CatalogLoader, CatalogParseError, FALLBACK_LOCALE,
    LanguageId, LanguageSelection, LanguageSource, LoadDiagnostic, LoadReport, LoadSummary,
    LoaderOptions, Origin, Resolution, Translator, UnknownLanguageError, resolve_language,
};
