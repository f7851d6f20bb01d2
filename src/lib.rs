//! Application-facing entry point for tslocale.
//!
//! Reads `tslocale.toml`, loads every configured `.ts` catalog, selects the
//! initial language, and hands back a ready [`Translator`]. The catalog engine
//! itself lives in `tslocale-common` and is re-exported here.

pub mod bootstrap;
pub mod config;

pub use bootstrap::{
    Bootstrap, BootstrapError, BootstrapReport, UnreadableCatalog, bootstrap, bootstrap_with,
    discover_catalogs,
};
pub use config::{CONFIG_FILE, ConfigError, LocaleConfig};
pub use tslocale_common::i18n;
pub use tslocale_common::i18n::global::tr;
pub use tslocale_common::{
    Catalog, CatalogEntry, LanguageId, LanguageSelection, LanguageSource, Origin, Resolution,
    Translator, UnknownLanguageError,
};
