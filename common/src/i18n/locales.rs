//! Language identifiers and their validation.
//!
//! Catalogs name their language with `xx_YY` tags (`de_DE`, `tr_TR`). Tags are
//! validated with `unic-langid` and stored in canonical underscore form so
//! that `de-de`, `de-DE`, and `de_DE` all address the same catalog.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Tag of the identity catalog used when no translation applies.
pub const FALLBACK_LOCALE: &str = "en_US";

/// [`FALLBACK_LOCALE`] as a [`LanguageId`].
pub static FALLBACK_LANGUAGE: Lazy<LanguageId> =
    Lazy::new(|| LanguageId(String::from(FALLBACK_LOCALE)));

/// English language names accepted by [`LanguageId::from_setting`].
///
/// Settings files written by older releases store the language by name rather
/// than by tag.
static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("english", "en_US"),
        ("french", "fr_FR"),
        ("german", "de_DE"),
        ("spanish", "es_ES"),
        ("italian", "it_IT"),
        ("dutch", "nl_NL"),
        ("turkish", "tr_TR"),
    ])
});

/// Error raised when a language tag cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LanguageIdError {
    /// The tag was empty or contained only whitespace.
    #[error("language tag is empty")]
    Empty,
    /// The tag is not a well-formed locale identifier.
    #[error("`{value}` is not a valid language tag")]
    Malformed {
        /// The rejected input.
        value: String,
    },
}

/// Canonical `xx_YY` language identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(String);

impl LanguageId {
    /// Parse a settings value that may hold either a tag or an English
    /// language name such as `"French"`.
    ///
    /// ```
    /// use tslocale_common::i18n::LanguageId;
    ///
    /// let by_name = LanguageId::from_setting("French").unwrap();
    /// assert_eq!(by_name.as_str(), "fr_FR");
    ///
    /// let by_tag = LanguageId::from_setting("de-de").unwrap();
    /// assert_eq!(by_tag.as_str(), "de_DE");
    /// ```
    pub fn from_setting(value: &str) -> Result<Self, LanguageIdError> {
        let trimmed = value.trim();
        match LANGUAGE_NAMES.get(trimmed.to_lowercase().as_str()) {
            Some(tag) => tag.parse(),
            None => trimmed.parse(),
        }
    }

    /// Return the canonical tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Return the primary language subtag, e.g. `de` for `de_DE`.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.0
            .split_once('_')
            .map_or(self.0.as_str(), |(primary, _)| primary)
    }
}

impl FromStr for LanguageId {
    type Err = LanguageIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LanguageIdError::Empty);
        }

        let hyphenated = trimmed.replace('_', "-");
        let identifier = hyphenated
            .parse::<LanguageIdentifier>()
            .map_err(|_| LanguageIdError::Malformed {
                value: trimmed.to_owned(),
            })?;

        Ok(Self(identifier.to_string().replace('-', "_")))
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
