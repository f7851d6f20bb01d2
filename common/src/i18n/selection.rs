use std::fmt;

use log::{debug, warn};

use super::LanguageId;

/// Environment variable consulted for the initial language.
pub const LANGUAGE_ENV: &str = "TSLOCALE_LANGUAGE";

/// Source for a resolved language.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LanguageSource {
    /// Language supplied explicitly by the caller.
    ExplicitArgument,
    /// Language sourced from the `TSLOCALE_LANGUAGE` environment variable.
    EnvironmentVariable,
    /// Language taken from the configuration file.
    Configuration,
    /// The translator's fallback language.
    Fallback,
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitArgument => formatter.write_str("explicit language override"),
            Self::EnvironmentVariable => formatter.write_str(LANGUAGE_ENV),
            Self::Configuration => formatter.write_str("configuration language"),
            Self::Fallback => formatter.write_str("fallback language"),
        }
    }
}

/// Outcome of initial language selection including its provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSelection {
    language: LanguageId,
    source: LanguageSource,
    requested: Option<String>,
}

impl LanguageSelection {
    const fn new(language: LanguageId, source: LanguageSource, requested: Option<String>) -> Self {
        Self {
            language,
            source,
            requested,
        }
    }

    /// Returns the selected language.
    #[must_use]
    pub const fn language(&self) -> &LanguageId {
        &self.language
    }

    /// Returns the source that supplied the language.
    #[must_use]
    pub const fn source(&self) -> LanguageSource {
        self.source
    }

    /// Returns the raw value requested by the winning source, if any.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Whether the fallback language was used.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == LanguageSource::Fallback
    }

    /// Emit a debug log summarising the selection.
    pub fn log_outcome(&self) {
        debug!(
            target: "tslocale::selection",
            "resolved {} to `{}`",
            self.source,
            self.language,
        );
    }
}

/// Match `candidate` against the available languages.
///
/// An exact tag wins. Otherwise a candidate naming only a primary language
/// (`fr`) matches the single available language with that primary subtag.
#[must_use]
pub fn negotiate(candidate: &LanguageId, available: &[LanguageId]) -> Option<LanguageId> {
    if available.contains(candidate) {
        return Some(candidate.clone());
    }

    if candidate.primary() != candidate.as_str() {
        return None;
    }

    let mut matches = available
        .iter()
        .filter(|language| language.primary() == candidate.as_str());
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.clone()),
        _ => None,
    }
}

fn try_resolve_candidate(
    source: LanguageSource,
    raw: Option<&str>,
    available: &[LanguageId],
) -> Option<LanguageSelection> {
    let candidate = normalise_language(raw)?;

    let negotiated = LanguageId::from_setting(candidate)
        .ok()
        .and_then(|language| negotiate(&language, available));
    if let Some(language) = negotiated {
        return Some(LanguageSelection::new(
            language,
            source,
            Some(candidate.to_owned()),
        ));
    }

    warn!(
        target: "tslocale::selection",
        "skipping unsupported {source} `{candidate}`",
    );

    None
}

/// Select the initial language from explicit, environment, and configuration
/// values.
///
/// Candidates are considered in this order, skipping unsupported ones:
///
/// 1. The explicit value supplied by the caller.
/// 2. The `TSLOCALE_LANGUAGE` environment variable.
/// 3. The configuration file.
/// 4. `fallback` when no candidate names an available language.
///
/// ```
/// use tslocale_common::i18n::{LanguageId, LanguageSource, resolve_language};
///
/// let available: Vec<LanguageId> = ["de_DE", "en_US", "fr_FR"]
///     .iter()
///     .map(|tag| tag.parse().unwrap())
///     .collect();
/// let fallback: LanguageId = "en_US".parse().unwrap();
///
/// let selection = resolve_language(None, Some(String::from("French")), None, &available, &fallback);
/// assert_eq!(selection.language().as_str(), "fr_FR");
/// assert_eq!(selection.source(), LanguageSource::EnvironmentVariable);
/// ```
#[must_use]
pub fn resolve_language(
    explicit: Option<&str>,
    environment: Option<String>,
    configuration: Option<&str>,
    available: &[LanguageId],
    fallback: &LanguageId,
) -> LanguageSelection {
    let candidates = [
        (LanguageSource::ExplicitArgument, explicit),
        (LanguageSource::EnvironmentVariable, environment.as_deref()),
        (LanguageSource::Configuration, configuration),
    ];

    candidates
        .into_iter()
        .find_map(|(source, raw)| try_resolve_candidate(source, raw, available))
        .unwrap_or_else(|| LanguageSelection::new(fallback.clone(), LanguageSource::Fallback, None))
}

/// Trim whitespace and discard empty language candidates.
#[must_use]
pub fn normalise_language(input: Option<&str>) -> Option<&str> {
    input
        .map(str::trim)
        .and_then(|value| if value.is_empty() { None } else { Some(value) })
}
