//! Structured findings produced while building a catalog.
//!
//! None of these stop a catalog from loading. Warnings point at entries that
//! will render incorrectly; notes record coverage gaps.

use std::fmt;

use log::{debug, warn};

use super::LanguageId;

/// How much attention a [`LoadDiagnostic`] deserves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational; the entry behaves as documented.
    Note,
    /// The entry is usable but likely wrong.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => formatter.write_str("note"),
            Self::Warning => formatter.write_str("warning"),
        }
    }
}

/// Non-fatal finding attached to a single catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// A second entry reused an existing `(context, source)` key. The first
    /// entry stays in effect.
    DuplicateKey {
        /// Context of both entries.
        context: String,
        /// Source text of both entries.
        source_text: String,
        /// Translation carried by the discarded entry.
        ignored_translation: String,
    },
    /// The translation references placeholders the source string lacks.
    PlaceholderMismatch {
        /// Context of the entry.
        context: String,
        /// Source text of the entry.
        source_text: String,
        /// Indices present only in the translation.
        indices: Vec<usize>,
    },
    /// The translation omits placeholders the source string uses.
    PlaceholderDropped {
        /// Context of the entry.
        context: String,
        /// Source text of the entry.
        source_text: String,
        /// Indices present only in the source string.
        indices: Vec<usize>,
    },
    /// The entry has no translation and resolves to its source text.
    Untranslated {
        /// Context of the entry.
        context: String,
        /// Source text of the entry.
        source_text: String,
    },
    /// The entry is marked obsolete or vanished and was not indexed.
    Obsolete {
        /// Context of the entry.
        context: String,
        /// Source text of the entry.
        source_text: String,
    },
}

impl LoadDiagnostic {
    /// Severity of the finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::DuplicateKey { .. }
            | Self::PlaceholderMismatch { .. }
            | Self::PlaceholderDropped { .. } => Severity::Warning,
            Self::Untranslated { .. } | Self::Obsolete { .. } => Severity::Note,
        }
    }

    /// Whether the finding is a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.severity(), Severity::Warning)
    }

    /// Source text of the entry the finding refers to.
    #[must_use]
    pub fn source_text(&self) -> &str {
        match self {
            Self::DuplicateKey { source_text, .. }
            | Self::PlaceholderMismatch { source_text, .. }
            | Self::PlaceholderDropped { source_text, .. }
            | Self::Untranslated { source_text, .. }
            | Self::Obsolete { source_text, .. } => source_text,
        }
    }

    /// Context of the entry the finding refers to.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::DuplicateKey { context, .. }
            | Self::PlaceholderMismatch { context, .. }
            | Self::PlaceholderDropped { context, .. }
            | Self::Untranslated { context, .. }
            | Self::Obsolete { context, .. } => context,
        }
    }

    /// Log the finding against `language`: warnings at `warn`, notes at
    /// `debug`.
    pub fn log(&self, language: &LanguageId) {
        match self.severity() {
            Severity::Warning => warn!(target: "tslocale::loader", "{language}: {self}"),
            Severity::Note => debug!(target: "tslocale::loader", "{language}: {self}"),
        }
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|index| format!("%{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey {
                context,
                source_text,
                ignored_translation,
            } => write!(
                formatter,
                "duplicate entry for `{source_text}` in context `{context}`; \
                 keeping the first translation and ignoring `{ignored_translation}`",
            ),
            Self::PlaceholderMismatch {
                context,
                source_text,
                indices,
            } => write!(
                formatter,
                "translation of `{source_text}` in context `{context}` references {} \
                 absent from the source text",
                join_indices(indices),
            ),
            Self::PlaceholderDropped {
                context,
                source_text,
                indices,
            } => write!(
                formatter,
                "translation of `{source_text}` in context `{context}` omits {}",
                join_indices(indices),
            ),
            Self::Untranslated {
                context,
                source_text,
            } => write!(
                formatter,
                "`{source_text}` in context `{context}` is untranslated",
            ),
            Self::Obsolete {
                context,
                source_text,
            } => write!(
                formatter,
                "`{source_text}` in context `{context}` is obsolete and was skipped",
            ),
        }
    }
}
