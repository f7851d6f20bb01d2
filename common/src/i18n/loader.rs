//! Parser for Qt Linguist `.ts` catalog documents.
//!
//! The loader walks the XML event stream once, collecting `context` names
//! and `message` pairs into a [`CatalogBuilder`]. Malformed markup fails the
//! whole document; entry-level problems become [`LoadDiagnostic`]s.

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use super::catalog::{Catalog, CatalogBuilder, CatalogEntry, EntryStatus};
use super::diagnostics::LoadDiagnostic;
use super::{LanguageId, LanguageIdError};

const ROOT: &[u8] = b"TS";

/// Error raised when a catalog document cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogParseError {
    /// The input bytes are not UTF-8.
    #[error("catalog is not valid UTF-8: {reason}")]
    Encoding {
        /// Decoder message.
        reason: String,
    },
    /// The XML itself is malformed.
    #[error("malformed catalog markup at byte {position}: {reason}")]
    Markup {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// Reader message.
        reason: String,
    },
    /// An element attribute is malformed.
    #[error("malformed catalog attribute: {reason}")]
    Attribute {
        /// Reader message.
        reason: String,
    },
    /// The document has no `TS` root element.
    #[error("catalog has no `TS` root element")]
    MissingRoot,
    /// The root element does not declare a language.
    #[error("catalog root does not declare a `language`")]
    MissingLanguage,
    /// The declared language is not a valid tag.
    #[error("catalog declares an invalid language: {source}")]
    InvalidLanguage {
        /// Tag validation failure.
        #[source]
        source: LanguageIdError,
    },
    /// The document ended before every element was closed.
    #[error("catalog ended inside an open `{element}` element")]
    Truncated {
        /// Innermost element left open.
        element: String,
    },
}

/// Parsing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Index translations marked `type="unfinished"`. When disabled such
    /// entries behave as untranslated.
    pub include_unfinished: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            include_unfinished: true,
        }
    }
}

/// A parsed catalog together with its load diagnostics.
#[derive(Clone, Debug)]
pub struct LoadedCatalog {
    /// The catalog, ready for registration.
    pub catalog: Catalog,
    /// Non-fatal findings raised while building it.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Parses `.ts` documents into [`Catalog`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogLoader {
    options: LoaderOptions,
}

impl CatalogLoader {
    /// Construct a loader with `options`.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> LoaderOptions {
        self.options
    }

    /// Parse raw document bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<LoadedCatalog, CatalogParseError> {
        let text = std::str::from_utf8(bytes).map_err(|error| CatalogParseError::Encoding {
            reason: error.to_string(),
        })?;
        self.parse(text)
    }

    /// Parse a document.
    ///
    /// ```
    /// use tslocale_common::i18n::CatalogLoader;
    ///
    /// let document = r#"<TS version="2.1" language="tr_TR"><context><name>QObject</name>
    ///     <message><source>Ready</source><translation>Hazır</translation></message>
    /// </context></TS>"#;
    ///
    /// let loaded = CatalogLoader::default().parse(document).unwrap();
    /// assert_eq!(loaded.catalog.language().as_str(), "tr_TR");
    /// assert_eq!(loaded.catalog.translation("QObject", "Ready"), Some("Hazır"));
    /// ```
    pub fn parse(&self, text: &str) -> Result<LoadedCatalog, CatalogParseError> {
        let mut reader = Reader::from_str(text);
        let mut walker = Walker::new(self.options);

        loop {
            let event = reader
                .read_event()
                .map_err(|error| CatalogParseError::Markup {
                    position: reader.error_position(),
                    reason: error.to_string(),
                })?;

            match event {
                Event::Start(element) => {
                    walker.open(&element, false)?;
                }
                Event::Empty(element) => {
                    walker.open(&element, true)?;
                    walker.close(element.name().as_ref());
                }
                Event::End(element) => walker.close(element.name().as_ref()),
                Event::Text(content) => {
                    let unescaped = content.unescape().map_err(|error| {
                        CatalogParseError::Markup {
                            position: reader.buffer_position(),
                            reason: error.to_string(),
                        }
                    })?;
                    walker.text(&unescaped);
                }
                Event::CData(content) => walker.text(&String::from_utf8_lossy(&content)),
                Event::Eof => break,
                Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_)
                | Event::Comment(_) => {}
            }
        }

        walker.finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    ContextName,
    Source,
    Translation,
    NumerusForm,
}

#[derive(Debug, Default)]
struct PendingMessage {
    source: String,
    translation: String,
    forms: Vec<String>,
    status: EntryStatus,
}

#[derive(Debug)]
struct Walker {
    options: LoaderOptions,
    builder: Option<CatalogBuilder>,
    open: Vec<String>,
    context: String,
    message: Option<PendingMessage>,
    field: Option<Field>,
}

impl Walker {
    const fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            builder: None,
            open: Vec::new(),
            context: String::new(),
            message: None,
            field: None,
        }
    }

    fn open(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<(), CatalogParseError> {
        let name = element.name();
        let tag = name.as_ref();
        if !empty {
            self.open.push(String::from_utf8_lossy(tag).into_owned());
        }

        if self.builder.is_none() {
            if tag != ROOT {
                return Err(CatalogParseError::MissingRoot);
            }
            self.builder = Some(root_builder(element)?);
            return Ok(());
        }

        self.field = match tag {
            b"context" => {
                self.context.clear();
                None
            }
            b"name" if self.message.is_none() => Some(Field::ContextName),
            b"message" => {
                self.message = Some(PendingMessage::default());
                None
            }
            b"source" if self.message.is_some() => Some(Field::Source),
            b"translation" => {
                let status = translation_status(element)?;
                if let Some(message) = self.message.as_mut() {
                    message.status = status;
                }
                Some(Field::Translation)
            }
            b"numerusform" => {
                if let Some(message) = self.message.as_mut() {
                    message.forms.push(String::new());
                }
                Some(Field::NumerusForm)
            }
            _ => None,
        };
        Ok(())
    }

    fn close(&mut self, tag: &[u8]) {
        if self.open.last().is_some_and(|open| open.as_bytes() == tag) {
            self.open.pop();
        }

        match tag {
            b"message" => self.flush_message(),
            b"numerusform" => self.field = Some(Field::Translation),
            _ => self.field = None,
        }
    }

    fn text(&mut self, content: &str) {
        let Some(field) = self.field else {
            return;
        };

        if field == Field::ContextName {
            self.context.push_str(content);
            return;
        }

        let Some(message) = self.message.as_mut() else {
            return;
        };
        match field {
            Field::Source => message.source.push_str(content),
            Field::Translation => message.translation.push_str(content),
            Field::NumerusForm => {
                if let Some(form) = message.forms.last_mut() {
                    form.push_str(content);
                }
            }
            Field::ContextName => {}
        }
    }

    fn flush_message(&mut self) {
        let (Some(message), Some(builder)) = (self.message.take(), self.builder.as_mut()) else {
            return;
        };

        let translation = if message.forms.is_empty() {
            message.translation
        } else {
            message.forms.into_iter().next().unwrap_or_default()
        };
        let translation =
            if message.status == EntryStatus::Unfinished && !self.options.include_unfinished {
                String::new()
            } else {
                translation
            };

        builder.insert(
            CatalogEntry::new(self.context.as_str(), message.source, translation)
                .with_status(message.status),
        );
    }

    fn finish(self) -> Result<LoadedCatalog, CatalogParseError> {
        if let Some(element) = self.open.last() {
            return Err(CatalogParseError::Truncated {
                element: element.clone(),
            });
        }

        let builder = self.builder.ok_or(CatalogParseError::MissingRoot)?;
        let (catalog, diagnostics) = builder.build();
        debug!(
            target: "tslocale::loader",
            "parsed {} entries for {} with {} diagnostics",
            catalog.len(),
            catalog.language(),
            diagnostics.len(),
        );

        Ok(LoadedCatalog {
            catalog,
            diagnostics,
        })
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CatalogParseError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|error| CatalogParseError::Attribute {
            reason: error.to_string(),
        })?;
        if attribute.key.as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|error| CatalogParseError::Attribute {
                    reason: error.to_string(),
                })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn root_builder(element: &BytesStart<'_>) -> Result<CatalogBuilder, CatalogParseError> {
    let declared = attribute(element, b"language")?.ok_or(CatalogParseError::MissingLanguage)?;
    let language = declared
        .parse::<LanguageId>()
        .map_err(|source| CatalogParseError::InvalidLanguage { source })?;

    let source_language = attribute(element, b"sourcelanguage")?
        .and_then(|value| value.parse::<LanguageId>().ok());

    Ok(CatalogBuilder::new(language).source_language(source_language))
}

fn translation_status(element: &BytesStart<'_>) -> Result<EntryStatus, CatalogParseError> {
    let status = match attribute(element, b"type")?.as_deref() {
        Some("unfinished") => EntryStatus::Unfinished,
        Some("obsolete" | "vanished") => EntryStatus::Obsolete,
        _ => EntryStatus::Finished,
    };
    Ok(status)
}
