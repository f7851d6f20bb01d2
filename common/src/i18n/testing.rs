//! Helpers for writing catalog documents in tests.
//!
//! Shared by the engine's own tests and by downstream crates that need
//! realistic `.ts` input without shipping fixture files.

/// Escape `text` for use inside an XML element.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Builder for `.ts` documents.
///
/// ```
/// use tslocale_common::i18n::CatalogLoader;
/// use tslocale_common::i18n::testing::TsDocument;
///
/// let document = TsDocument::new("de_DE")
///     .context("QObject")
///     .message("&Edit", "&Bearbeiten")
///     .unfinished("Status")
///     .render();
///
/// let loaded = CatalogLoader::default().parse(&document).unwrap();
/// assert_eq!(loaded.catalog.translation("QObject", "&Edit"), Some("&Bearbeiten"));
/// assert_eq!(loaded.catalog.translation("QObject", "Status"), None);
/// ```
#[derive(Clone, Debug)]
pub struct TsDocument {
    language: String,
    contexts: Vec<(String, Vec<String>)>,
}

impl TsDocument {
    /// Start a document declaring `language`.
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_owned(),
            contexts: Vec::new(),
        }
    }

    /// Open a new context; following messages belong to it.
    #[must_use]
    pub fn context(mut self, name: &str) -> Self {
        self.contexts.push((name.to_owned(), Vec::new()));
        self
    }

    fn push(mut self, message: String) -> Self {
        if self.contexts.is_empty() {
            self.contexts.push((String::new(), Vec::new()));
        }
        if let Some((_, messages)) = self.contexts.last_mut() {
            messages.push(message);
        }
        self
    }

    /// Add a finished message.
    #[must_use]
    pub fn message(self, source: &str, translation: &str) -> Self {
        let message = format!(
            "<message><source>{}</source><translation>{}</translation></message>",
            escape_xml(source),
            escape_xml(translation),
        );
        self.push(message)
    }

    /// Add a message awaiting translation.
    #[must_use]
    pub fn unfinished(self, source: &str) -> Self {
        let message = format!(
            "<message><source>{}</source><translation type=\"unfinished\"></translation></message>",
            escape_xml(source),
        );
        self.push(message)
    }

    /// Add several finished messages.
    #[must_use]
    pub fn messages<'a>(self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        pairs
            .into_iter()
            .fold(self, |document, (source, translation)| {
                document.message(source, translation)
            })
    }

    /// Render the document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n\
             <TS version=\"2.1\" language=\"{}\">\n",
            escape_xml(&self.language),
        );
        for (name, messages) in &self.contexts {
            rendered.push_str("<context>\n    <name>");
            rendered.push_str(&escape_xml(name));
            rendered.push_str("</name>\n");
            for message in messages {
                rendered.push_str("    ");
                rendered.push_str(message);
                rendered.push('\n');
            }
            rendered.push_str("</context>\n");
        }
        rendered.push_str("</TS>\n");
        rendered
    }
}
