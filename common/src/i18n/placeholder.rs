//! Positional placeholder parsing and substitution.
//!
//! Templates reference arguments with `%1`, `%2`, ... (multi-digit indices
//! such as `%12` are read greedily). `%%` is an escaped percent sign. A `%`
//! followed by anything other than a digit or another `%`, and `%0`, are
//! plain text, so log strings such as `"(%3%)"` keep their trailing percent.

use std::collections::BTreeSet;
use std::fmt;

/// Single lexical unit of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// A `%%` escape, rendered as a single `%`.
    Percent,
    /// A positional reference to the 1-based argument `index`.
    Placeholder {
        /// 1-based argument index.
        index: usize,
        /// The marker as written, e.g. `%3`.
        raw: &'a str,
    },
}

/// Iterator over the [`Token`]s of a template.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    template: &'a str,
    position: usize,
}

/// Tokenise `template`.
///
/// ```
/// use tslocale_common::i18n::placeholder::{tokens, Token};
///
/// let parsed: Vec<_> = tokens("(%3%)").collect();
/// assert_eq!(
///     parsed,
///     [
///         Token::Literal("("),
///         Token::Placeholder { index: 3, raw: "%3" },
///         Token::Literal("%"),
///         Token::Literal(")"),
///     ]
/// );
/// ```
#[must_use]
pub const fn tokens(template: &str) -> Tokens<'_> {
    Tokens {
        template,
        position: 0,
    }
}

impl<'a> Tokens<'a> {
    fn advance(&mut self, rest: &'a str, length: usize) -> &'a str {
        self.position += length;
        rest.get(..length).unwrap_or(rest)
    }

    fn marker(&mut self, rest: &'a str, after: &'a str) -> Token<'a> {
        if after.starts_with('%') {
            self.position += 2;
            return Token::Percent;
        }

        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Token::Literal(self.advance(rest, 1));
        }

        let raw = self.advance(rest, digits + 1);
        match raw.get(1..).map(str::parse::<usize>) {
            Some(Ok(index)) if index > 0 => Token::Placeholder { index, raw },
            _ => Token::Literal(raw),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.template.get(self.position..)?;
        if rest.is_empty() {
            return None;
        }

        if let Some(after) = rest.strip_prefix('%') {
            return Some(self.marker(rest, after));
        }

        let end = rest.find('%').unwrap_or(rest.len());
        Some(Token::Literal(self.advance(rest, end)))
    }
}

/// Collect the distinct placeholder indices used by `template`.
#[must_use]
pub fn indices(template: &str) -> BTreeSet<usize> {
    tokens(template)
        .filter_map(|token| match token {
            Token::Placeholder { index, .. } => Some(index),
            Token::Literal(_) | Token::Percent => None,
        })
        .collect()
}

/// Result of substituting arguments into a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    text: String,
    missing: Vec<usize>,
}

impl Substitution {
    /// The rendered text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder indices for which no argument was supplied, in order of
    /// first appearance. These placeholders were left in the text verbatim.
    #[must_use]
    pub fn missing(&self) -> &[usize] {
        &self.missing
    }

    /// Consume the substitution, yielding the rendered text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Consume the substitution, yielding the text and missing indices.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<usize>) {
        (self.text, self.missing)
    }
}

/// Render `template`, replacing `%N` with the `N`th argument.
///
/// Argument text is inserted verbatim and never rescanned for markers.
///
/// ```
/// use std::fmt::Display;
/// use tslocale_common::i18n::placeholder::substitute;
///
/// let args: [&dyn Display; 3] = [&"4", &10, &"40"];
/// let rendered = substitute("[VISION] Decoding image batch %1/%2 (%3%)", &args);
/// assert_eq!(rendered.text(), "[VISION] Decoding image batch 4/10 (40%)");
/// assert!(rendered.missing().is_empty());
/// ```
#[must_use]
pub fn substitute(template: &str, args: &[&dyn fmt::Display]) -> Substitution {
    let mut text = String::with_capacity(template.len());
    let mut missing = Vec::new();

    for token in tokens(template) {
        match token {
            Token::Literal(literal) => text.push_str(literal),
            Token::Percent => text.push('%'),
            Token::Placeholder { index, raw } => match args.get(index - 1) {
                Some(value) => text.push_str(&value.to_string()),
                None => {
                    text.push_str(raw);
                    if !missing.contains(&index) {
                        missing.push(index);
                    }
                }
            },
        }
    }

    Substitution { text, missing }
}
