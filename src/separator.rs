//! Separator patterns for splitting text into tokens
//!
//! A separator is a regular expression. Splitting follows the usual
//! "split and drop trailing empties" rules:
//! - if the pattern never matches, the whole input is the only token
//! - trailing empty tokens are removed
//! - a zero-width match at the very start does not produce a leading empty token
//! - an empty match directly after a non-empty one still separates, so `x*`
//!   splits `"axb"` into `["a", "", "b"]`
//!
//! Whitespace trimming uses [`trim_token`], which strips control characters
//! and spaces (everything up to U+0020) but leaves other Unicode whitespace.

use regex::Regex;

use crate::error::TextFileError;

/// Pattern used when no separator is given: a literal period
pub const DEFAULT_SEPARATOR: &str = r"\.";

/// Compiled separator pattern
#[derive(Debug, Clone)]
pub struct Separator {
    regex: Regex,
}

impl Separator {
    /// Compile a separator from a regular expression
    pub fn new(pattern: &str) -> Result<Self, TextFileError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| TextFileError::InvalidSeparator {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Separator matching `text` literally
    pub fn literal(text: &str) -> Self {
        Self {
            regex: Regex::new(&regex::escape(text)).expect("escaped literal is a valid regex"),
        }
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Split `text` into tokens
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut tokens = Vec::new();
        let mut index = 0;
        let mut search = 0;

        while search <= text.len() {
            let Some(m) = self.regex.find_at(text, search) else {
                break;
            };

            // Empty matches advance one char; non-empty ones resume at their end,
            // where an empty match may still be found.
            search = if m.is_empty() {
                m.end() + text[m.end()..].chars().next().map_or(1, char::len_utf8)
            } else {
                m.end()
            };

            if index == 0 && m.start() == 0 && m.is_empty() {
                continue;
            }

            tokens.push(&text[index..m.start()]);
            index = m.end();
        }

        if index == 0 {
            return vec![text];
        }
        tokens.push(&text[index..]);

        while tokens.last() == Some(&"") {
            tokens.pop();
        }

        tokens
    }
}

/// Strip leading and trailing characters up to and including U+0020
pub fn trim_token(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

impl Default for Separator {
    fn default() -> Self {
        Self::literal(".")
    }
}
