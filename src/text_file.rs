//! Line-oriented reads and appends on plain text files
//!
//! Every operation comes in two forms:
//! - `try_*` returns a [`TextFileError`] describing what went wrong
//! - the plain form never fails: failures are logged and reported as `false`,
//!   an empty value, or one of the sentinel strings in [`crate::error`]
//!
//! Appends rewrite the whole file: the old content is read, the new lines are
//! concatenated, and the result replaces the file. Nothing here is atomic, so
//! two processes appending to the same path at once can lose each other's lines.
//!
//! Files are read as UTF-8 with `\n`, `\r\n` or lone `\r` line endings and
//! written as UTF-8 with `\n`. Diagnostics record paths and sizes, never file
//! content.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::config::{TextFilesConfig, TrimPolicy};
use crate::error::TextFileError;
use crate::separator::{trim_token, Separator};

/// Text file operations with a fixed default separator and trim policy
///
/// Holds no per-file state; one value can serve any number of paths.
#[derive(Debug, Clone, Default)]
pub struct TextFiles {
    separator: Separator,
    trim_policy: TrimPolicy,
}

impl TextFiles {
    /// Build from persisted settings
    pub fn new(config: &TextFilesConfig) -> Result<Self, TextFileError> {
        Ok(Self {
            separator: Separator::new(&config.default_separator)?,
            trim_policy: config.trim_policy,
        })
    }

    pub fn with_trim_policy(mut self, trim_policy: TrimPolicy) -> Self {
        self.trim_policy = trim_policy;
        self
    }

    /// Separator used by [`Self::try_append_delimited_text_default`]
    pub fn default_separator(&self) -> &Separator {
        &self.separator
    }

    pub fn trim_policy(&self) -> TrimPolicy {
        self.trim_policy
    }

    // ========================================================================
    // Appending
    // ========================================================================

    /// Append a single line
    ///
    /// An existing file gets `"\n" + line` after its lines (joined by `\n`),
    /// so the appended line has no trailing newline. A missing file is
    /// created holding `line + "\n"`.
    pub fn try_append_line(&self, path: impl AsRef<Path>, line: &str) -> Result<(), TextFileError> {
        let path = path.as_ref();

        if path.exists() {
            let lines = read_lines(path)?;
            tracing::debug!(path = %path.display(), lines = lines.len(), "appending line");
            let mut data = lines.join("\n");
            data.push('\n');
            data.push_str(line);
            write_file(path, &data)
        } else {
            create_file(path)?;
            tracing::debug!(path = %path.display(), "created file for line");
            write_file(path, &format!("{}\n", line))
        }
    }

    /// Append every line in `lines`, each followed by `\n`
    ///
    /// Existing lines are kept, each terminated by `\n`.
    pub fn try_append_lines<I, S>(&self, path: impl AsRef<Path>, lines: I) -> Result<(), TextFileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let mut data = self.previous_content(path)?;
        for line in lines {
            data.push_str(line.as_ref());
            data.push('\n');
        }
        write_file(path, &data)
    }

    /// Trim `text`, split it by `separator` and append one token per line
    ///
    /// Whether tokens are trimmed depends on the trim policy and on whether
    /// the file had to be created.
    pub fn try_append_delimited_text(
        &self,
        path: impl AsRef<Path>,
        text: &str,
        separator: &Separator,
    ) -> Result<(), TextFileError> {
        let path = path.as_ref();
        let creates = !path.exists();
        let trim = self.trim_policy.trims(creates);

        let mut data = self.previous_content(path)?;
        for token in separator.split(trim_token(text)) {
            data.push_str(if trim { trim_token(token) } else { token });
            data.push('\n');
        }
        tracing::debug!(
            path = %path.display(),
            separator = separator.as_str(),
            trimmed = trim,
            "appending delimited text"
        );
        write_file(path, &data)
    }

    /// [`Self::try_append_delimited_text`] with the default separator
    pub fn try_append_delimited_text_default(
        &self,
        path: impl AsRef<Path>,
        text: &str,
    ) -> Result<(), TextFileError> {
        self.try_append_delimited_text(path, text, &self.separator)
    }

    /// Content to keep ahead of new lines: each existing line plus `\n`.
    /// Creates the file when missing.
    fn previous_content(&self, path: &Path) -> Result<String, TextFileError> {
        if !path.exists() {
            create_file(path)?;
            tracing::debug!(path = %path.display(), "created file");
            return Ok(String::new());
        }

        let lines = read_lines(path)?;
        tracing::debug!(path = %path.display(), lines = lines.len(), "read existing content");
        let mut data = String::new();
        for line in lines {
            data.push_str(&line);
            data.push('\n');
        }
        Ok(data)
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn try_read_first_line(&self, path: impl AsRef<Path>) -> Result<String, TextFileError> {
        self.try_read_line(path, 0)
    }

    /// Read the line at zero-based `index`
    ///
    /// Index 0 of an empty file reads as an empty line. Negative indices
    /// never match a line.
    pub fn try_read_line(&self, path: impl AsRef<Path>, index: isize) -> Result<String, TextFileError> {
        let path = path.as_ref();
        ensure_exists(path)?;

        let mut lines = read_lines(path)?;
        if lines.is_empty() && index == 0 {
            return Ok(String::new());
        }

        usize::try_from(index)
            .ok()
            .filter(|&i| i < lines.len())
            .map(|i| lines.swap_remove(i))
            .ok_or(TextFileError::NoSuchLine { index })
    }

    /// Whole file with lines joined by `\n`, without a trailing newline
    pub fn try_read_all_as_string(&self, path: impl AsRef<Path>) -> Result<String, TextFileError> {
        let path = path.as_ref();
        ensure_exists(path)?;
        Ok(read_lines(path)?.join("\n"))
    }

    pub fn try_read_all_as_lines(&self, path: impl AsRef<Path>) -> Result<Vec<String>, TextFileError> {
        let path = path.as_ref();
        ensure_exists(path)?;
        read_lines(path)
    }

    /// Trim every line, split it by `separator` and flatten the tokens
    pub fn try_read_all_as_tokens(
        &self,
        path: impl AsRef<Path>,
        separator: &Separator,
    ) -> Result<Vec<String>, TextFileError> {
        let path = path.as_ref();
        ensure_exists(path)?;

        Ok(read_lines(path)?
            .iter()
            .flat_map(|line| separator.split(trim_token(line)))
            .map(str::to_string)
            .collect())
    }

    // ========================================================================
    // Never-failing forms
    // ========================================================================

    /// Returns whether the line was written
    pub fn append_line(&self, path: impl AsRef<Path>, line: &str) -> bool {
        let path = path.as_ref();
        succeeded(path, self.try_append_line(path, line))
    }

    /// Returns whether the lines were written
    pub fn append_lines<I, S>(&self, path: impl AsRef<Path>, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        succeeded(path, self.try_append_lines(path, lines))
    }

    /// Returns whether the text was written; an invalid pattern writes nothing
    pub fn append_delimited_text(&self, path: impl AsRef<Path>, text: &str, separator: &str) -> bool {
        let path = path.as_ref();
        let result = Separator::new(separator)
            .and_then(|separator| self.try_append_delimited_text(path, text, &separator));
        succeeded(path, result)
    }

    pub fn append_delimited_text_default(&self, path: impl AsRef<Path>, text: &str) -> bool {
        let path = path.as_ref();
        succeeded(path, self.try_append_delimited_text_default(path, text))
    }

    /// First line, or a sentinel string
    pub fn read_first_line(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        or_sentinel(path, self.try_read_first_line(path))
    }

    /// Line at `index`, or a sentinel string
    pub fn read_line(&self, path: impl AsRef<Path>, index: isize) -> String {
        let path = path.as_ref();
        or_sentinel(path, self.try_read_line(path, index))
    }

    /// Whole file as one string, or a sentinel string
    pub fn read_all_as_string(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        or_sentinel(path, self.try_read_all_as_string(path))
    }

    /// All lines; empty when the file is missing or unreadable
    pub fn read_all_as_lines(&self, path: impl AsRef<Path>) -> Vec<String> {
        let path = path.as_ref();
        or_empty(path, self.try_read_all_as_lines(path))
    }

    /// All tokens of all lines; empty when the file is missing or unreadable
    pub fn read_all_as_tokens(&self, path: impl AsRef<Path>, separator: &str) -> Vec<String> {
        let path = path.as_ref();
        let result = Separator::new(separator)
            .and_then(|separator| self.try_read_all_as_tokens(path, &separator));
        or_empty(path, result)
    }
}

// ============================================================================
// Free functions using the default separator and trim policy
// ============================================================================

/// See [`TextFiles::append_line`]
pub fn append_line(path: impl AsRef<Path>, line: &str) -> bool {
    TextFiles::default().append_line(path, line)
}

/// See [`TextFiles::append_lines`]
pub fn append_lines<I, S>(path: impl AsRef<Path>, lines: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TextFiles::default().append_lines(path, lines)
}

/// See [`TextFiles::append_delimited_text`]
pub fn append_delimited_text(path: impl AsRef<Path>, text: &str, separator: &str) -> bool {
    TextFiles::default().append_delimited_text(path, text, separator)
}

/// Append text split on periods
pub fn append_delimited_text_default(path: impl AsRef<Path>, text: &str) -> bool {
    TextFiles::default().append_delimited_text_default(path, text)
}

/// See [`TextFiles::read_first_line`]
pub fn read_first_line(path: impl AsRef<Path>) -> String {
    TextFiles::default().read_first_line(path)
}

/// See [`TextFiles::read_line`]
pub fn read_line(path: impl AsRef<Path>, index: isize) -> String {
    TextFiles::default().read_line(path, index)
}

/// See [`TextFiles::read_all_as_string`]
pub fn read_all_as_string(path: impl AsRef<Path>) -> String {
    TextFiles::default().read_all_as_string(path)
}

/// See [`TextFiles::read_all_as_lines`]
pub fn read_all_as_lines(path: impl AsRef<Path>) -> Vec<String> {
    TextFiles::default().read_all_as_lines(path)
}

/// See [`TextFiles::read_all_as_tokens`]
pub fn read_all_as_tokens(path: impl AsRef<Path>, separator: &str) -> Vec<String> {
    TextFiles::default().read_all_as_tokens(path, separator)
}

// ============================================================================
// Primitives
// ============================================================================

fn ensure_exists(path: &Path) -> Result<(), TextFileError> {
    if path.exists() {
        Ok(())
    } else {
        Err(TextFileError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, TextFileError> {
    let file = File::open(path).map_err(|e| TextFileError::io(path, e))?;
    let mut text = String::new();
    BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(|e| TextFileError::io(path, e))?;
    Ok(split_lines(&text))
}

/// Split on `\n`, `\r\n` or a lone `\r`; a final unterminated line still counts
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(end) = rest.find(|c: char| c == '\n' || c == '\r') else {
            lines.push(rest.to_string());
            break;
        };
        lines.push(rest[..end].to_string());
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }

    lines
}

/// Create an empty file; fails if it already exists or the parent is missing
fn create_file(path: &Path) -> Result<(), TextFileError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(drop)
        .map_err(|e| TextFileError::io(path, e))
}

/// Replace the file's content with `data`
fn write_file(path: &Path, data: &str) -> Result<(), TextFileError> {
    let file = File::create(path).map_err(|e| TextFileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(data.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| TextFileError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}

fn log_failure(path: &Path, error: &TextFileError) {
    if error.is_absence() {
        tracing::debug!(path = %path.display(), "{}", error);
    } else {
        tracing::warn!(path = %path.display(), "{}", error);
    }
}

fn succeeded(path: &Path, result: Result<(), TextFileError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log_failure(path, &e);
            false
        }
    }
}

fn or_sentinel(path: &Path, result: Result<String, TextFileError>) -> String {
    result.unwrap_or_else(|e| {
        log_failure(path, &e);
        e.sentinel().unwrap_or_default().to_string()
    })
}

fn or_empty(path: &Path, result: Result<Vec<String>, TextFileError>) -> Vec<String> {
    result.unwrap_or_else(|e| {
        log_failure(path, &e);
        Vec::new()
    })
}
