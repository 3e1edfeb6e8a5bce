//! Error type for text file operations
//!
//! The fallible `try_*` operations in [`crate::text_file`] return
//! [`TextFileError`]. The never-failing forms map the logical "not found"
//! variants onto the fixed sentinel strings callers compare against.

use std::path::{Path, PathBuf};

/// Returned in place of content when the target file does not exist
pub const FILE_NOT_FOUND: &str = "No existe el fichero";

/// Returned in place of a line when the requested index has no line
pub const NO_SUCH_LINE: &str = "No hay línea en esa posición.";

/// Errors that can occur while reading or appending to a text file
#[derive(Debug, thiserror::Error)]
pub enum TextFileError {
    /// The file does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file has no line at the requested index
    #[error("no line at index {index}")]
    NoSuchLine { index: isize },

    /// The separator is not a valid regular expression
    #[error("invalid separator pattern '{pattern}': {source}")]
    InvalidSeparator {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Any other I/O failure (permissions, missing parent directory, ...)
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TextFileError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The sentinel string for expected absences, `None` for real failures
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some(FILE_NOT_FOUND),
            Self::NoSuchLine { .. } => Some(NO_SUCH_LINE),
            Self::InvalidSeparator { .. } | Self::Io { .. } => None,
        }
    }

    /// Whether this is an expected absence rather than a failure
    pub fn is_absence(&self) -> bool {
        self.sentinel().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let not_found = TextFileError::NotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(not_found.sentinel(), Some("No existe el fichero"));

        let no_line = TextFileError::NoSuchLine { index: -1 };
        assert_eq!(no_line.sentinel(), Some("No hay línea en esa posición."));
    }

    #[test]
    fn test_io_error_has_no_sentinel() {
        let err = TextFileError::io(
            Path::new("/root/file.txt"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(err.sentinel().is_none());
        assert!(!err.is_absence());
    }

    #[test]
    fn test_display_messages() {
        let err = TextFileError::NotFound {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.to_string(), "file not found: notes.txt");

        let err = TextFileError::NoSuchLine { index: 7 };
        assert_eq!(err.to_string(), "no line at index 7");
    }
}
