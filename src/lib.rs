//! linefile - line-oriented helpers for plain text files
//!
//! Append a line, a list of lines, or delimiter-split text to a file, and
//! read back its first line, any line, or the whole content as a string or
//! a list of lines.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod separator;
pub mod text_file;
pub mod tracing;

// Re-export commonly used types
pub use config::{ConfigError, TextFilesConfig, TrimPolicy};
pub use error::{TextFileError, FILE_NOT_FOUND, NO_SUCH_LINE};
pub use separator::Separator;
pub use text_file::{
    append_delimited_text, append_delimited_text_default, append_line, append_lines,
    read_all_as_lines, read_all_as_string, read_all_as_tokens, read_first_line, read_line,
    TextFiles,
};
