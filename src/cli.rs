//! Command-line argument parsing
//!
//! Supports:
//! - Appending a line, several lines, or delimiter-split text
//! - Reading one line (negative indices allowed, they just miss)
//! - Reading the whole file as text, lines, or separator tokens
//! - Writing and inspecting the config file

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Append to and read plain text files line by line
#[derive(Parser, Debug)]
#[command(name = "linefile", version, about = "Append to and read text files line by line")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append one line, creating the file if needed
    AppendLine {
        path: PathBuf,
        line: String,
    },

    /// Append several lines, each followed by a line break
    AppendLines {
        path: PathBuf,
        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,
    },

    /// Split text by a separator and append one token per line
    AppendText {
        path: PathBuf,
        text: String,
        /// Regex to split on (defaults to the configured separator)
        #[arg(short, long, value_name = "PATTERN")]
        separator: Option<String>,
    },

    /// Print the line at a zero-based index
    ReadLine {
        path: PathBuf,
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        index: isize,
    },

    /// Print the whole file
    ReadAll(ReadAllArgs),

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReadAllArgs {
    pub path: PathBuf,
    /// Print one line per output line instead of the joined text
    #[arg(short, long)]
    pub lines: bool,
    /// Split every line by this regex and print one token per output line
    #[arg(short, long, value_name = "PATTERN", conflicts_with = "lines")]
    pub separator: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a config file holding the defaults
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the config file location and the settings in effect
    Show,
}

/// How `read-all` output is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAllMode<'a> {
    Text,
    Lines,
    Tokens(&'a str),
}

impl ReadAllArgs {
    pub fn mode(&self) -> ReadAllMode<'_> {
        match (&self.separator, self.lines) {
            (Some(separator), _) => ReadAllMode::Tokens(separator),
            (None, true) => ReadAllMode::Lines,
            (None, false) => ReadAllMode::Text,
        }
    }
}
