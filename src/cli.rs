//! Command-line interface definitions for pathdedup.
//!
//! One invocation deduplicates the active document of a workspace file.
//!
//! # Example
//!
//! ```bash
//! # Report what would change without touching the file
//! pathdedup poster.json
//!
//! # Coarser matching, restricted to the selection, written back in place
//! pathdedup poster.json --precision 0 --scope selection --in-place
//!
//! # JSON report for scripting
//! pathdedup poster.json --output json --write cleaned.json
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::duplicates::Scope;
use crate::fingerprint::Precision;

/// Remove geometrically duplicate paths from vector documents.
///
/// Compound paths are deduplicated first, then path items. The first
/// occurrence of each shape is kept.
#[derive(Debug, Parser)]
#[command(name = "pathdedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the status line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON objects on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Workspace file (JSON) holding the open documents
    #[arg(value_name = "WORKSPACE")]
    pub workspace: PathBuf,

    /// Decimal digits compared when matching coordinates (0-9)
    #[arg(short, long, value_name = "N", value_parser = parse_precision)]
    pub precision: Option<Precision>,

    /// Which path items to consider after compound paths
    #[arg(short, long, value_enum)]
    pub scope: Option<ScopeArg>,

    /// Output format for the run status
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Write the cleaned workspace to this file
    #[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
    pub write: Option<PathBuf>,

    /// Overwrite the input workspace with the cleaned result
    #[arg(long)]
    pub in_place: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Where the cleaned workspace goes, if anywhere.
    #[must_use]
    pub fn destination(&self) -> Option<PathBuf> {
        if self.in_place {
            Some(self.workspace.clone())
        } else {
            self.write.clone()
        }
    }
}

/// Path item scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeArg {
    /// Selection when something is selected, otherwise the whole document
    #[default]
    Auto,
    /// Always the whole document
    Document,
    /// The selection (whole document if nothing is selected)
    Selection,
}

impl ScopeArg {
    /// Engine scope for a document with or without a selection.
    #[must_use]
    pub fn resolve(self, has_selection: bool) -> Scope {
        match self {
            Self::Document => Scope::WholeDocument,
            Self::Auto | Self::Selection if has_selection => Scope::Selection,
            Self::Auto | Self::Selection => Scope::WholeDocument,
        }
    }

    /// True when an explicit `selection` scope has nothing to work on.
    #[must_use]
    pub fn falls_back(self, has_selection: bool) -> bool {
        self == Self::Selection && !has_selection
    }
}

impl std::fmt::Display for ScopeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeArg::Auto => write!(f, "auto"),
            ScopeArg::Document => write!(f, "document"),
            ScopeArg::Selection => write!(f, "selection"),
        }
    }
}

/// Output format for the run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line
    #[default]
    Text,
    /// JSON report on stdout
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a precision argument.
///
/// ```
/// use pathdedup::cli::parse_precision;
///
/// assert_eq!(parse_precision("3").unwrap().digits(), 3);
/// assert!(parse_precision("10").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the value is not an integer in `0..=9`.
pub fn parse_precision(s: &str) -> Result<Precision, String> {
    let digits: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid precision: {s}"))?;
    Precision::new(digits).map_err(|e| e.to_string())
}
