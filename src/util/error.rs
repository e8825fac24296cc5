// LootSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Per-file problems during extraction are NOT errors: they are recorded as
// `SkippedFile` entries in the report. Only setup and data errors live here.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Extract errors
// ---------------------------------------------------------------------------

/// Setup errors that abort an extraction run before or while writing the CSV.
#[derive(Debug)]
pub enum ExtractError {
    /// The log directory does not exist.
    DirectoryNotFound { path: PathBuf },

    /// The log path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// The phrase list is empty, so nothing could ever match.
    NoPhrases,

    /// A phrase is not a valid regular expression.
    InvalidPhrase {
        pattern: String,
        source: regex::Error,
    },

    /// A phrase exceeds the maximum allowed pattern length.
    PhraseTooLong { length: usize, max_length: usize },

    /// The output CSV could not be created.
    OutputCreate { path: PathBuf, source: io::Error },

    /// Writing a CSV row failed.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error listing the log directory or flushing the output.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Folder '{}' not found", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a folder", path.display())
            }
            Self::NoPhrases => write!(f, "No target phrases configured"),
            Self::InvalidPhrase { pattern, source } => {
                write!(f, "Invalid target phrase '{pattern}': {source}")
            }
            Self::PhraseTooLong { length, max_length } => write!(
                f,
                "Target phrase is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::OutputCreate { path, source } => {
                write!(f, "Cannot create output CSV '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV write error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPhrase { source, .. } => Some(source),
            Self::OutputCreate { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Analyze errors
// ---------------------------------------------------------------------------

/// Data errors raised while loading or aggregating the loot CSV.
#[derive(Debug)]
pub enum AnalyzeError {
    /// The CSV file could not be opened.
    Io { path: PathBuf, source: io::Error },

    /// The CSV is malformed.
    Csv { path: PathBuf, source: csv::Error },

    /// A required column is absent from the header row.
    MissingColumn { path: PathBuf, column: &'static str },

    /// The CSV holds no loot rows, so there is nothing to plot.
    NoData { path: PathBuf },
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "Malformed CSV '{}': {source}", path.display())
            }
            Self::MissingColumn { path, column } => {
                write!(f, "'{}' has no '{column}' column", path.display())
            }
            Self::NoData { path } => {
                write!(f, "'{}' contains no loot data to plot", path.display())
            }
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_extract_error_display_names_path() {
        let e = ExtractError::DirectoryNotFound {
            path: PathBuf::from("SourceLogs"),
        };
        assert_eq!(e.to_string(), "Folder 'SourceLogs' not found");
    }

    #[test]
    fn test_invalid_phrase_preserves_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let e = ExtractError::InvalidPhrase {
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(e.to_string().contains("(unclosed"));
        let inner = e.source().expect("regex error must be chained");
        assert!(inner.downcast_ref::<regex::Error>().is_some());
    }

    #[test]
    fn test_missing_column_display() {
        let e = AnalyzeError::MissingColumn {
            path: PathBuf::from("loot.csv"),
            column: "Line",
        };
        assert_eq!(e.to_string(), "'loot.csv' has no 'Line' column");
    }
}
