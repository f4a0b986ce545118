//! Error types shared across the crate

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a glob could not be compiled.
///
/// A glob carrying one of these never matches anything.
#[derive(Debug, Clone, Error)]
pub enum GlobError {
    #[error("glob length {len} exceeds the maximal allowed length of {max} characters")]
    TooLong { len: usize, max: usize },

    #[error("glob {pattern:?} does not translate to a valid expression: {source}")]
    Syntax {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A value rejected by its option type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {name}: expected {expected}")]
pub struct OptionError {
    pub name: String,
    pub value: String,
    pub expected: String,
}

/// How serious a parse problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `[` without a closing `]`
    MalformedSection,
    /// Line that is neither a header, an option, nor a comment
    MalformedLine,
    /// `= value` with nothing before the separator
    EmptyOptionName,
}

impl ParseErrorKind {
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::MalformedSection | ParseErrorKind::MalformedLine
        )
    }

    pub fn severity(&self) -> Severity {
        if self.is_syntax_error() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// A recoverable problem found while reading one configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Failure of a whole resolution call.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            source,
        }
    }
}
