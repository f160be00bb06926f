//! Error model shared by the lexer, parser, analyzer, and builder.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Classifies an error and carries its user-visible message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable, invalid UTF-8, or glob expansion failure.
    #[error("{0}")]
    Io(String),

    /// A `}` token closed a block that was never opened.
    #[error("unexpected \"}}\"")]
    UnexpectedRightBrace,

    /// Input ended while something was still open.
    #[error("unexpected end of file, expecting {0}")]
    UnexpectedEndOfFile(String),

    /// Directive absent from the catalog (strict mode only).
    #[error("unknown directive \"{0}\"")]
    UnknownDirective(String),

    /// Directive appeared in a block context its masks do not allow.
    #[error("\"{0}\" directive is not allowed here")]
    ContextNotAllowed(String),

    /// A block directive was not followed by `{`.
    #[error("directive \"{0}\" has no opening \"{{\"")]
    MissingOpeningBrace(String),

    /// A simple directive was not terminated by `;`.
    #[error("directive \"{0}\" is not terminated by \";\"")]
    MissingTerminator(String),

    /// A flag directive was given something other than `on`/`off`.
    #[error("invalid value \"{value}\" in \"{directive}\" directive, it must be \"on\" or \"off\"")]
    InvalidFlagValue { directive: String, value: String },

    /// Argument count matched no mask of the directive.
    #[error("invalid number of arguments in \"{0}\" directive")]
    InvalidArguments(String),

    /// An `include` chain that leads back to a file already being expanded.
    #[error("circular include: \"{0}\"")]
    CircularInclude(String),

    /// Raised by an extension lexer.
    #[error("{0}")]
    Extension(String),
}

/// An error located in a configuration file.
///
/// Displays as `<message> in <file>:<line>`, or `<message> in <file>` when
/// the line is unknown. The displayed form is what ends up in payload error
/// records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub file: PathBuf,
    pub line: Option<usize>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, file: impl Into<PathBuf>, line: Option<usize>) -> Self {
        Self {
            kind,
            file: file.into(),
            line,
        }
    }

    /// Wrap an I/O error raised while accessing `path`, keeping the
    /// conventional short message ahead of the quoted path.
    pub fn io(path: &Path, err: &io::Error) -> Self {
        let message = match err.kind() {
            io::ErrorKind::NotFound => {
                format!("No such file or directory: \"{}\"", path.display())
            }
            io::ErrorKind::PermissionDenied => {
                format!("Permission denied: \"{}\"", path.display())
            }
            _ => format!("{}: \"{}\"", err, path.display()),
        };
        Self::new(ErrorKind::Io(message), path, None)
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Re-attribute the error to another file, e.g. the file containing a
    /// broken `include` directive rather than its target.
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }

    /// True for the analyzer error that leaves an unconsumed block behind,
    /// which the parser resynchronizes past.
    pub fn is_terminator_error(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingTerminator(_))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} in {}:{}", self.kind, self.file.display(), line),
            None => write!(f, "{} in {}", self.kind, self.file.display()),
        }
    }
}

impl std::error::Error for ParseError {}
