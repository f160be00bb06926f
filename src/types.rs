//! Token and directive-tree types plus the JSON payload structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single lexed token: its text, the line it began on, and whether it came
/// from inside a matching quote pair (or an extension lexer that declared its
/// output string-like).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
    pub quoted: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize, quoted: bool) -> Self {
        Self {
            text: text.into(),
            line,
            quoted,
        }
    }

    /// True for the unquoted single-character tokens `{`, `}`, and `;`.
    pub fn is_terminal(&self) -> bool {
        !self.quoted && matches!(self.text.as_str(), "{" | "}" | ";")
    }
}

/// One statement in a configuration tree.
///
/// Comments are carried as directives named `#` with the body in `comment`.
/// `includes` holds indices into the payload's `config` list and is present
/// only on expanded `include` directives; `file` is present only in combine
/// mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub directive: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Vec<Directive>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Directive {
    pub fn new(directive: impl Into<String>, line: usize) -> Self {
        Self {
            directive: directive.into(),
            line,
            args: Vec::new(),
            includes: None,
            block: None,
            comment: None,
            file: None,
        }
    }

    /// A comment node (`directive == "#"`), body without the leading `#`.
    pub fn comment(body: impl Into<String>, line: usize) -> Self {
        let mut stmt = Self::new("#", line);
        stmt.comment = Some(body.into());
        stmt
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_block(mut self, block: Vec<Directive>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn is_comment(&self) -> bool {
        self.directive == "#"
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Parse status of a file or of the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ok,
    Failed,
}

/// Error record attached to a single file report. The `error` string is the
/// full displayed form including file and line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigError {
    pub line: Option<usize>,
    pub error: String,
}

/// Error record at payload level; unlike [`ConfigError`] it names the file,
/// and it may carry an opaque `callback` value produced by the `on_error`
/// hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadError {
    pub file: PathBuf,
    pub line: Option<usize>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<serde_json::Value>,
}

/// The parse result for one configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub file: PathBuf,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub errors: Vec<ConfigError>,
    #[serde(default)]
    pub parsed: Vec<Directive>,
}

impl ConfigFile {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            status: Status::Ok,
            errors: Vec::new(),
            parsed: Vec::new(),
        }
    }
}

/// The complete parse payload: aggregate status, aggregate errors, and one
/// [`ConfigFile`] per discovered file (exactly one in combine mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub status: Status,
    pub errors: Vec<PayloadError>,
    pub config: Vec<ConfigFile>,
}

impl Payload {
    pub fn new() -> Self {
        Self {
            status: Status::Ok,
            errors: Vec::new(),
            config: Vec::new(),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new()
    }
}
