//! nginx configuration toolkit
//!
//! Lex, parse, analyze, build, format, and minify nginx configuration files.
//! The parser follows `include` directives (glob patterns included) across a
//! whole configuration tree, validates every directive against a bitmask
//! catalog of allowed contexts and arities, and produces a JSON-serializable
//! payload with per-file trees and collected errors. The builder renders a
//! tree back to canonical text, round-trip stable with the parser.
//!
//! Directives whose bodies are not nginx syntax (such as OpenResty's
//! `*_by_lua_block`) are handled by extension hooks registered in a
//! [`Registry`]; `Registry::standard()` ships with the Lua block extension.

pub mod analyzer;
pub mod builder;
pub mod cli;
pub mod error;
pub mod ext;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod types;

pub use builder::{build, build_files, enquote, BuildOptions};
pub use error::{ErrorKind, ParseError, Result};
pub use ext::{Extension, LuaBlocks, Registry};
pub use format::{format_file, minify_file};
pub use lexer::{lex_file, CharStream, Lexer};
pub use parser::{parse_file, ParseOptions};
pub use types::{ConfigError, ConfigFile, Directive, Payload, PayloadError, Status, Token};
