//! Recursive parser with include expansion.
//!
//! Files are processed from a grow-while-iterating work queue: the main file
//! seeds it, and every expanded `include` directive appends the files it
//! resolves (glob-aware, parsed once each). Each file is lexed lazily and
//! parsed to completion before the next begins. Analyzer errors are either
//! recorded on the payload or raised, depending on `catch_errors`.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::analyzer::{analyze, enter_block_ctx};
use crate::error::{ErrorKind, ParseError, Result};
use crate::ext::Registry;
use crate::lexer::{CharStream, Lexer};
use crate::types::{ConfigError, ConfigFile, Directive, Payload, PayloadError, Status};

/// Parse behavior switches. The defaults mirror a permissive, error-collecting
/// run over the whole include tree.
#[derive(Clone)]
pub struct ParseOptions {
    /// Called per recorded error; the returned value is attached to the
    /// payload-level error entry as `callback`.
    pub on_error: Option<fn(&ParseError) -> serde_json::Value>,
    /// Record errors and continue instead of failing fast.
    pub catch_errors: bool,
    /// Directive names to drop entirely, blocks included.
    pub ignore: Vec<String>,
    /// Do not traverse `include` directives.
    pub single_file: bool,
    /// Keep comments in the tree.
    pub comments: bool,
    /// Fail on directives absent from the catalog.
    pub strict: bool,
    /// Flatten the include tree into a single virtual file afterwards.
    pub combine: bool,
    /// Validate block contexts.
    pub check_ctx: bool,
    /// Validate argument arity and terminators.
    pub check_args: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            on_error: None,
            catch_errors: true,
            ignore: Vec::new(),
            single_file: false,
            comments: false,
            strict: false,
            combine: false,
            check_ctx: true,
            check_args: true,
        }
    }
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("on_error", &self.on_error.map(|_| "fn"))
            .field("catch_errors", &self.catch_errors)
            .field("ignore", &self.ignore)
            .field("single_file", &self.single_file)
            .field("comments", &self.comments)
            .field("strict", &self.strict)
            .field("combine", &self.combine)
            .field("check_ctx", &self.check_ctx)
            .field("check_args", &self.check_args)
            .finish()
    }
}

/// Parse `filename` and everything it includes into a [`Payload`].
///
/// With `catch_errors` on (the default) the returned payload carries every
/// recorded error and the call itself only fails on invariant-free paths;
/// with it off, the first error is returned directly.
pub fn parse_file(
    filename: impl AsRef<Path>,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Payload> {
    let filename = filename.as_ref().to_path_buf();
    let config_dir = filename
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut run = ParseRun {
        registry,
        options,
        config_dir,
        payload: Payload::new(),
        included: HashMap::new(),
        todo: vec![(filename.clone(), Vec::new())],
    };
    run.included.insert(filename, 0);

    let mut cursor = 0;
    while cursor < run.todo.len() {
        let (path, ctx) = run.todo[cursor].clone();
        cursor += 1;
        run.parse_one(path, &ctx)?;
    }

    let payload = run.payload;
    if options.combine {
        Ok(combine_parsed(payload))
    } else {
        Ok(payload)
    }
}

struct ParseRun<'a> {
    registry: &'a Registry,
    options: &'a ParseOptions,
    config_dir: PathBuf,
    payload: Payload,
    /// file → index into `todo` (== index into `payload.config`)
    included: HashMap<PathBuf, usize>,
    todo: Vec<(PathBuf, Vec<String>)>,
}

impl ParseRun<'_> {
    fn parse_one(&mut self, path: PathBuf, ctx: &[String]) -> Result<()> {
        let mut report = ConfigFile::new(path.clone());
        match CharStream::open(&path) {
            Ok(stream) => {
                let mut lexer = Lexer::new(stream, self.registry);
                match self.parse_context(&mut report, &mut lexer, ctx, false) {
                    Ok(parsed) => report.parsed = parsed,
                    // lexer-class errors cannot be resumed mid-file
                    Err(e) => self.record(&mut report, e)?,
                }
            }
            Err(e) => self.record(&mut report, e)?,
        }
        self.payload.config.push(report);
        Ok(())
    }

    /// Record the error on both the file report and the payload, or raise it
    /// when `catch_errors` is off.
    fn record(&mut self, report: &mut ConfigFile, err: ParseError) -> Result<()> {
        if !self.options.catch_errors {
            return Err(err);
        }
        let message = err.to_string();
        report.status = Status::Failed;
        report.errors.push(ConfigError {
            line: err.line,
            error: message.clone(),
        });
        self.payload.status = Status::Failed;
        self.payload.errors.push(PayloadError {
            file: err.file.clone(),
            line: err.line,
            error: message,
            callback: self.options.on_error.map(|hook| hook(&err)),
        });
        Ok(())
    }

    /// Collect directives until the stream ends or the enclosing block
    /// closes. With `consume` on, tokens are discarded instead (used to skip
    /// ignored or orphaned sub-trees).
    fn parse_context(
        &mut self,
        report: &mut ConfigFile,
        lexer: &mut Lexer<'_>,
        ctx: &[String],
        consume: bool,
    ) -> Result<Vec<Directive>> {
        let fname = report.file.clone();
        let mut parsed = Vec::new();

        while let Some(token) = lexer.next_token()? {
            // the enclosing block is closing
            if token.text == "}" && !token.quoted {
                break;
            }

            if consume {
                if token.text == "{" && !token.quoted {
                    self.parse_context(report, lexer, ctx, true)?;
                }
                continue;
            }

            if token.text.starts_with('#') && !token.quoted {
                if self.options.comments {
                    let mut comment = Directive::comment(&token.text[1..], token.line);
                    if self.options.combine {
                        comment.file = Some(fname.clone());
                    }
                    parsed.push(comment);
                }
                continue;
            }

            let mut stmt = Directive::new(token.text, token.line);
            if self.options.combine {
                stmt.file = Some(fname.clone());
            }

            // gather arguments up to the statement terminator; comments found
            // among them are re-attached after the statement
            let mut comments_in_args = Vec::new();
            let term = loop {
                let Some(arg) = lexer.next_token()? else {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedEndOfFile("\";\" or \"}\"".to_string()),
                        fname.clone(),
                        Some(stmt.line),
                    ));
                };
                if arg.is_terminal() {
                    break arg;
                }
                if arg.text.starts_with('#') && !arg.quoted {
                    if self.options.comments {
                        comments_in_args.push(arg.text[1..].to_string());
                    }
                    continue;
                }
                stmt.args.push(arg.text);
            };

            if self.options.ignore.iter().any(|d| *d == stmt.directive) {
                if term.text == "{" {
                    self.parse_context(report, lexer, ctx, true)?;
                }
                continue;
            }

            if stmt.directive == "if" {
                prepare_if_args(&mut stmt);
            }

            if let Err(e) = analyze(
                &fname,
                &stmt,
                &term.text,
                ctx,
                self.registry,
                self.options.strict,
                self.options.check_ctx,
                self.options.check_args,
            ) {
                let resync_block = e.is_terminator_error();
                self.record(report, e)?;
                if resync_block {
                    // the directive opened a block it should not have;
                    // consume it to get back in sync
                    if term.text != "}" {
                        self.parse_context(report, lexer, ctx, true)?;
                    } else {
                        break;
                    }
                }
                continue;
            }

            if stmt.directive == "include" && !self.options.single_file {
                self.enqueue_include(report, &mut stmt, ctx)?;
            }

            if term.text == "{" {
                let inner_ctx = enter_block_ctx(&stmt, ctx);
                stmt.block = Some(self.parse_context(report, lexer, &inner_ctx, false)?);
            }

            let line = stmt.line;
            parsed.push(stmt);
            for comment in comments_in_args {
                let mut comment = Directive::comment(comment, line);
                if self.options.combine {
                    comment.file = Some(fname.clone());
                }
                parsed.push(comment);
            }
        }

        Ok(parsed)
    }

    /// Resolve the include pattern, queue unseen files, and point the
    /// statement at every resolved payload index.
    fn enqueue_include(
        &mut self,
        report: &mut ConfigFile,
        stmt: &mut Directive,
        ctx: &[String],
    ) -> Result<()> {
        let pattern = match stmt.first_arg() {
            Some(p) => p.to_string(),
            None => return Ok(()),
        };
        let pattern_path = Path::new(&pattern);
        let resolved = if pattern_path.is_absolute() {
            pattern_path.to_path_buf()
        } else {
            self.config_dir.join(pattern_path)
        };

        stmt.includes = Some(Vec::new());

        let matches = if has_glob_magic(&pattern) {
            match glob::glob(&resolved.to_string_lossy()) {
                Ok(paths) => {
                    let mut found: Vec<PathBuf> = paths.filter_map(|p| p.ok()).collect();
                    found.sort();
                    found
                }
                Err(e) => {
                    let err = ParseError::new(
                        ErrorKind::Io(format!(
                            "invalid glob pattern \"{}\": {}",
                            resolved.display(),
                            e
                        )),
                        report.file.clone(),
                        Some(stmt.line),
                    );
                    self.record(report, err)?;
                    return Ok(());
                }
            }
        } else {
            // explicit includes must exist
            match File::open(&resolved) {
                Ok(_) => vec![resolved],
                Err(e) => {
                    let err = ParseError::io(&resolved, &e)
                        .in_file(report.file.clone())
                        .with_line(stmt.line);
                    self.record(report, err)?;
                    return Ok(());
                }
            }
        };

        for path in matches {
            let index = match self.included.get(&path) {
                Some(index) => *index,
                None => {
                    let index = self.todo.len();
                    self.included.insert(path.clone(), index);
                    self.todo.push((path, ctx.to_vec()));
                    index
                }
            };
            if let Some(includes) = &mut stmt.includes {
                includes.push(index);
            }
        }
        Ok(())
    }
}

/// One leading `(` and one trailing `)` come off an `if` directive's
/// argument list; args emptied by the strip are dropped.
fn prepare_if_args(stmt: &mut Directive) {
    let args = &mut stmt.args;
    let starts = args.first().is_some_and(|a| a.starts_with('('));
    let ends = args.last().is_some_and(|a| a.ends_with(')'));
    if !(starts && ends) {
        return;
    }
    if let Some(first) = args.first_mut() {
        *first = first[1..].trim_start().to_string();
    }
    if let Some(last) = args.last_mut() {
        *last = last[..last.len() - 1].trim_end().to_string();
    }
    if args.last().is_some_and(String::is_empty) {
        args.pop();
    }
    if args.first().is_some_and(String::is_empty) {
        args.remove(0);
    }
}

fn has_glob_magic(pattern: &str) -> bool {
    pattern.chars().any(|c| matches!(c, '*' | '?' | '['))
}

/// Flatten a multi-file payload into one virtual file: every expanded
/// `include` node is replaced in place by its target's top-level directives,
/// recursively. Errors aggregate in discovery order.
fn combine_parsed(payload: Payload) -> Payload {
    let Some(first) = payload.config.first() else {
        return payload;
    };

    let mut combined = ConfigFile::new(first.file.clone());
    for config in &payload.config {
        combined.errors.extend(config.errors.iter().cloned());
        if config.status == Status::Failed {
            combined.status = Status::Failed;
        }
    }

    let mut expander = IncludeExpander {
        configs: &payload.config,
        visiting: HashSet::new(),
        errors: Vec::new(),
    };
    expander.visiting.insert(0);
    combined.parsed = expander.expand(&first.parsed);
    let cycle_errors = expander.errors;

    let mut status = payload.status;
    let mut errors = payload.errors;
    for err in cycle_errors {
        combined.status = Status::Failed;
        status = Status::Failed;
        let message = err.to_string();
        combined.errors.push(ConfigError {
            line: err.line,
            error: message.clone(),
        });
        errors.push(PayloadError {
            file: err.file,
            line: err.line,
            error: message,
            callback: None,
        });
    }

    Payload {
        status,
        errors,
        config: vec![combined],
    }
}

/// Inlines include targets while tracking which payload indices are on the
/// current expansion path, so an include chain that loops back on itself is
/// reported instead of recursing forever.
struct IncludeExpander<'a> {
    configs: &'a [ConfigFile],
    visiting: HashSet<usize>,
    errors: Vec<ParseError>,
}

impl IncludeExpander<'_> {
    fn expand(&mut self, block: &[Directive]) -> Vec<Directive> {
        let mut out = Vec::new();
        for stmt in block {
            if let Some(indices) = &stmt.includes {
                for &index in indices {
                    let Some(target) = self.configs.get(index) else {
                        continue;
                    };
                    if !self.visiting.insert(index) {
                        self.errors.push(ParseError::new(
                            ErrorKind::CircularInclude(target.file.display().to_string()),
                            stmt.file.clone().unwrap_or_else(|| target.file.clone()),
                            Some(stmt.line),
                        ));
                        continue;
                    }
                    out.extend(self.expand(&target.parsed));
                    self.visiting.remove(&index);
                }
                continue;
            }
            let mut stmt = stmt.clone();
            if let Some(inner) = stmt.block.take() {
                stmt.block = Some(self.expand(&inner));
            }
            out.push(stmt);
        }
        out
    }
}
