//! Streaming lexer for nginx configuration syntax.
//!
//! Tokens are pulled lazily from a [`CharStream`]; quoting and escape rules
//! follow nginx, `${…}` expansions stay inside one token, and directives with
//! registered extension lexers hand the character stream over mid-flight. A
//! wrapping pass enforces brace balance across the emitted tokens.

pub mod stream;

pub use stream::{CharStream, Chunk};

use std::collections::VecDeque;
use std::path::Path;

use crate::error::{ErrorKind, Result};
use crate::ext::Registry;
use crate::types::Token;

/// Lex a whole file into tokens, extension hooks included.
pub fn lex_file(path: impl AsRef<Path>, registry: &Registry) -> Result<Vec<Token>> {
    let stream = CharStream::open(path.as_ref())?;
    Lexer::new(stream, registry).collect()
}

/// Raw tokenizer over a character stream.
struct Tokenizer<'r> {
    stream: CharStream,
    registry: &'r Registry,
    queued: VecDeque<Token>,
    token: String,
    token_line: usize,
    next_is_directive: bool,
    done: bool,
}

impl<'r> Tokenizer<'r> {
    fn new(stream: CharStream, registry: &'r Registry) -> Self {
        Self {
            stream,
            registry,
            queued: VecDeque::new(),
            token: String::new(),
            token_line: 1,
            next_is_directive: true,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if let Some(token) = self.queued.pop_front() {
                return Ok(Some(token));
            }
            if self.done {
                return Ok(None);
            }
            match self.stream.next_chunk()? {
                Some(chunk) => self.consume(chunk)?,
                None => {
                    self.done = true;
                    if !self.token.is_empty() {
                        let text = std::mem::take(&mut self.token);
                        self.queued.push_back(Token::new(text, self.token_line, false));
                    }
                }
            }
        }
    }

    fn consume(&mut self, chunk: Chunk) -> Result<()> {
        if chunk.is_whitespace() {
            self.flush_and_dispatch()?;
            return Ok(());
        }

        if self.token.is_empty() && chunk.is('#') {
            return self.read_comment(chunk);
        }

        if self.token.is_empty() {
            self.token_line = chunk.line;
        }

        // keep "${var}" expansions inside the token even when they contain
        // characters that would otherwise split it
        if chunk.is('{') && self.token.ends_with('$') {
            self.next_is_directive = false;
            chunk.write_to(&mut self.token);
            loop {
                match self.stream.next_chunk()? {
                    None => break,
                    Some(c) if c.is_whitespace() => {
                        self.stream.put_back(c);
                        break;
                    }
                    Some(c) => {
                        let closed = c.is('}');
                        c.write_to(&mut self.token);
                        if closed {
                            break;
                        }
                    }
                }
            }
            return Ok(());
        }

        if chunk.is('"') || chunk.is('\'') {
            // a quote inside a token is an ordinary character
            if !self.token.is_empty() {
                chunk.write_to(&mut self.token);
                return Ok(());
            }
            return self.read_quoted(chunk.ch);
        }

        if chunk.is('{') || chunk.is('}') || chunk.is(';') {
            // a hooked directive may be glued to its body with no whitespace;
            // the extension lexer must see this character, so hand it back
            // before dispatching
            if self.next_is_directive
                && !self.token.is_empty()
                && self.registry.has_lex_hook(&self.token)
            {
                self.stream.put_back(chunk);
                return self.flush_and_dispatch();
            }
            self.flush_and_dispatch()?;
            self.queued
                .push_back(Token::new(chunk.ch.to_string(), chunk.line, false));
            self.next_is_directive = true;
            return Ok(());
        }

        chunk.write_to(&mut self.token);
        Ok(())
    }

    /// Emit the pending buffer (if any) as an unquoted token, then hand the
    /// stream to an extension lexer when the token is a hooked directive.
    fn flush_and_dispatch(&mut self) -> Result<()> {
        if self.token.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.token);
        self.queued
            .push_back(Token::new(text.clone(), self.token_line, false));
        self.dispatch(&text)
    }

    fn dispatch(&mut self, directive: &str) -> Result<()> {
        let registry = self.registry;
        if self.next_is_directive && registry.has_lex_hook(directive) {
            let tokens = registry.run_lex_hook(&mut self.stream, directive)?;
            self.queued.extend(tokens);
            self.next_is_directive = true;
        } else {
            self.next_is_directive = false;
        }
        Ok(())
    }

    /// Raw `#…` comment, up to but excluding the line terminator.
    fn read_comment(&mut self, hash: Chunk) -> Result<()> {
        let start_line = hash.line;
        let mut text = String::new();
        hash.write_to(&mut text);
        loop {
            match self.stream.next_chunk()? {
                None => break,
                Some(c) if c.ends_with_newline() => break,
                Some(c) => c.write_to(&mut text),
            }
        }
        self.queued.push_back(Token::new(text, start_line, false));
        Ok(())
    }

    /// Everything between a pair of matching quotes, `\<quote>` unescaped and
    /// every other escape preserved verbatim.
    fn read_quoted(&mut self, quote: char) -> Result<()> {
        self.token_line = self.stream.line();
        let mut text = String::new();
        loop {
            match self.stream.next_chunk()? {
                None => {
                    return Err(self
                        .stream
                        .error(ErrorKind::UnexpectedEndOfFile(format!("\"{quote}\""))));
                }
                Some(c) if c.escaped && c.ch == quote => text.push(quote),
                Some(c) if c.is(quote) => break,
                Some(c) => c.write_to(&mut text),
            }
        }
        self.queued
            .push_back(Token::new(text.clone(), self.token_line, true));
        self.dispatch(&text)
    }
}

/// Token stream with brace-balance enforcement; the lexer's public face.
pub struct Lexer<'r> {
    inner: Tokenizer<'r>,
    depth: usize,
    last_line: usize,
    failed: bool,
}

impl<'r> Lexer<'r> {
    pub fn new(stream: CharStream, registry: &'r Registry) -> Self {
        Self {
            inner: Tokenizer::new(stream, registry),
            depth: 0,
            last_line: 1,
            failed: false,
        }
    }

    /// Pull the next token, failing fast on a `}` that closes nothing and on
    /// end of input inside an open block.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.failed {
            return Ok(None);
        }
        let token = match self.inner.next_token() {
            Ok(t) => t,
            Err(e) => {
                self.failed = true;
                return Err(e);
            }
        };
        match &token {
            Some(t) if !t.quoted && t.text == "}" => {
                if self.depth == 0 {
                    self.failed = true;
                    return Err(self
                        .inner
                        .stream
                        .error(ErrorKind::UnexpectedRightBrace)
                        .with_line(t.line));
                }
                self.depth -= 1;
            }
            Some(t) if !t.quoted && t.text == "{" => self.depth += 1,
            Some(_) => {}
            None => {
                if self.depth > 0 {
                    self.failed = true;
                    return Err(self
                        .inner
                        .stream
                        .error(ErrorKind::UnexpectedEndOfFile("\"}\"".to_string()))
                        .with_line(self.last_line));
                }
            }
        }
        if let Some(t) = &token {
            self.last_line = t.line;
        }
        Ok(token)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
