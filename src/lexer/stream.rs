//! Character stream feeding the lexer.
//!
//! Reads a file in blocks, decodes UTF-8 incrementally, merges backslash
//! escapes into two-character chunks, and tags every chunk with the source
//! line. The stream is single-pass with a one-item put-back slot.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, ParseError, Result};

const BLOCK_SIZE: usize = 8 * 1024;

/// A single user-visible character, or a `\x` escape pair kept atomic.
///
/// For an escape pair, `ch` is the escaped character and the leading
/// backslash is implied by `escaped`. The one exception is a lone `\` at end
/// of input, which is emitted as a plain chunk with `ch == '\\'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub ch: char,
    pub escaped: bool,
    /// 1-based line number after this chunk has been consumed.
    pub line: usize,
}

impl Chunk {
    /// True when the chunk is exactly the unescaped character `c`.
    pub fn is(&self, c: char) -> bool {
        !self.escaped && self.ch == c
    }

    pub fn is_whitespace(&self) -> bool {
        !self.escaped && self.ch.is_whitespace()
    }

    /// Escaped newlines end a line just like bare ones.
    pub fn ends_with_newline(&self) -> bool {
        self.ch == '\n'
    }

    /// Append the chunk verbatim, backslash included for escape pairs.
    pub fn write_to(&self, buf: &mut String) {
        if self.escaped {
            buf.push('\\');
        }
        buf.push(self.ch);
    }
}

/// Lazy `(chunk, line)` source over a reader.
pub struct CharStream {
    reader: Box<dyn Read>,
    path: PathBuf,
    /// Raw bytes read but not yet decoded (partial UTF-8 at a block edge).
    bytes: Vec<u8>,
    chars: VecDeque<char>,
    line: usize,
    put_back: Option<Chunk>,
    eof: bool,
}

impl CharStream {
    pub fn new(reader: Box<dyn Read>, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            bytes: Vec::new(),
            chars: VecDeque::new(),
            line: 1,
            put_back: None,
            eof: false,
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ParseError::io(path, &e))?;
        Ok(Self::new(Box::new(file), path))
    }

    /// Stream over in-memory text; `label` stands in for the file name in
    /// error messages.
    pub fn from_string(label: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let cursor = io::Cursor::new(text.into().into_bytes());
        Self::new(Box::new(cursor), label)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line number after the most recently consumed chunk.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Build an error located at the stream's current line.
    pub fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.path.clone(), Some(self.line))
    }

    /// Put one chunk back; it is returned by the next [`next_chunk`] call.
    ///
    /// [`next_chunk`]: CharStream::next_chunk
    pub fn put_back(&mut self, chunk: Chunk) {
        debug_assert!(self.put_back.is_none(), "put-back slot already occupied");
        self.put_back = Some(chunk);
    }

    /// Pull the next escape-merged, line-tagged chunk.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if let Some(chunk) = self.put_back.take() {
            return Ok(Some(chunk));
        }

        let Some(first) = self.next_char()? else {
            return Ok(None);
        };

        let mut chunk = if first == '\\' {
            match self.next_char()? {
                Some(second) => Chunk {
                    ch: second,
                    escaped: true,
                    line: 0,
                },
                // trailing lone backslash at end of input
                None => Chunk {
                    ch: '\\',
                    escaped: false,
                    line: 0,
                },
            }
        } else {
            Chunk {
                ch: first,
                escaped: false,
                line: 0,
            }
        };

        if chunk.ends_with_newline() {
            self.line += 1;
        }
        chunk.line = self.line;
        Ok(Some(chunk))
    }

    fn next_char(&mut self) -> Result<Option<char>> {
        loop {
            if let Some(c) = self.chars.pop_front() {
                return Ok(Some(c));
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    /// Read one more block and decode whatever became decodable. Returns
    /// false once the reader is exhausted and every byte is decoded.
    fn fill(&mut self) -> Result<bool> {
        if self.eof {
            if self.bytes.is_empty() {
                return Ok(false);
            }
            return Err(self.invalid_utf8());
        }

        let mut block = [0u8; BLOCK_SIZE];
        let n = self
            .reader
            .read(&mut block)
            .map_err(|e| ParseError::io(&self.path, &e))?;
        if n == 0 {
            self.eof = true;
            // loop back into the leftover-byte check above
            return Ok(true);
        }
        self.bytes.extend_from_slice(&block[..n]);

        match std::str::from_utf8(&self.bytes) {
            Ok(s) => {
                self.chars.extend(s.chars());
                self.bytes.clear();
            }
            Err(e) if e.error_len().is_some() => return Err(self.invalid_utf8()),
            Err(e) => {
                // incomplete sequence at the block edge; decode the valid
                // prefix and carry the tail into the next read
                let tail = self.bytes.split_off(e.valid_up_to());
                let prefix = std::mem::replace(&mut self.bytes, tail);
                match String::from_utf8(prefix) {
                    Ok(s) => self.chars.extend(s.chars()),
                    Err(_) => return Err(self.invalid_utf8()),
                }
            }
        }
        Ok(true)
    }

    fn invalid_utf8(&self) -> ParseError {
        ParseError::new(
            ErrorKind::Io(format!("invalid UTF-8: \"{}\"", self.path.display())),
            self.path.clone(),
            Some(self.line),
        )
    }
}
