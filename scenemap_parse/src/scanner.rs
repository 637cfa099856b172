// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resumable byte scanner for node boundaries.
//!
//! The scanner is fed successive chunks of the file and keeps just enough
//! lexical state to resume anywhere: whether it is inside a quoted string,
//! a line comment, or the leading word of a statement. Statement words are
//! only recognized at a statement start, outside strings, so `createNode`
//! inside an attribute value never opens a node.
//!
//! Long runs are skipped with `memchr`: string bodies jump to the next quote
//! or backslash, comments to the next newline, and statement bodies to the
//! next quote or semicolon.

use memchr::{memchr, memchr2};

/// Keyword opening a node declaration.
pub(crate) const CREATE_NODE: &[u8] = b"createNode";

/// Statements that begin the connection section of a scene.
const TRAILER_WORDS: [&[u8]; 2] = [b"connectAttr", b"select"];

/// Longest statement word remembered; longer words are never keywords.
const WORD_CAP: usize = 16;

/// Upper bound on captured header bytes.
pub(crate) const HEADER_CAP: usize = 16 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Lex {
    /// Statement body, or between statements when `stmt_start` is set.
    Code,
    /// Inside a double-quoted string.
    Str,
    /// After a backslash inside a string.
    StrEscape,
    /// A `/` seen at a statement start.
    Slash,
    /// Inside a `//` comment.
    Comment,
    /// Reading the leading word of a statement.
    Word,
}

/// Structural event found while scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    /// A node opens at the given absolute offset.
    Boundary(u64),
    /// The connection section starts at the given absolute offset.
    Trailer(u64),
}

#[derive(Clone, Debug)]
pub(crate) struct Scanner {
    lex: Lex,
    stmt_start: bool,
    offset: u64,
    word: [u8; WORD_CAP],
    word_len: usize,
    word_start: u64,
    stop_at_trailer: bool,
    in_header: bool,
    header: Vec<u8>,
    header_overflow: bool,
}

impl Scanner {
    pub(crate) fn new(stop_at_trailer: bool) -> Self {
        Self {
            lex: Lex::Code,
            stmt_start: true,
            offset: 0,
            word: [0; WORD_CAP],
            word_len: 0,
            word_start: 0,
            stop_at_trailer,
            in_header: false,
            header: Vec::new(),
            header_overflow: false,
        }
    }

    /// Absolute offset of the next unscanned byte.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Start capturing the header of a node that just opened.
    pub(crate) fn begin_header(&mut self) {
        self.header.clear();
        self.header.extend_from_slice(CREATE_NODE);
        self.header_overflow = false;
        self.in_header = true;
    }

    /// Take the captured header bytes and whether the cap was exceeded.
    pub(crate) fn take_header(&mut self) -> (Vec<u8>, bool) {
        self.in_header = false;
        let overflow = core::mem::replace(&mut self.header_overflow, false);
        (core::mem::take(&mut self.header), overflow)
    }

    /// True if the input so far ends inside a string or an unterminated statement.
    pub(crate) fn mid_statement(&self) -> bool {
        match self.lex {
            Lex::Str | Lex::StrEscape | Lex::Slash | Lex::Word => true,
            Lex::Comment => false,
            Lex::Code => !self.stmt_start,
        }
    }

    /// Resolve a statement word still pending at end of input.
    pub(crate) fn finish(&mut self) -> Option<Event> {
        if self.lex != Lex::Word {
            return None;
        }
        self.classify_word()
    }

    /// Scan `buf`, which continues the input at [`Scanner::offset`].
    ///
    /// Returns how many bytes were consumed and the event that stopped the
    /// scan, if any. Bytes after an event are left for the next call.
    pub(crate) fn advance(&mut self, buf: &[u8]) -> (usize, Option<Event>) {
        let mut i = 0;
        while i < buf.len() {
            if !self.in_header {
                let skip = match self.lex {
                    Lex::Code if !self.stmt_start => memchr2(b'"', b';', &buf[i..]),
                    Lex::Str => memchr2(b'"', b'\\', &buf[i..]),
                    Lex::Comment => memchr(b'\n', &buf[i..]),
                    _ => Some(0),
                };
                match skip {
                    Some(n) => i += n,
                    None => {
                        i = buf.len();
                        break;
                    }
                }
            }
            let b = buf[i];
            let at = self.offset + i as u64;
            match self.lex {
                Lex::Word if is_word_byte(b) => {
                    if self.word_len < WORD_CAP {
                        self.word[self.word_len] = b;
                    }
                    self.word_len += 1;
                }
                Lex::Word => {
                    // The terminator is left unconsumed and rescanned as code.
                    let event = if is_terminator(b) {
                        self.classify_word()
                    } else {
                        None
                    };
                    self.lex = Lex::Code;
                    self.stmt_start = false;
                    if event.is_some() {
                        self.offset += i as u64;
                        return (i, event);
                    }
                    continue;
                }
                _ => {
                    if self.in_header {
                        self.push_header(b);
                    }
                    self.step(b, at);
                }
            }
            i += 1;
        }
        self.offset += i as u64;
        (i, None)
    }

    fn step(&mut self, b: u8, at: u64) {
        match self.lex {
            Lex::Str => match b {
                b'\\' => self.lex = Lex::StrEscape,
                b'"' => self.lex = Lex::Code,
                _ => {}
            },
            Lex::StrEscape => self.lex = Lex::Str,
            Lex::Comment => {
                if b == b'\n' {
                    self.lex = Lex::Code;
                }
            }
            Lex::Slash => {
                if b == b'/' {
                    self.lex = Lex::Comment;
                } else {
                    self.lex = Lex::Code;
                    self.stmt_start = false;
                    self.step(b, at);
                }
            }
            Lex::Code if self.stmt_start => match b {
                b' ' | b'\t' | b'\r' | b'\n' | b';' => {}
                b'/' => self.lex = Lex::Slash,
                b'"' => {
                    self.stmt_start = false;
                    self.lex = Lex::Str;
                }
                b if is_word_start(b) => {
                    self.lex = Lex::Word;
                    self.word[0] = b;
                    self.word_len = 1;
                    self.word_start = at;
                }
                _ => self.stmt_start = false,
            },
            Lex::Code => match b {
                b'"' => self.lex = Lex::Str,
                b';' => {
                    self.stmt_start = true;
                    self.in_header = false;
                }
                _ => {}
            },
            Lex::Word => unreachable!("word bytes are handled by advance"),
        }
    }

    fn classify_word(&mut self) -> Option<Event> {
        let word = &self.word[..self.word_len.min(WORD_CAP)];
        let len = self.word_len;
        self.word_len = 0;
        if len > WORD_CAP {
            return None;
        }
        if word == CREATE_NODE {
            return Some(Event::Boundary(self.word_start));
        }
        if self.stop_at_trailer && TRAILER_WORDS.contains(&word) {
            return Some(Event::Trailer(self.word_start));
        }
        None
    }

    fn push_header(&mut self, b: u8) {
        if self.header.len() < HEADER_CAP {
            self.header.push(b);
        } else {
            self.header_overflow = true;
        }
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_terminator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b';')
}
