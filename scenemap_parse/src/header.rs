// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node header parsing: `createNode <type> [-n <name>] [-p <parent>] [-s] [-ss];`.

/// Fields recovered from a node header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) node_type: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<String>,
    /// `-n` appeared without a usable value.
    pub(crate) dangling_name: bool,
}

impl Header {
    /// Parse raw header bytes. Unknown flags are skipped.
    pub(crate) fn parse(raw: &[u8]) -> Self {
        let mut tokens = Tokens { raw, pos: 0 };
        let mut header = Self::default();
        if tokens.next().as_deref() != Some("createNode") {
            return header;
        }
        header.node_type = tokens.next_value().filter(|t| is_identifier(t));
        while let Some(flag) = tokens.next() {
            match flag.as_str() {
                "-n" | "-name" => {
                    header.name = tokens.next_value().filter(|n| !n.is_empty());
                    header.dangling_name = header.name.is_none();
                }
                "-p" | "-parent" => header.parent = tokens.next_value(),
                _ => {}
            }
        }
        header
    }

    /// A header is well formed when the type was recovered and any `-n` flag
    /// carries a name. Without `-n` the host picks the name, so none is needed.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.node_type.is_some() && !self.dangling_name
    }
}

/// Whitespace-separated tokens; double quotes group and are removed.
struct Tokens<'a> {
    raw: &'a [u8],
    pos: usize,
}

impl Tokens<'_> {
    fn next(&mut self) -> Option<String> {
        let raw = self.raw;
        while self.pos < raw.len() && is_space(raw[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= raw.len() || raw[self.pos] == b';' {
            return None;
        }
        let mut out = Vec::new();
        let mut quoted = false;
        while self.pos < raw.len() {
            let b = raw[self.pos];
            match b {
                b'"' => quoted = !quoted,
                b'\\' if quoted => {
                    self.pos += 1;
                    if let Some(&escaped) = raw.get(self.pos) {
                        out.push(escaped);
                    }
                }
                b';' if !quoted => break,
                b if !quoted && is_space(b) => break,
                _ => out.push(b),
            }
            self.pos += 1;
        }
        Some(String::from_utf8_lossy(&out).into_owned())
    }

    /// The value following a flag; another flag is not a value.
    fn next_value(&mut self) -> Option<String> {
        let save = self.pos;
        match self.next() {
            Some(v) if !v.starts_with('-') => Some(v),
            _ => {
                self.pos = save;
                None
            }
        }
    }
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
