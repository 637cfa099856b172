// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node records and the scene-level parse summary.

use core::fmt;

/// Type recorded for nodes whose header could not be parsed.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Identifier of a node within one parse.
///
/// Ids are assigned in file order starting at zero, so they double as an
/// index into the record list of the parse that produced them. Ids from
/// different parses are unrelated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the node in parse order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How completely a single node was read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    /// Header parsed and span terminated normally.
    Complete,
    /// Header could not be parsed; the node type is [`UNKNOWN_TYPE`].
    Malformed,
    /// Input ended inside this node.
    Truncated,
}

/// One node of the scene and the byte span attributed to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    /// Id, unique within the parse.
    pub id: NodeId,
    /// Node name from the `-n` flag, empty if missing.
    pub name: String,
    /// Node type, or [`UNKNOWN_TYPE`] for malformed headers.
    pub node_type: String,
    /// Parent name from the `-p` flag.
    pub parent: Option<String>,
    /// Bytes from this node's marker up to the next marker or end of input.
    pub byte_size: u64,
    /// Absolute offset of the node marker.
    pub start_offset: u64,
    /// Absolute offset one past the node's last byte.
    pub end_offset: u64,
    /// Newlines inside the span.
    pub line_count: u64,
    /// Read status of this node.
    pub status: RecordStatus,
}

impl NodeRecord {
    /// Name for display, never empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }

    /// True if the node type is known.
    pub fn has_known_type(&self) -> bool {
        self.node_type != UNKNOWN_TYPE
    }
}

/// Overall outcome of a parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseStatus {
    /// Every node was read to a clean end.
    Complete,
    /// Input ended mid-node or a read failed part way; the last node is sized
    /// from the bytes that were available.
    Partial,
    /// No node was found.
    #[default]
    Empty,
}

/// Scene-level accounting produced alongside the records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Overall status.
    pub status: ParseStatus,
    /// Bytes read from the input.
    pub total_bytes: u64,
    /// Bytes before the first node, not attributed to any node.
    pub preamble_bytes: u64,
    /// Bytes after the connection section began, when that cut is enabled.
    pub trailer_bytes: u64,
    /// Records emitted.
    pub node_count: u64,
    /// Records whose header was malformed.
    pub malformed_count: u64,
    /// Read error that cut the input short, if any.
    pub interrupted: Option<String>,
}

impl ParseSummary {
    /// True if anything below the fatal tier was recorded.
    pub fn has_warnings(&self) -> bool {
        self.malformed_count > 0 || self.status == ParseStatus::Partial
    }
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {:.2} mb",
            self.node_count,
            self.total_bytes as f64 / 1_000_000.0
        )?;
        if self.malformed_count > 0 {
            write!(f, ", {} malformed headers", self.malformed_count)?;
        }
        match self.status {
            ParseStatus::Complete => {}
            ParseStatus::Partial => match &self.interrupted {
                Some(err) => write!(f, ", partial (read failed: {err})")?,
                None => f.write_str(", partial (file ends mid-node)")?,
            },
            ParseStatus::Empty => f.write_str(", empty scene")?,
        }
        Ok(())
    }
}
