// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenemap Parse: a streaming node-size scanner for Maya ASCII scene files.
//!
//! A scene file is a sequence of statements. Each `createNode` statement
//! opens a node, and every byte up to the next `createNode` (or the end of
//! the file) is attributed to that node: its attribute values, connections
//! recorded inline, and so on. The resulting [`NodeRecord`]s say how much of
//! the file each node accounts for.
//!
//! - Single forward pass, constant memory apart from the current node header.
//! - Node markers are only recognized at a statement start and outside quoted
//!   strings, so scripts and notes that mention `createNode` are not split.
//! - Nothing short of failing to open the file is fatal. Malformed headers,
//!   truncated files and read errors are recorded in the [`ParseSummary`].
//!
//! ```rust
//! use scenemap_parse::{ParseStatus, parse_bytes};
//!
//! let src = b"requires maya \"2024\";\n\
//!             createNode transform -n \"root\";\n\
//!             createNode mesh -n \"rootShape\" -p \"root\";\n\
//!             \tsetAttr \".vt\" -type \"string\" \"createNode not_a_node;\";\n";
//! let (records, summary) = parse_bytes(src);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].name, "rootShape");
//! assert_eq!(records[1].parent.as_deref(), Some("root"));
//! assert_eq!(summary.status, ParseStatus::Complete);
//! assert_eq!(summary.preamble_bytes, 22);
//! ```

mod error;
mod header;
mod parser;
mod record;
mod scanner;

pub use error::SceneError;
pub use parser::{ParseOptions, SceneParser, open_reader, parse_bytes, parse_bytes_with};
pub use record::{
    NodeId, NodeRecord, ParseStatus, ParseSummary, RecordStatus, UNKNOWN_TYPE,
};
