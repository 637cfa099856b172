// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streaming node parser.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use memchr::memchr_iter;
use tracing::{debug, warn};

use crate::error::SceneError;
use crate::header::Header;
use crate::record::{
    NodeId, NodeRecord, ParseStatus, ParseSummary, RecordStatus, UNKNOWN_TYPE,
};
use crate::scanner::{Event, Scanner};

/// Options for a parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// End the last node at the first top-level `connectAttr` or `select`
    /// statement and report the rest as trailer bytes.
    pub stop_at_connections: bool,
}

/// Node currently being measured.
#[derive(Copy, Clone, Debug)]
struct OpenNode {
    start: u64,
    lines: u64,
}

/// Lazy single-pass parser yielding one [`NodeRecord`] per node.
///
/// Each record is produced as soon as the next node marker, or the end of
/// input, has been seen. Only the current node's header is buffered, so memory
/// stays constant regardless of file size. The iterator is finite and cannot
/// be restarted; the [`ParseSummary`] is final once it returns `None`.
///
/// ```rust
/// use scenemap_parse::{ParseStatus, SceneParser};
///
/// let src = b"createNode transform -n \"a\";\ncreateNode mesh -n \"aShape\" -p \"a\";\n";
/// let mut parser = SceneParser::new(&src[..]);
/// let records: Vec<_> = parser.by_ref().collect();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].node_type, "mesh");
/// assert_eq!(records[0].byte_size + records[1].byte_size, src.len() as u64);
/// assert_eq!(parser.summary().status, ParseStatus::Complete);
/// ```
#[derive(Debug)]
pub struct SceneParser<R> {
    reader: R,
    scanner: Scanner,
    current: Option<OpenNode>,
    queued: Option<NodeRecord>,
    summary: ParseSummary,
    next_id: u32,
    done: bool,
}

impl SceneParser<BufReader<File>> {
    /// Open a scene file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        Self::open_with(path, ParseOptions::default())
    }

    /// Open a scene file for parsing with options.
    pub fn open_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self, SceneError> {
        open_reader(path).map(|reader| Self::with_options(reader, options))
    }
}

/// Open a scene file as a buffered reader, rejecting anything that is not a
/// regular file.
///
/// [`SceneParser::open_with`] is this plus [`SceneParser::with_options`]; use
/// it directly to wrap the reader before parsing.
pub fn open_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, SceneError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SceneError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let meta = file.metadata().map_err(|source| SceneError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(SceneError::NotAFile(path.to_path_buf()));
    }
    debug!(path = %path.display(), bytes = meta.len(), "opened scene file");
    Ok(BufReader::with_capacity(64 * 1024, file))
}

impl<R: BufRead> SceneParser<R> {
    /// Parse from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    /// Parse from a buffered reader with options.
    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            reader,
            scanner: Scanner::new(options.stop_at_connections),
            current: None,
            queued: None,
            summary: ParseSummary::default(),
            next_id: 0,
            done: false,
        }
    }

    /// Accounting so far; final once the iterator is exhausted.
    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    /// Drain all remaining records and return them with the final summary.
    pub fn finish(mut self) -> (Vec<NodeRecord>, ParseSummary) {
        let records = self.by_ref().collect();
        (records, self.summary)
    }

    fn read_next(&mut self) -> Option<NodeRecord> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(
                        offset = self.scanner.offset(),
                        error = %err,
                        "read failed, treating scene as truncated"
                    );
                    self.summary.interrupted = Some(err.to_string());
                    return self.end_of_input();
                }
            };
            if buf.is_empty() {
                return self.end_of_input();
            }
            let (n, event) = self.scanner.advance(buf);
            let lines = memchr_iter(b'\n', &buf[..n]).count() as u64;
            self.reader.consume(n);
            self.summary.total_bytes += n as u64;
            if let Some(open) = &mut self.current {
                open.lines += lines;
            }
            match event {
                None => {}
                Some(Event::Boundary(at)) => {
                    if let Some(record) = self.boundary(at) {
                        return Some(record);
                    }
                }
                Some(Event::Trailer(at)) => {
                    self.drain();
                    return self.end_at_trailer(at);
                }
            }
        }
    }

    /// A node opens at `at`: close the previous one and start measuring.
    fn boundary(&mut self, at: u64) -> Option<NodeRecord> {
        if self.next_id == 0 && self.current.is_none() {
            self.summary.preamble_bytes = at;
        }
        let closed = self.close(at, false);
        self.current = Some(OpenNode { start: at, lines: 0 });
        self.scanner.begin_header();
        closed
    }

    fn close(&mut self, end: u64, truncated: bool) -> Option<NodeRecord> {
        let open = self.current.take()?;
        let (raw, overflow) = self.scanner.take_header();
        let header = Header::parse(&raw);
        let malformed = overflow || !header.is_well_formed();
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let status = if truncated {
            RecordStatus::Truncated
        } else if malformed {
            RecordStatus::Malformed
        } else {
            RecordStatus::Complete
        };
        if malformed {
            self.summary.malformed_count += 1;
            debug!(
                %id,
                offset = open.start,
                overflow,
                header = %String::from_utf8_lossy(&raw[..raw.len().min(80)]),
                "malformed node header"
            );
        }
        self.summary.node_count += 1;

        let node_type = match header.node_type {
            Some(t) if !malformed => t,
            _ => UNKNOWN_TYPE.to_owned(),
        };
        Some(NodeRecord {
            id,
            name: header.name.unwrap_or_default(),
            node_type,
            parent: header.parent,
            byte_size: end - open.start,
            start_offset: open.start,
            end_offset: end,
            line_count: open.lines,
            status,
        })
    }

    fn drain(&mut self) {
        loop {
            let n = match self.reader.fill_buf() {
                Ok([]) => return,
                Ok(buf) => buf.len(),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(error = %err, "read failed inside trailer");
                    self.summary.interrupted = Some(err.to_string());
                    return;
                }
            };
            self.reader.consume(n);
            self.summary.total_bytes += n as u64;
        }
    }

    fn end_at_trailer(&mut self, at: u64) -> Option<NodeRecord> {
        self.done = true;
        self.summary.trailer_bytes = self.summary.total_bytes - at;
        let last = self.close(at, false);
        self.settle(false);
        last
    }

    fn end_of_input(&mut self) -> Option<NodeRecord> {
        self.done = true;
        let mut end = self.scanner.offset();
        let mut first = None;
        let mut trailer = false;
        match self.scanner.finish() {
            Some(Event::Boundary(at)) => first = self.boundary(at),
            Some(Event::Trailer(at)) => {
                self.summary.trailer_bytes = self.summary.total_bytes - at;
                end = at;
                trailer = true;
            }
            None => {}
        }
        let interrupted = self.summary.interrupted.is_some();
        let truncated = interrupted || (!trailer && self.scanner.mid_statement());
        let last = self.close(end, truncated);
        self.settle(truncated);
        match first {
            Some(first) => {
                self.queued = last;
                Some(first)
            }
            None => last,
        }
    }

    fn settle(&mut self, truncated: bool) {
        if self.summary.node_count == 0 {
            // No node ever opened: everything before the trailer is preamble.
            self.summary.preamble_bytes = self.summary.total_bytes - self.summary.trailer_bytes;
        }
        self.summary.status = if self.summary.node_count == 0 {
            ParseStatus::Empty
        } else if truncated {
            ParseStatus::Partial
        } else {
            ParseStatus::Complete
        };
        debug!(summary = %self.summary, "parse finished");
    }
}

impl<R: BufRead> Iterator for SceneParser<R> {
    type Item = NodeRecord;

    fn next(&mut self) -> Option<NodeRecord> {
        if let Some(record) = self.queued.take() {
            return Some(record);
        }
        if self.done {
            return None;
        }
        self.read_next()
    }
}

impl<R: BufRead> core::iter::FusedIterator for SceneParser<R> {}

/// Parse an in-memory scene in one call.
pub fn parse_bytes(bytes: &[u8]) -> (Vec<NodeRecord>, ParseSummary) {
    parse_bytes_with(bytes, ParseOptions::default())
}

/// Parse an in-memory scene in one call, with options.
pub fn parse_bytes_with(bytes: &[u8], options: ParseOptions) -> (Vec<NodeRecord>, ParseSummary) {
    SceneParser::with_options(bytes, options).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};

    const SCENE: &[u8] = b"//Maya ASCII 2024 scene\n\
requires maya \"2024\";\n\
createNode transform -n \"pSphere1\";\n\
\trename -uid \"A\";\n\
createNode mesh -n \"pSphereShape1\" -p \"pSphere1\";\n\
\tsetAttr -k off \".v\";\n\
\tsetAttr \".notes\" -type \"string\" \"createNode fake -n \\\"x\\\";\";\n\
createNode lightLinker -s -n \"lightLinker1\";\n";

    #[test]
    fn spans_tile_the_file_after_the_preamble() {
        let (records, summary) = parse_bytes(SCENE);
        assert_eq!(records.len(), 3);
        assert_eq!(summary.status, ParseStatus::Complete);
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.malformed_count, 0);
        assert_eq!(summary.total_bytes, SCENE.len() as u64);
        assert_eq!(summary.preamble_bytes, records[0].start_offset);

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["pSphere1", "pSphereShape1", "lightLinker1"]);
        assert_eq!(records[1].parent.as_deref(), Some("pSphere1"));

        for pair in records.windows(2) {
            assert_eq!(pair[0].end_offset, pair[1].start_offset);
        }
        let attributed: u64 = records.iter().map(|r| r.byte_size).sum();
        assert_eq!(attributed + summary.preamble_bytes, summary.total_bytes);
        assert!(records.iter().all(|r| r.status == RecordStatus::Complete));
    }

    #[test]
    fn ids_are_unique_and_in_file_order() {
        let (records, _) = parse_bytes(SCENE);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.id.index(), i);
        }
    }

    #[test]
    fn counts_lines_per_node() {
        let (records, _) = parse_bytes(SCENE);
        assert_eq!(records[0].line_count, 2);
        assert_eq!(records[1].line_count, 3);
        assert_eq!(records[2].line_count, 1);
    }

    #[test]
    fn truncated_after_third_marker() {
        let full = SCENE;
        let third = full
            .windows(22)
            .position(|w| w == b"createNode lightLinker")
            .unwrap();
        let cut = &full[..third + b"createNode".len()];
        let (records, summary) = parse_bytes(cut);
        assert_eq!(records.len(), 3);
        assert_eq!(summary.status, ParseStatus::Partial);
        let last = &records[2];
        assert_eq!(last.byte_size, b"createNode".len() as u64);
        assert_eq!(last.end_offset, cut.len() as u64);
        assert_eq!(last.status, RecordStatus::Truncated);
        assert_eq!(last.node_type, UNKNOWN_TYPE);
    }

    #[test]
    fn truncated_inside_string_is_partial() {
        let src = b"createNode transform -n \"a\";\ncreateNode mesh -n \"b\";\nsetAttr \".s\" -type \"string\" \"unfinis";
        let (records, summary) = parse_bytes(src);
        assert_eq!(records.len(), 2);
        assert_eq!(summary.status, ParseStatus::Partial);
        assert_eq!(records[1].status, RecordStatus::Truncated);
        // The header itself was fine.
        assert_eq!(records[1].node_type, "mesh");
        assert_eq!(records[1].end_offset, src.len() as u64);
    }

    #[test]
    fn malformed_header_keeps_the_node() {
        let src = b"createNode -n \"broken\";\n\tsetAttr \".a\" 1;\n";
        let (records, summary) = parse_bytes(src);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node_type, UNKNOWN_TYPE);
        assert_eq!(records[0].name, "broken");
        assert!(records[0].byte_size > 0);
        assert_eq!(records[0].status, RecordStatus::Malformed);
        assert_eq!(summary.malformed_count, 1);
        assert_eq!(summary.status, ParseStatus::Complete);
    }

    #[test]
    fn unnamed_nodes_keep_their_type() {
        let src = b"createNode transform;\ncreateNode mesh -n;\ncreateNode joint -n \"j\";\n";
        let (records, summary) = parse_bytes(src);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].node_type, "transform");
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].status, RecordStatus::Complete);

        // A name flag with nothing after it is a broken header.
        assert_eq!(records[1].node_type, UNKNOWN_TYPE);
        assert_eq!(records[1].status, RecordStatus::Malformed);

        assert_eq!(records[2].status, RecordStatus::Complete);
        assert_eq!(summary.malformed_count, 1);
    }

    #[test]
    fn oversized_header_is_malformed() {
        let mut src = b"createNode transform -n \"".to_vec();
        src.extend(core::iter::repeat_n(b'x', 20 * 1024));
        src.extend_from_slice(b"\";\n");
        let (records, summary) = parse_bytes(&src);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, RecordStatus::Malformed);
        assert_eq!(records[0].byte_size, src.len() as u64);
        assert_eq!(summary.malformed_count, 1);
    }

    #[test]
    fn empty_input_is_empty() {
        let (records, summary) = parse_bytes(b"");
        assert!(records.is_empty());
        assert_eq!(summary.status, ParseStatus::Empty);

        let (records, summary) = parse_bytes(b"requires maya \"2024\";\n");
        assert!(records.is_empty());
        assert_eq!(summary.status, ParseStatus::Empty);
        assert_eq!(summary.total_bytes, 22);
    }

    #[test]
    fn reparse_is_identical() {
        assert_eq!(parse_bytes(SCENE), parse_bytes(SCENE));
    }

    #[test]
    fn tiny_buffers_give_the_same_records() {
        let whole = parse_bytes(SCENE);
        for cap in [1, 2, 3, 7, 64] {
            let reader = io::BufReader::with_capacity(cap, SCENE);
            assert_eq!(SceneParser::new(reader).finish(), whole, "capacity {cap}");
        }
    }

    #[test]
    fn connections_become_trailer_when_enabled() {
        let mut src = SCENE.to_vec();
        let tail = b"select -ne :time1;\nconnectAttr \"a.o\" \"b.i\";\n";
        src.extend_from_slice(tail);
        let options = ParseOptions {
            stop_at_connections: true,
        };
        let (records, summary) = parse_bytes_with(&src, options);
        assert_eq!(records.len(), 3);
        assert_eq!(summary.trailer_bytes, tail.len() as u64);
        assert_eq!(records[2].end_offset, SCENE.len() as u64);
        assert_eq!(summary.total_bytes, src.len() as u64);
        assert_eq!(summary.status, ParseStatus::Complete);

        let (records, summary) = parse_bytes(&src);
        assert_eq!(summary.trailer_bytes, 0);
        assert_eq!(records[2].end_offset, src.len() as u64);
    }

    #[test]
    fn trailer_without_nodes_splits_preamble_and_trailer() {
        let head = b"//Maya ASCII 2024 scene\nrequires maya \"2024\";\n";
        let tail = b"connectAttr \"a.o\" \"b.i\";\nselect -ne :time1;\n";
        let src = [&head[..], &tail[..]].concat();
        let options = ParseOptions {
            stop_at_connections: true,
        };
        let (records, summary) = parse_bytes_with(&src, options);
        assert!(records.is_empty());
        assert_eq!(summary.status, ParseStatus::Empty);
        assert_eq!(summary.trailer_bytes, tail.len() as u64);
        assert_eq!(summary.preamble_bytes, head.len() as u64);
        assert_eq!(
            summary.preamble_bytes + summary.trailer_bytes,
            summary.total_bytes,
            "every byte is preamble or trailer"
        );

        // Without the cut the whole file is preamble.
        let (_, summary) = parse_bytes(&src);
        assert_eq!(summary.preamble_bytes, src.len() as u64);
    }

    /// Reader that fails after yielding a prefix.
    struct Failing<'a> {
        data: &'a [u8],
    }

    impl Read for Failing<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("disk went away"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_error_is_a_truncation() {
        let reader = io::BufReader::with_capacity(16, Failing { data: SCENE });
        let (records, summary) = SceneParser::new(reader).finish();
        assert_eq!(records.len(), 3);
        assert_eq!(summary.status, ParseStatus::Partial);
        assert_eq!(summary.interrupted.as_deref(), Some("disk went away"));
        assert_eq!(records[2].status, RecordStatus::Truncated);
        assert_eq!(records[2].end_offset, SCENE.len() as u64);
    }

    #[test]
    fn records_arrive_before_end_of_input() {
        let mut parser = SceneParser::new(io::BufReader::with_capacity(8, SCENE));
        let first = parser.next().unwrap();
        assert_eq!(first.name, "pSphere1");
        assert!(parser.summary().total_bytes < SCENE.len() as u64);
    }
}
