// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where scene text comes from, and turning it into a [`Scene`].

use std::fmt;
use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use scenemap_parse::{ParseOptions, SceneParser, open_reader};
use tracing::{debug, info_span, warn};

use crate::error::Error;
use crate::pipeline::CancelToken;
use crate::scene::Scene;

/// Title used for scenes supplied by the host rather than a file.
pub const HOST_SCENE_TITLE: &str = "Current Scene";

/// Host application collaborator that owns the open scene.
pub trait SceneProvider: Send + Sync {
    /// Path of the open scene if it is saved, unmodified, and already in the
    /// textual format; reading it directly avoids an export.
    fn saved_scene(&self) -> Option<PathBuf>;

    /// Serialize the open scene to scene text.
    fn export_scene(&self) -> Result<Vec<u8>, String>;

    /// Title for the view.
    fn title(&self) -> String {
        HOST_SCENE_TITLE.to_owned()
    }
}

/// Input to a parse.
#[derive(Clone)]
pub enum SceneSource {
    /// A scene file on disk.
    Path(PathBuf),
    /// Scene text already in memory.
    Bytes {
        /// Title for the view.
        title: String,
        /// The scene text.
        bytes: Arc<[u8]>,
    },
    /// Whatever scene the host has open.
    Host(Arc<dyn SceneProvider>),
}

impl fmt::Debug for SceneSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Bytes { title, bytes } => f
                .debug_struct("Bytes")
                .field("title", title)
                .field("len", &bytes.len())
                .finish(),
            Self::Host(p) => f.debug_tuple("Host").field(&p.title()).finish(),
        }
    }
}

impl SceneSource {
    /// A scene file.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// In-memory scene text.
    pub fn bytes(title: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes {
            title: title.into(),
            bytes: bytes.into(),
        }
    }

    /// Parse the source to completion on the calling thread.
    pub fn load(&self, options: ParseOptions) -> Result<Scene, Error> {
        self.load_until(options, &CancelToken::new())
    }

    pub(crate) fn load_until(
        &self,
        options: ParseOptions,
        cancel: &CancelToken,
    ) -> Result<Scene, Error> {
        match self {
            Self::Path(path) => load_path(path, file_title(path), options, cancel),
            Self::Bytes { title, bytes } => collect(&bytes[..], options, title.clone(), cancel),
            Self::Host(provider) => {
                let title = provider.title();
                if let Some(path) = provider.saved_scene() {
                    debug!(path = %path.display(), "reading saved host scene");
                    return load_path(&path, title, options, cancel);
                }
                debug!("exporting host scene");
                let bytes = provider.export_scene().map_err(Error::HostUnavailable)?;
                collect(&bytes[..], options, title, cancel)
            }
        }
    }
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn load_path(
    path: &Path,
    title: String,
    options: ParseOptions,
    cancel: &CancelToken,
) -> Result<Scene, Error> {
    collect(open_reader(path)?, options, title, cancel)
}

/// Reader that fails every read once its token is cancelled, so a parse stops
/// within one buffer even inside a single huge node.
struct Cancellable<'a, R> {
    inner: R,
    cancel: &'a CancelToken,
}

impl<R> Cancellable<'_, R> {
    fn check(&self) -> io::Result<()> {
        if self.cancel.is_cancelled() {
            return Err(io::Error::other("parse cancelled"));
        }
        Ok(())
    }
}

impl<R: Read> Read for Cancellable<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.check()?;
        self.inner.read(buf)
    }
}

impl<R: BufRead> BufRead for Cancellable<'_, R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.check()?;
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

fn collect<R: BufRead>(
    reader: R,
    options: ParseOptions,
    title: String,
    cancel: &CancelToken,
) -> Result<Scene, Error> {
    let mut parser = SceneParser::with_options(Cancellable { inner: reader, cancel }, options);
    let span = info_span!("parse", title = %title);
    let _enter = span.enter();
    let start = Instant::now();

    let records: Vec<_> = parser.by_ref().collect();
    if cancel.is_cancelled() {
        debug!(records = records.len(), "parse cancelled");
        return Err(Error::Cancelled);
    }

    let summary = parser.summary().clone();
    let elapsed = start.elapsed();
    let secs = elapsed.as_secs_f64();
    let mb_per_s = if secs > 0.0 {
        summary.total_bytes as f64 / 1_000_000.0 / secs
    } else {
        0.0
    };
    debug!(
        nodes = summary.node_count,
        bytes = summary.total_bytes,
        elapsed_ms = secs * 1000.0,
        mb_per_s,
        "parsed scene"
    );
    if summary.has_warnings() {
        warn!(%summary, "scene parsed with warnings");
    }
    Ok(Scene::new(title, records, summary))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::BufReader;
    use std::sync::Mutex;

    use scenemap_parse::{ParseStatus, SceneError};

    use super::*;

    struct FakeHost {
        saved: Option<PathBuf>,
        exported: Result<Vec<u8>, String>,
        exports: Mutex<usize>,
    }

    impl SceneProvider for FakeHost {
        fn saved_scene(&self) -> Option<PathBuf> {
            self.saved.clone()
        }

        fn export_scene(&self) -> Result<Vec<u8>, String> {
            *self.exports.lock().unwrap() += 1;
            self.exported.clone()
        }
    }

    #[test]
    fn bytes_keep_their_title() {
        let src = SceneSource::bytes("inline", &b"createNode transform -n \"a\";\n"[..]);
        let scene = src.load(ParseOptions::default()).unwrap();
        assert_eq!(scene.title(), "inline");
        assert_eq!(scene.records().len(), 1);
    }

    #[test]
    fn unsaved_host_scene_is_exported() {
        let host = Arc::new(FakeHost {
            saved: None,
            exported: Ok(b"createNode mesh -n \"m\";\n".to_vec()),
            exports: Mutex::new(0),
        });
        let scene = SceneSource::Host(host.clone())
            .load(ParseOptions::default())
            .unwrap();
        assert_eq!(scene.title(), HOST_SCENE_TITLE);
        assert_eq!(scene.records()[0].node_type, "mesh");
        assert_eq!(*host.exports.lock().unwrap(), 1);
    }

    #[test]
    fn failed_export_is_host_unavailable() {
        let host = Arc::new(FakeHost {
            saved: None,
            exported: Err("no scene open".to_owned()),
            exports: Mutex::new(0),
        });
        let err = SceneSource::Host(host).load(ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::HostUnavailable(ref m) if m == "no scene open"));
    }

    #[test]
    fn saved_host_scene_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.ma");
        std::fs::write(&path, b"createNode joint -n \"j\";\n").unwrap();
        let host = Arc::new(FakeHost {
            saved: Some(path),
            exported: Err("should not export".to_owned()),
            exports: Mutex::new(0),
        });
        let scene = SceneSource::Host(host.clone())
            .load(ParseOptions::default())
            .unwrap();
        assert_eq!(scene.records()[0].node_type, "joint");
        assert_eq!(*host.exports.lock().unwrap(), 0);
    }

    #[test]
    fn path_title_is_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ma");
        std::fs::write(&path, b"").unwrap();
        let scene = SceneSource::path(&path).load(ParseOptions::default()).unwrap();
        assert_eq!(scene.title(), "empty.ma");
        assert_eq!(scene.summary().status, ParseStatus::Empty);
        assert!(scene.is_empty());
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = SceneSource::path("/definitely/not/here.ma")
            .load(ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::File(SceneError::Open { .. })));
    }

    #[test]
    fn cancelled_token_stops_the_parse() {
        let token = CancelToken::new();
        token.cancel();
        let src = SceneSource::bytes("x", &b"createNode transform -n \"a\";\n"[..]);
        let err = src.load_until(ParseOptions::default(), &token).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    /// Serves scene text and cancels `token` on the first read.
    struct CancelOnRead<'a> {
        data: &'a [u8],
        token: &'a CancelToken,
        served: &'a Cell<usize>,
    }

    impl Read for CancelOnRead<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.token.cancel();
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            self.served.set(self.served.get() + n);
            Ok(n)
        }
    }

    #[test]
    fn cancel_inside_one_large_node_stops_reading() {
        let mut text = b"createNode mesh -n \"huge\";\n\tsetAttr \".vt\"".to_vec();
        for _ in 0..100_000 {
            text.extend_from_slice(b" 0.5");
        }
        text.extend_from_slice(b";\n");

        let token = CancelToken::new();
        let served = Cell::new(0);
        let reader = BufReader::with_capacity(
            4096,
            CancelOnRead {
                data: &text,
                token: &token,
                served: &served,
            },
        );
        let err = collect(reader, ParseOptions::default(), "huge".to_owned(), &token)
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled), "{err}");
        assert_eq!(served.get(), 4096, "kept reading after cancel");
    }
}
