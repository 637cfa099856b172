// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background parse → model → layout → index runs and snapshot publication.
//!
//! Each request runs on its own worker thread and reports through a
//! [`Completion`]. The published [`Snapshot`] lives in an [`ArcSwapOption`]:
//! readers load it without locking and see either the old snapshot or the new
//! one, never a mix.
//!
//! A new [`Pipeline::open`] cancels every in-flight run; a new
//! [`Pipeline::resize`] cancels in-flight resizes. Cancelled and failed runs
//! publish nothing, so the previous snapshot stays visible until a run
//! succeeds. Workers poll their [`CancelToken`] on every buffer read while
//! parsing and before every strip while laying out.
//!
//! Publication is serialized by a small lock so that the checks "still the
//! latest request" and "laid out at the latest bounds" hold at the moment the
//! snapshot is stored:
//!
//! - An open run re-lays out if the bounds moved while it was working.
//! - A resize run publishes only if the snapshot it started from is still
//!   current; otherwise a newer scene arrived, and that run has already
//!   picked up the new bounds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use arc_swap::ArcSwapOption;
use kurbo::Rect;
use scenemap_parse::ParseOptions;
use scenemap_treemap::{LayoutConfig, TreemapLayout};
use tracing::{debug, info, info_span};

use crate::error::Error;
use crate::snapshot::Snapshot;
use crate::source::SceneSource;

/// Default view size, matching a tall side panel.
pub const DEFAULT_BOUNDS: Rect = Rect::new(0.0, 0.0, 600.0, 1000.0);

/// Configuration for a view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Layout options.
    pub layout: LayoutConfig,
    /// Parser options.
    pub parse: ParseOptions,
    /// Initial bounds.
    pub bounds: Rect,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            parse: ParseOptions::default(),
            bounds: DEFAULT_BOUNDS,
        }
    }
}

/// Shared cancellation flag for one run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-shot result of a pipeline run.
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<Result<Arc<Snapshot>, Error>>,
}

impl Completion {
    /// Block until the run finishes.
    pub fn wait(self) -> Result<Arc<Snapshot>, Error> {
        self.rx.recv().unwrap_or(Err(Error::WorkerLost))
    }

    /// The result, if the run has finished. Yields it at most once.
    pub fn try_get(&self) -> Option<Result<Arc<Snapshot>, Error>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::WorkerLost)),
        }
    }
}

#[derive(Debug)]
struct Shared {
    current: ArcSwapOption<Snapshot>,
    bounds: Mutex<Rect>,
    publish: Mutex<()>,
}

/// Runs scene loads and resizes off the calling thread.
///
/// Dropping the pipeline cancels in-flight runs without waiting for them.
#[derive(Debug)]
pub struct Pipeline {
    shared: Arc<Shared>,
    config: ViewConfig,
    open_token: CancelToken,
    resize_token: CancelToken,
}

impl Pipeline {
    /// A pipeline with nothing published.
    pub fn new(config: ViewConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                current: ArcSwapOption::empty(),
                bounds: Mutex::new(config.bounds),
                publish: Mutex::new(()),
            }),
            config,
            open_token: CancelToken::new(),
            resize_token: CancelToken::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.shared.current.load_full()
    }

    /// The bounds of the most recent request.
    pub fn bounds(&self) -> Rect {
        *lock(&self.shared.bounds)
    }

    /// Parse `source` and lay it out at `bounds`, replacing the current scene.
    ///
    /// Cancels every run still in flight.
    pub fn open(&mut self, source: SceneSource, bounds: Rect) -> Completion {
        self.cancel();
        *lock(&self.shared.bounds) = bounds;
        let token = CancelToken::new();
        self.open_token = token.clone();

        let shared = Arc::clone(&self.shared);
        let layout = TreemapLayout::new(self.config.layout);
        let parse = self.config.parse;
        spawn("scenemap-open", move || {
            run_open(&shared, &source, parse, &layout, &token)
        })
    }

    /// Lay out the current scene again at `bounds`, without re-parsing.
    ///
    /// Cancels in-flight resizes. Fails with [`Error::NoSnapshot`] if nothing
    /// has been published yet; a load in flight will use the new bounds.
    pub fn resize(&mut self, bounds: Rect) -> Completion {
        {
            let _publish = lock(&self.shared.publish);
            self.resize_token.cancel();
        }
        *lock(&self.shared.bounds) = bounds;
        let token = CancelToken::new();
        self.resize_token = token.clone();

        let shared = Arc::clone(&self.shared);
        let layout = TreemapLayout::new(self.config.layout);
        spawn("scenemap-resize", move || {
            run_resize(&shared, &layout, bounds, &token)
        })
    }

    /// Cancel every run in flight. The published snapshot is kept.
    pub fn cancel(&mut self) {
        let _publish = lock(&self.shared.publish);
        self.open_token.cancel();
        self.resize_token.cancel();
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.open_token.cancel();
        self.resize_token.cancel();
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn spawn<F>(name: &str, job: F) -> Completion
where
    F: FnOnce() -> Result<Arc<Snapshot>, Error> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(name.to_owned())
        .spawn(move || {
            // The requester may have stopped listening.
            let _ = worker_tx.send(job());
        });
    if let Err(err) = spawned {
        let _ = tx.send(Err(Error::Spawn(err)));
    }
    Completion { rx }
}

fn run_open(
    shared: &Shared,
    source: &SceneSource,
    parse: ParseOptions,
    layout: &TreemapLayout,
    token: &CancelToken,
) -> Result<Arc<Snapshot>, Error> {
    let span = info_span!("open", source = ?source);
    let _enter = span.enter();

    let scene = Arc::new(source.load_until(parse, token)?);
    loop {
        let bounds = *lock(&shared.bounds);
        let snapshot = Arc::new(Snapshot::build_until(
            Arc::clone(&scene),
            layout,
            bounds,
            token,
        )?);

        let _publish = lock(&shared.publish);
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if *lock(&shared.bounds) != bounds {
            debug!("bounds changed during layout, laying out again");
            continue;
        }
        shared.current.store(Some(Arc::clone(&snapshot)));
        info!(
            title = scene.title(),
            summary = %scene.summary(),
            tiles = snapshot.treemap().len(),
            "published scene"
        );
        return Ok(snapshot);
    }
}

fn run_resize(
    shared: &Shared,
    layout: &TreemapLayout,
    bounds: Rect,
    token: &CancelToken,
) -> Result<Arc<Snapshot>, Error> {
    let base = {
        let _publish = lock(&shared.publish);
        shared.current.load_full()
    }
    .ok_or(Error::NoSnapshot)?;

    let snapshot = Arc::new(Snapshot::build_until(
        Arc::clone(base.scene()),
        layout,
        bounds,
        token,
    )?);

    publish_resize(shared, &base, snapshot, token)
}

fn publish_resize(
    shared: &Shared,
    base: &Arc<Snapshot>,
    snapshot: Arc<Snapshot>,
    token: &CancelToken,
) -> Result<Arc<Snapshot>, Error> {
    let _publish = lock(&shared.publish);
    let still_current = shared
        .current
        .load()
        .as_ref()
        .is_some_and(|cur| Arc::ptr_eq(cur, base));
    if token.is_cancelled() || !still_current {
        return Err(Error::Cancelled);
    }
    shared.current.store(Some(Arc::clone(&snapshot)));
    let bounds = snapshot.bounds();
    debug!(
        width = bounds.width(),
        height = bounds.height(),
        "published resize"
    );
    Ok(snapshot)
}
