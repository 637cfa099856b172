// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;

use scenemap_parse::SceneError;

/// Errors surfaced by the scene pipeline.
///
/// Only [`Error::File`] and [`Error::HostUnavailable`] describe a problem with
/// the input. Corrupt headers, truncation and empty scenes are not errors;
/// they are reported in the [`ParseSummary`](scenemap_parse::ParseSummary).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The scene file could not be opened.
    #[error(transparent)]
    File(#[from] SceneError),
    /// A newer request superseded this one before it finished.
    #[error("request was superseded by a newer one")]
    Cancelled,
    /// A resize was requested before any scene was published.
    #[error("no scene has been loaded")]
    NoSnapshot,
    /// The host could not provide its current scene.
    #[error("host scene unavailable: {0}")]
    HostUnavailable(String),
    /// The worker thread could not be started.
    #[error("failed to start pipeline worker")]
    Spawn(#[source] io::Error),
    /// The worker thread ended without reporting a result.
    #[error("pipeline worker exited without a result")]
    WorkerLost,
}
