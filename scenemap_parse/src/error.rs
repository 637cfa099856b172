// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

/// Fatal errors opening a scene.
///
/// Everything that can go wrong after the file is open (malformed headers,
/// truncation, read failures) is recorded in the
/// [`ParseSummary`](crate::ParseSummary) instead.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The file could not be opened or inspected.
    #[error("cannot open scene file {}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The path exists but is not a regular file.
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
}
