// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenemap: which nodes make a Maya ASCII scene big.
//!
//! The pipeline runs in four stages, each in its own crate:
//!
//! 1. [`scenemap_parse`] streams the scene file and attributes every byte to
//!    the node that declared it.
//! 2. [`scenemap_treemap::SizeModel`] ranks the nodes and totals them by type.
//! 3. [`scenemap_treemap::TreemapLayout`] tiles a rectangle with one
//!    squarified tile per node.
//! 4. [`InteractionIndex`] answers "which node is under the pointer" and turns
//!    clicks into [`HostCommand`](scenemap_responder::events::HostCommand)s.
//!
//! This crate ties them together. [`Pipeline`] runs the stages on a worker
//! thread and publishes an immutable [`Snapshot`] that renderers read without
//! locking; the rest is presentation: type [colors](color), tile
//! [labels](label) and tooltips.
//!
//! ```rust
//! use kurbo::Rect;
//! use scenemap::{Pipeline, SceneSource, ViewConfig};
//! use scenemap_responder::events::RecordingHost;
//!
//! let scene = b"createNode transform -n \"ball\";\n\
//!               createNode mesh -n \"ballShape\" -p \"ball\";\n\
//!               \tsetAttr \".vt\" -type \"float3\" 0 0 0 1 1 1 2 2 2;\n";
//! let mut pipeline = Pipeline::new(ViewConfig::default());
//! let snapshot = pipeline
//!     .open(SceneSource::bytes("ball.ma", &scene[..]), Rect::new(0.0, 0.0, 200.0, 100.0))
//!     .wait()?;
//!
//! let index = snapshot.index();
//! let mut host = RecordingHost::default();
//! let hit = index.click_at(10.0, 10.0, &mut host).unwrap();
//! assert_eq!(host.selected(), Some(snapshot.records()[hit.index()].name.as_str()));
//! assert_eq!(snapshot.summary().node_count, 2);
//! # Ok::<(), scenemap::Error>(())
//! ```

pub mod color;
pub mod label;

mod error;
mod interaction;
mod pipeline;
mod scene;
mod snapshot;
mod source;

pub use error::Error;
pub use interaction::{InteractionIndex, TileInfo};
pub use pipeline::{CancelToken, Completion, DEFAULT_BOUNDS, Pipeline, ViewConfig};
pub use scene::{Scene, SceneParents};
pub use snapshot::Snapshot;
pub use source::{HOST_SCENE_TITLE, SceneProvider, SceneSource};
