// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The unit of publication: records, layout and index together.

use std::sync::Arc;

use kurbo::Rect;
use scenemap_parse::{NodeId, NodeRecord, ParseSummary};
use scenemap_treemap::{SizeModel, Treemap, TreemapLayout};

use crate::error::Error;
use crate::interaction::InteractionIndex;
use crate::pipeline::CancelToken;
use crate::scene::Scene;

/// An immutable view of one scene at one size.
///
/// Size data and geometry always come from the same run: a snapshot is built
/// whole and replaced whole, so a reader never pairs one layout's rectangles
/// with another parse's records.
#[derive(Debug)]
pub struct Snapshot {
    index: InteractionIndex,
}

impl Snapshot {
    /// Lay out `scene` inside `bounds` and index the result.
    pub fn build(scene: Arc<Scene>, layout: &TreemapLayout, bounds: Rect) -> Self {
        let treemap = layout.layout(scene.model(), bounds);
        Self::from_treemap(scene, treemap)
    }

    pub(crate) fn build_until(
        scene: Arc<Scene>,
        layout: &TreemapLayout,
        bounds: Rect,
        cancel: &CancelToken,
    ) -> Result<Self, Error> {
        let treemap = layout
            .layout_until(scene.model(), bounds, || cancel.is_cancelled())
            .ok_or(Error::Cancelled)?;
        Ok(Self::from_treemap(scene, treemap))
    }

    fn from_treemap(scene: Arc<Scene>, treemap: Treemap<NodeId>) -> Self {
        Self {
            index: InteractionIndex::new(scene, treemap),
        }
    }

    /// The scene shown.
    pub fn scene(&self) -> &Arc<Scene> {
        self.index.scene()
    }

    /// Records in parse order.
    pub fn records(&self) -> &[NodeRecord] {
        self.scene().records()
    }

    /// Parse accounting.
    pub fn summary(&self) -> &ParseSummary {
        self.scene().summary()
    }

    /// Size model over the records.
    pub fn model(&self) -> &SizeModel<NodeId> {
        self.scene().model()
    }

    /// Tiles of the current layout.
    pub fn treemap(&self) -> &Treemap<NodeId> {
        self.index.treemap()
    }

    /// Hit testing and interaction dispatch for the tiles.
    pub fn index(&self) -> &InteractionIndex {
        &self.index
    }

    /// Bounds the layout was computed for.
    pub fn bounds(&self) -> Rect {
        self.treemap().bounds()
    }

    /// True if the scene has no nodes; the view should say so rather than
    /// draw an empty rectangle.
    pub fn is_empty(&self) -> bool {
        self.scene().is_empty()
    }
}
