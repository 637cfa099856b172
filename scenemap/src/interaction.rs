// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point queries, tile metadata and interaction dispatch over one layout.

use std::sync::Arc;

use kurbo::Rect;
use scenemap_index::Index;
use scenemap_parse::{NodeId, NodeRecord};
use scenemap_responder::events::{Dispatcher, Host, HostCommand, InteractionEvent};
use scenemap_responder::hover::{HoverEvent, HoverTracker, path_from_dispatch};
use scenemap_responder::router::Router;
use scenemap_responder::types::{Dispatch, Outcome, ResolvedHit};
use scenemap_treemap::{Tile, TileFlags, Treemap, to_aabb};

use crate::color::{Color, color_for};
use crate::label::{tile_label, tooltip};
use crate::scene::{Scene, SceneParents};

/// Everything a renderer or tooltip needs about one tile.
#[derive(Clone, Copy, Debug)]
pub struct TileInfo<'a> {
    /// The node's record.
    pub record: &'a NodeRecord,
    /// Share of the scene's node bytes, in percent.
    pub percent: f64,
    /// The tile's rectangle.
    pub rect: Rect,
    /// Fill color for the node's type.
    pub color: Color,
    /// How the tile's area was derived.
    pub flags: TileFlags,
}

impl TileInfo<'_> {
    /// Caption drawn inside the tile.
    pub fn label(&self) -> String {
        tile_label(self.record, self.percent, self.rect.width())
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> String {
        tooltip(self.record)
    }
}

/// Maps points to nodes and tile interactions to host commands.
///
/// Built once per layout and never mutated; a resize or re-parse builds a new
/// one. Hit tests run in O(log n) over the layout's strips.
#[derive(Debug)]
pub struct InteractionIndex {
    scene: Arc<Scene>,
    treemap: Treemap<NodeId>,
    index: Index<f64, NodeId>,
    tile_of: Vec<Option<usize>>,
    dispatcher: Dispatcher<NodeId, SceneParents>,
}

impl InteractionIndex {
    /// Index `treemap`, whose tiles refer to records of `scene`.
    pub fn new(scene: Arc<Scene>, treemap: Treemap<NodeId>) -> Self {
        let index = treemap.to_index();
        let mut tile_of = vec![None; scene.records().len()];
        for (i, tile) in treemap.tiles().iter().enumerate() {
            if let Some(slot) = tile_of.get_mut(tile.node.index()) {
                *slot = Some(i);
            }
        }
        let dispatcher = Dispatcher::new(Router::with_parent(scene.parents().clone()));
        Self {
            scene,
            treemap,
            index,
            tile_of,
            dispatcher,
        }
    }

    /// The scene the tiles belong to.
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// The indexed layout.
    pub fn treemap(&self) -> &Treemap<NodeId> {
        &self.treemap
    }

    /// Node under `(x, y)`, or `None` outside the laid-out area.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<NodeId> {
        self.index.hit_test(x, y)
    }

    /// Nodes whose tiles intersect `rect`, for partial redraws.
    pub fn visible_in(&self, rect: Rect) -> impl Iterator<Item = NodeId> + '_ {
        self.index.query_rect(to_aabb(rect))
    }

    /// The tile laid out for `node`, if it made the cut.
    pub fn tile(&self, node: NodeId) -> Option<&Tile<NodeId>> {
        let i = (*self.tile_of.get(node.index())?)?;
        self.treemap.tiles().get(i)
    }

    /// Tooltip and rendering data for `node`.
    ///
    /// Returns `None` for nodes without a tile.
    pub fn metadata_for(&self, node: NodeId) -> Option<TileInfo<'_>> {
        let tile = self.tile(node)?;
        let record = self.scene.record(node)?;
        Some(TileInfo {
            record,
            percent: self.scene.percent(node).unwrap_or(0.0),
            rect: tile.rect,
            color: color_for(&record.node_type),
            flags: tile.flags,
        })
    }

    /// Host commands `event` produces, without running them.
    pub fn commands_for(&self, event: InteractionEvent<NodeId>) -> Vec<HostCommand> {
        self.dispatcher.dispatch(event, &*self.scene)
    }

    /// Select `node` in the host and copy its name.
    pub fn on_click<H: Host + ?Sized>(&self, node: NodeId, host: &mut H) {
        self.send(InteractionEvent::Click(node), host, |_| Outcome::Continue);
    }

    /// Copy `node`'s name to the host clipboard.
    pub fn on_copy_request<H: Host + ?Sized>(&self, node: NodeId, host: &mut H) {
        self.send(InteractionEvent::CopyRequest(node), host, |_| Outcome::Continue);
    }

    /// Dispatch `event` through its node's ancestry, consulting `handler`
    /// at each step, and send the resulting commands to `host`.
    pub fn send<H, F>(&self, event: InteractionEvent<NodeId>, host: &mut H, handler: F)
    where
        H: Host + ?Sized,
        F: FnMut(&Dispatch<NodeId, InteractionEvent<NodeId>>) -> Outcome,
    {
        let commands = self.dispatcher.dispatch_with(event, &*self.scene, handler);
        tracing::debug!(node = %event.node(), commands = commands.len(), "dispatching tile event");
        for command in &commands {
            command.apply(host);
        }
    }

    /// Hit test `(x, y)` and click whatever is there.
    pub fn click_at<H: Host + ?Sized>(&self, x: f64, y: f64, host: &mut H) -> Option<NodeId> {
        let node = self.hit_test(x, y)?;
        self.on_click(node, host);
        Some(node)
    }

    /// Move the pointer to `(x, y)` and report hover transitions.
    ///
    /// The hovered path runs from the node's outermost known parent to the
    /// node itself, so a renderer can highlight a shape's transform too.
    pub fn hover(
        &self,
        tracker: &mut HoverTracker<NodeId>,
        x: f64,
        y: f64,
    ) -> Vec<HoverEvent<NodeId>> {
        match self.hit_test(x, y) {
            Some(node) => {
                let seq = self
                    .dispatcher
                    .router()
                    .handle_with_hits(&[ResolvedHit::new(node, ())]);
                tracker.update_path(&path_from_dispatch(&seq))
            }
            None => tracker.clear(),
        }
    }
}
