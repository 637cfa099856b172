// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout output: tiles, strips, and the treemap that owns them.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use kurbo::Rect;
use scenemap_index::{Aabb2D, Axis, Index, StripSpan};

bitflags::bitflags! {
    /// Per-tile notes about how the tile's area was derived.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TileFlags: u8 {
        /// The value was raised to the visibility floor, so the tile is larger
        /// than its share of the total.
        const FLOORED   = 0b0000_0001;
        /// The entry had zero bytes.
        const ZERO_SIZE = 0b0000_0010;
    }
}

/// One rectangle of a treemap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile<K> {
    /// Key of the entry this tile represents.
    pub node: K,
    /// Tile geometry.
    pub rect: Rect,
    /// How the tile's area was derived.
    pub flags: TileFlags,
}

/// A strip cut from the edge of the remaining rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Strip {
    /// The remaining rectangle the strip was cut from.
    pub remaining: Rect,
    /// The strip itself.
    pub extent: Rect,
    /// Axis along which the strip's tiles follow one another.
    pub axis: Axis,
    /// Tiles of this strip, as indices into [`Treemap::tiles`].
    pub tiles: Range<usize>,
}

/// The result of one layout pass.
///
/// Tiles are listed in placement order, which is the order of the input
/// entries. Together they cover [`Treemap::bounds`] exactly: shared edges
/// are bit-identical and the last tile of each strip, like the last strip,
/// ends on the far edge of its container.
#[derive(Clone, Debug, PartialEq)]
pub struct Treemap<K> {
    pub(crate) bounds: Rect,
    pub(crate) tiles: Vec<Tile<K>>,
    pub(crate) strips: Vec<Strip>,
}

impl<K> Treemap<K> {
    /// An empty treemap over `bounds`.
    pub fn empty(bounds: Rect) -> Self {
        Self {
            bounds,
            tiles: Vec::new(),
            strips: Vec::new(),
        }
    }

    /// Bounding rectangle the layout was computed for.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Tiles in placement order.
    pub fn tiles(&self) -> &[Tile<K>] {
        &self.tiles
    }

    /// Strips in cut order.
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if no tiles were laid out.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Sum of tile areas; equals the bounds' area up to rounding.
    pub fn covered_area(&self) -> f64 {
        self.tiles.iter().map(|t| t.rect.area()).sum()
    }
}

impl<K: Copy + Debug> Treemap<K> {
    /// Build the strip-backed hit-test index for this layout.
    pub fn to_index(&self) -> Index<f64, K> {
        let cells = self
            .tiles
            .iter()
            .map(|t| (to_aabb(t.rect), t.node))
            .collect();
        let strips = self
            .strips
            .iter()
            .map(|s| StripSpan {
                remaining: to_aabb(s.remaining),
                axis: s.axis,
                cells: s.tiles.clone(),
            })
            .collect();
        Index::from_strips(cells, strips)
    }
}

/// Convert a Kurbo rectangle to the index's box type.
pub fn to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}
