// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip backend for recursive strip tilings (squarified treemaps and kin).
//!
//! A strip tiling is produced by repeatedly cutting a strip off the edge of
//! the remaining rectangle and subdividing that strip along one axis. The
//! remaining rectangles `R0 ⊇ R1 ⊇ … ⊇ Rk` are nested, so "does `Ri` own the
//! point" is true for a prefix of strips and false afterwards. The owning
//! strip is the last one whose remaining rectangle owns the point, found by
//! binary search; the owning cell is then found by a second binary search
//! over the strip's cell edges. Point queries are `O(log s + log c)`.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, StripSpan, le};

/// Strip-structured backend.
#[derive(Clone)]
pub struct StripTree<T: Copy + PartialOrd + Debug> {
    cells: Vec<Aabb2D<T>>,
    strips: Vec<StripSpan<T>>,
}

impl<T: Copy + PartialOrd + Debug> StripTree<T> {
    /// Build from cells in slot order and the strips that produced them.
    ///
    /// Strips must be listed in cut order, their cell ranges must cover the
    /// cells contiguously, and each strip's cells must be ordered along its
    /// axis.
    pub fn new(cells: Vec<Aabb2D<T>>, strips: Vec<StripSpan<T>>) -> Self {
        debug_assert!(
            strips.windows(2).all(|w| w[0].cells.end == w[1].cells.start),
            "strip cell ranges must be contiguous"
        );
        debug_assert!(
            strips.last().is_none_or(|s| s.cells.end == cells.len()),
            "strips must cover every cell"
        );
        Self { cells, strips }
    }

    /// Number of strips.
    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    fn owning_strip(&self, outer: &Aabb2D<T>, x: T, y: T) -> Option<&StripSpan<T>> {
        let n = self
            .strips
            .partition_point(|s| s.remaining.owns_point(outer, x, y));
        n.checked_sub(1).map(|i| &self.strips[i])
    }
}

impl<T: Copy + PartialOrd + Debug> Default for StripTree<T> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            strips: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for StripTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StripTree")
            .field("cells", &self.cells.len())
            .field("strips", &self.strips.len())
            .field("bounds", &self.bounds())
            .finish()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for StripTree<T> {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn bounds(&self) -> Option<Aabb2D<T>> {
        self.strips.first().map(|s| s.remaining)
    }

    fn query_point(&self, x: T, y: T) -> Option<usize> {
        let outer = self.bounds()?;
        if !outer.contains_point(x, y) {
            return None;
        }
        let strip = self.owning_strip(&outer, x, y)?;
        let cells = self.cells.get(strip.cells.clone())?;
        let last = cells.len().checked_sub(1)?;
        let along = strip.axis.select(x, y);
        // Cells ending at or before the coordinate come first; the outer
        // maximum edge belongs to the final cell.
        let i = cells
            .partition_point(|c| le(c.max_along(strip.axis), along))
            .min(last);
        Some(strip.cells.start + i)
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.strips
                .iter()
                .filter(move |s| s.remaining.intersects(&rect))
                .flat_map(move |s| {
                    s.cells
                        .clone()
                        .filter(move |&i| self.cells[i].intersects(&rect))
                }),
        )
    }
}
