// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::strips::StripTree;
use crate::types::{Aabb2D, StripSpan};

/// An immutable tiling index parameterized by a spatial backend.
///
/// Each cell carries a payload `P` (typically a node id). The index is built
/// in one step from a complete tiling and answers queries until it is dropped;
/// there is no incremental update. Rebuild and swap when the tiling changes.
#[derive(Clone, Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    payloads: Vec<P>,
    backend: B,
    _t: core::marker::PhantomData<T>,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// True if the index holds no cells.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Outer bounds of the indexed tiling.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.backend.bounds()
    }

    /// Payload of the cell owning the point, or `None` outside the tiling.
    pub fn hit_test(&self, x: T, y: T) -> Option<P> {
        let slot = self.backend.query_point(x, y)?;
        self.payloads.get(slot).copied()
    }

    /// Payloads of cells intersecting the rectangle, in slot order per strip.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = P> + '_ {
        self.backend
            .query_rect(rect)
            .filter_map(|slot| self.payloads.get(slot).copied())
    }

    /// Payloads in slot order.
    pub fn payloads(&self) -> &[P] {
        &self.payloads
    }

    /// Access the backend, mostly for diagnostics.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Default index using the strip backend.
pub type Index<T, P> = IndexGeneric<T, P, StripTree<T>>;

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Index<T, P> {
    /// Build a strip-backed index from cells in slot order and their strips.
    pub fn from_strips(cells: Vec<(Aabb2D<T>, P)>, strips: Vec<StripSpan<T>>) -> Self {
        let (boxes, payloads): (Vec<_>, Vec<_>) = cells.into_iter().unzip();
        Self {
            payloads,
            backend: StripTree::new(boxes, strips),
            _t: core::marker::PhantomData,
        }
    }
}

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self {
            payloads: Vec::new(),
            backend: StripTree::default(),
            _t: core::marker::PhantomData,
        }
    }
}

/// Index using linear scans; accepts any non-overlapping tiling.
pub type FlatIndex<T, P> = IndexGeneric<T, P, FlatVec<T>>;

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> FlatIndex<T, P> {
    /// Build a flat index from cells in slot order.
    pub fn from_cells(cells: Vec<(Aabb2D<T>, P)>) -> Self {
        let (boxes, payloads): (Vec<_>, Vec<_>) = cells.into_iter().unzip();
        Self {
            payloads,
            backend: FlatVec::new(boxes),
            _t: core::marker::PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axis;
    use alloc::vec;

    fn two_columns() -> Vec<(Aabb2D<f64>, u32)> {
        vec![
            (Aabb2D::new(0.0, 0.0, 3.0, 4.0), 7),
            (Aabb2D::new(3.0, 0.0, 4.0, 4.0), 9),
        ]
    }

    #[test]
    fn strip_and_flat_agree() {
        let strips = vec![
            StripSpan {
                remaining: Aabb2D::new(0.0, 0.0, 4.0, 4.0),
                axis: Axis::Y,
                cells: 0..1,
            },
            StripSpan {
                remaining: Aabb2D::new(3.0, 0.0, 4.0, 4.0),
                axis: Axis::Y,
                cells: 1..2,
            },
        ];
        let strip = Index::from_strips(two_columns(), strips);
        let flat = FlatIndex::from_cells(two_columns());
        for (x, y) in [(0.0, 0.0), (2.9, 3.9), (3.0, 0.0), (4.0, 4.0), (5.0, 1.0)] {
            assert_eq!(strip.hit_test(x, y), flat.hit_test(x, y), "at ({x}, {y})");
        }
        assert_eq!(strip.hit_test(1.0, 1.0), Some(7));
        assert_eq!(strip.hit_test(3.5, 1.0), Some(9));
    }

    #[test]
    fn empty_index_has_no_bounds() {
        let idx: Index<f64, u32> = Index::default();
        assert!(idx.is_empty());
        assert_eq!(idx.bounds(), None);
        assert_eq!(idx.hit_test(0.0, 0.0), None);
    }

    #[test]
    fn rect_query_returns_payloads() {
        let flat = FlatIndex::from_cells(two_columns());
        let hits: Vec<_> = flat
            .query_rect(Aabb2D::new(3.5, 1.0, 3.8, 2.0))
            .collect();
        assert_eq!(hits, vec![9]);
    }
}
