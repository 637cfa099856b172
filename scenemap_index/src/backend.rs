// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends are built once from a complete tiling and never mutated; a new
/// tiling means a new backend.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Number of cells held by the backend.
    fn len(&self) -> usize;

    /// True if the backend holds no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outer bounds covered by the tiling.
    fn bounds(&self) -> Option<Aabb2D<T>>;

    /// The slot owning the point, if any.
    fn query_point(&self, x: T, y: T) -> Option<usize>;

    /// Query slots whose AABB intersects the rectangle.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
