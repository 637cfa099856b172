// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, union_aabb};

/// Flat vector backend with linear scans.
///
/// Makes no assumption about how the cells were produced beyond them tiling
/// their union without overlap.
#[derive(Clone)]
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    entries: Vec<Aabb2D<T>>,
    bounds: Option<Aabb2D<T>>,
}

impl<T: Copy + PartialOrd + Debug> FlatVec<T> {
    /// Build from cells in slot order.
    pub fn new(entries: Vec<Aabb2D<T>>) -> Self {
        let bounds = entries.iter().copied().reduce(union_aabb);
        Self { entries, bounds }
    }
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            bounds: None,
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("cells", &self.entries.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn bounds(&self) -> Option<Aabb2D<T>> {
        self.bounds
    }

    fn query_point(&self, x: T, y: T) -> Option<usize> {
        let outer = self.bounds?;
        self.entries
            .iter()
            .position(|a| a.owns_point(&outer, x, y))
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.entries
                .iter()
                .enumerate()
                .filter(move |(_, a)| a.intersects(&rect))
                .map(|(i, _)| i),
        )
    }
}
