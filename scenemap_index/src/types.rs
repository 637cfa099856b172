// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::ops::Range;

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point, edges included.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether this AABB owns the point inside a tiling of `outer`.
    ///
    /// Minimum edges are closed and maximum edges are open, except where a
    /// maximum edge lies on the matching edge of `outer`. Every point of
    /// `outer` is therefore owned by exactly one cell of a gap-free tiling.
    pub fn owns_point(&self, outer: &Self, x: T, y: T) -> bool {
        let x_ok = lt(x, self.max_x) || (le(outer.max_x, self.max_x) && le(x, self.max_x));
        let y_ok = lt(y, self.max_y) || (le(outer.max_y, self.max_y) && le(y, self.max_y));
        le(self.min_x, x) && le(self.min_y, y) && x_ok && y_ok
    }

    /// The intersection of two AABBs.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: max_t(self.min_x, other.min_x),
            min_y: max_t(self.min_y, other.min_y),
            max_x: min_t(self.max_x, other.max_x),
            max_y: min_t(self.max_y, other.max_y),
        }
    }

    /// Whether two AABBs touch or overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// The maximum coordinate along `axis`.
    pub fn max_along(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    /// The minimum coordinate along `axis`.
    pub fn min_along(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Area of the box, zero when inverted.
    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0) * (self.max_y - self.min_y).max(0.0)
    }
}

/// The axis along which the cells of a strip are arranged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Cells follow each other left to right.
    X,
    /// Cells follow each other top to bottom.
    Y,
}

impl Axis {
    /// Pick the coordinate of `(x, y)` that lies along this axis.
    #[inline]
    pub fn select<T>(self, x: T, y: T) -> T {
        match self {
            Self::X => x,
            Self::Y => y,
        }
    }
}

/// One strip of a recursive strip tiling.
///
/// A strip is cut from its `remaining` rectangle; the next strip's
/// `remaining` is what is left over. Remaining rectangles are therefore
/// nested and share their maximum edges with the outer bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct StripSpan<T> {
    /// Rectangle left to fill when this strip was cut.
    pub remaining: Aabb2D<T>,
    /// Axis along which this strip's cells are arranged.
    pub axis: Axis,
    /// Cell slots belonging to this strip, in placement order.
    pub cells: Range<usize>,
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D {
        min_x: min_t(a.min_x, b.min_x),
        min_y: min_t(a.min_y, b.min_y),
        max_x: max_t(a.max_x, b.max_x),
        max_y: max_t(a.max_y, b.max_y),
    }
}
