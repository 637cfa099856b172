// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenemap Index: point and rectangle queries over gap-free tilings.
//!
//! A tiling is a set of axis-aligned cells that exactly cover an outer box
//! with no overlap, such as the output of a treemap layout. This crate maps a
//! point back to the one cell owning it (hit testing) and lists the cells
//! touching a rectangle (viewport or damage queries).
//!
//! - Build once from a complete tiling; indexes are immutable and are
//!   replaced wholesale when the tiling changes.
//! - Query by point ([`IndexGeneric::hit_test`]) or rectangle
//!   ([`IndexGeneric::query_rect`]).
//!
//! Ownership of shared edges is half-open: minimum edges belong to a cell,
//! maximum edges to its neighbor, except on the outer box's right and bottom
//! edges which stay closed. Every point of the closed outer box is therefore
//! owned by exactly one cell and points outside it by none.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use scenemap_index::{Aabb2D, Axis, Index, StripSpan};
//!
//! // A 10×4 box split into a 6-wide cell and a 4-wide cell.
//! let cells = vec![
//!     (Aabb2D::new(0.0, 0.0, 6.0, 4.0), 1_u32),
//!     (Aabb2D::new(6.0, 0.0, 10.0, 4.0), 2_u32),
//! ];
//! let strips = vec![StripSpan {
//!     remaining: Aabb2D::new(0.0, 0.0, 10.0, 4.0),
//!     axis: Axis::X,
//!     cells: 0..2,
//! }];
//! let idx = Index::from_strips(cells, strips);
//!
//! assert_eq!(idx.hit_test(6.0, 1.0), Some(2));
//! assert_eq!(idx.hit_test(11.0, 1.0), None);
//! ```
//!
//! ## Choosing a backend
//!
//! - `StripTree` (default): for tilings produced strip by strip, as squarified and
//!   slice-and-dice treemaps are. Point queries are two binary searches.
//! - `FlatVec`: linear scans over any non-overlapping tiling. Useful for tiny sets
//!   and as a reference when checking the strip backend.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::strips::StripTree;
pub use index::{FlatIndex, Index, IndexGeneric};
pub use types::{Aabb2D, Axis, StripSpan};
