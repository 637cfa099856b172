// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenemap Treemap: a Kurbo-native size model and squarified treemap layout.
//!
//! - [`SizeModel`] orders measured items by descending size (ties keep input
//!   order), computes each item's percentage of the total, and aggregates
//!   totals per type for legends and coloring.
//! - [`TreemapLayout`] turns a size model and a bounding [`Rect`](kurbo::Rect)
//!   into a [`Treemap`]: tiles that cover the bounds exactly, with no gaps and
//!   no overlap, kept as close to square as the squarified algorithm allows.
//! - [`Treemap::to_index`] hands the strip structure of the layout to
//!   [`scenemap_index`], which answers point queries in `O(log n)`.
//!
//! ## Visibility floor
//!
//! Tiny and zero-byte entries would vanish or become unclickable, so values
//! below [`LayoutConfig::min_share`] of the largest entry are raised to that
//! floor (flagged [`TileFlags::FLOORED`]). Percentages in the model are left
//! untouched. When every entry is zero bytes the layout falls back to equal
//! areas in input order.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use scenemap_treemap::{SizeInput, SizeModel, TreemapLayout};
//!
//! let model = SizeModel::build([
//!     SizeInput { node: 'a', byte_size: 600, node_type: "mesh" },
//!     SizeInput { node: 'b', byte_size: 300, node_type: "mesh" },
//!     SizeInput { node: 'c', byte_size: 100, node_type: "transform" },
//! ]);
//! let map = TreemapLayout::default().layout(&model, Rect::new(0.0, 0.0, 10.0, 10.0));
//!
//! let areas: Vec<f64> = map.tiles().iter().map(|t| t.rect.area()).collect();
//! assert!((areas[0] - 60.0).abs() < 1e-9);
//! assert!((map.covered_area() - 100.0).abs() < 1e-9);
//! assert_eq!(map.to_index().hit_test(9.0, 9.0), Some('c'));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;
mod model;
mod types;

pub use layout::{LayoutConfig, TreemapLayout, squarify};
pub use model::{SizeEntry, SizeInput, SizeModel, TypeTotal};
pub use types::{Strip, Tile, TileFlags, Treemap, to_aabb};
