// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified treemap layout.
//!
//! Entries are placed in descending value order. Each step either adds the
//! next entry to the current row or, when that would not strictly improve the
//! row's worst aspect ratio, closes the row as a strip along the shorter side
//! of the remaining rectangle. A strip's thickness is its share of the values
//! still to be placed, so the remaining rectangle always holds exactly the
//! remaining values.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Rect;
use scenemap_index::Axis;

use crate::model::SizeModel;
use crate::types::{Strip, Tile, TileFlags, Treemap};

/// Layout configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Lay out only the largest this many entries; `None` lays out all.
    pub max_items: Option<usize>,
    /// Entries smaller than this fraction of the largest are raised to it so
    /// they stay visible and clickable.
    pub min_share: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_items: Some(100),
            min_share: 0.01,
        }
    }
}

/// Relative floor applied when `min_share` is zero, so zero-byte entries still
/// get a positive area.
const EPSILON_SHARE: f64 = 1e-9;

/// Computes treemaps from size models.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TreemapLayout {
    config: LayoutConfig,
}

impl TreemapLayout {
    /// Create a layout engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `model` inside `bounds`.
    pub fn layout<K: Copy>(&self, model: &SizeModel<K>, bounds: Rect) -> Treemap<K> {
        let items = self.prepare(model);
        let mut layout = Squarify::new(bounds, &items);
        while layout.step() {}
        layout.finish()
    }

    /// Like [`TreemapLayout::layout`], polling `cancelled` before each strip.
    ///
    /// Returns `None` as soon as `cancelled` reports true.
    pub fn layout_until<K: Copy>(
        &self,
        model: &SizeModel<K>,
        bounds: Rect,
        mut cancelled: impl FnMut() -> bool,
    ) -> Option<Treemap<K>> {
        let items = self.prepare(model);
        let mut layout = Squarify::new(bounds, &items);
        loop {
            if cancelled() {
                return None;
            }
            if !layout.step() {
                return Some(layout.finish());
            }
        }
    }

    /// Select entries and turn byte sizes into positive layout values.
    fn prepare<K: Copy>(&self, model: &SizeModel<K>) -> Vec<Item<K>> {
        if model.equal_partition() {
            let mut entries: Vec<_> = model.entries().to_vec();
            entries.sort_by_key(|e| e.ordinal);
            let take = self.config.max_items.unwrap_or(usize::MAX);
            return entries
                .into_iter()
                .take(take)
                .map(|e| Item {
                    node: e.node,
                    value: 1.0,
                    flags: TileFlags::ZERO_SIZE,
                })
                .collect();
        }

        let take = self.config.max_items.unwrap_or(usize::MAX);
        let entries = &model.entries()[..model.len().min(take)];
        let largest = entries.first().map_or(0.0, |e| e.byte_size as f64);
        let floor = if self.config.min_share > 0.0 {
            largest * self.config.min_share
        } else {
            largest * EPSILON_SHARE
        };
        entries
            .iter()
            .map(|e| {
                let raw = e.byte_size as f64;
                let mut flags = TileFlags::empty();
                if e.byte_size == 0 {
                    flags |= TileFlags::ZERO_SIZE;
                }
                let value = if raw < floor {
                    flags |= TileFlags::FLOORED;
                    floor
                } else {
                    raw
                };
                Item {
                    node: e.node,
                    value,
                    flags,
                }
            })
            .collect()
    }
}

/// Lay out `(key, value)` pairs inside `bounds` without flooring or truncation.
///
/// Values must be positive and in descending order for the result to be
/// squarified; any positive values produce a valid tiling.
pub fn squarify<K: Copy>(items: &[(K, f64)], bounds: Rect) -> Treemap<K> {
    let items: Vec<_> = items
        .iter()
        .map(|&(node, value)| Item {
            node,
            value,
            flags: TileFlags::empty(),
        })
        .collect();
    let mut layout = Squarify::new(bounds, &items);
    while layout.step() {}
    layout.finish()
}

#[derive(Clone, Copy, Debug)]
struct Item<K> {
    node: K,
    value: f64,
    flags: TileFlags,
}

/// Incremental squarify state; each [`Squarify::step`] emits one strip.
struct Squarify<'a, K> {
    items: &'a [Item<K>],
    /// Scale from values to area.
    scale: f64,
    remaining: Rect,
    /// Sum of values not yet placed.
    pending: f64,
    next: usize,
    out: Treemap<K>,
}

impl<'a, K: Copy> Squarify<'a, K> {
    fn new(bounds: Rect, items: &'a [Item<K>]) -> Self {
        let bounds = bounds.abs();
        let pending: f64 = items.iter().map(|i| i.value).sum();
        let area = bounds.area();
        let degenerate = !(pending > 0.0 && area > 0.0);
        Self {
            items: if degenerate { &[] } else { items },
            scale: if degenerate { 0.0 } else { area / pending },
            remaining: bounds,
            pending,
            next: 0,
            out: Treemap {
                bounds,
                tiles: Vec::with_capacity(items.len()),
                strips: Vec::new(),
            },
        }
    }

    /// Place one row. Returns false once every item is placed.
    fn step(&mut self) -> bool {
        if self.next >= self.items.len() {
            return false;
        }
        let start = self.next;
        let end = self.row_end(start);
        self.place_row(start, end);
        self.next = end;
        self.next < self.items.len()
    }

    /// Grow a row from `start` while each candidate strictly improves it.
    fn row_end(&self, start: usize) -> usize {
        let side = self.remaining.width().min(self.remaining.height());
        let first = self.items[start].value * self.scale;
        let (mut sum, mut min, mut max) = (first, first, first);
        let mut worst = worst_ratio(min, max, sum, side);
        let mut end = start + 1;
        while end < self.items.len() {
            let area = self.items[end].value * self.scale;
            let (next_sum, next_min, next_max) = (sum + area, min.min(area), max.max(area));
            let next_worst = worst_ratio(next_min, next_max, next_sum, side);
            if next_worst >= worst {
                break;
            }
            (sum, min, max, worst) = (next_sum, next_min, next_max, next_worst);
            end += 1;
        }
        end
    }

    fn place_row(&mut self, start: usize, end: usize) {
        let items = self.items;
        let row = &items[start..end];
        let last_strip = end == self.items.len();
        let rem = self.remaining;
        let row_value: f64 = row.iter().map(|i| i.value).sum();
        let share = if last_strip || self.pending <= 0.0 {
            1.0
        } else {
            (row_value / self.pending).min(1.0)
        };

        // The strip runs along the shorter side; its tiles follow that side.
        let horizontal = rem.width() <= rem.height();
        let (extent, axis) = if horizontal {
            let cut = if last_strip {
                rem.y1
            } else {
                (rem.y0 + rem.height() * share).min(rem.y1)
            };
            (Rect::new(rem.x0, rem.y0, rem.x1, cut), Axis::X)
        } else {
            let cut = if last_strip {
                rem.x1
            } else {
                (rem.x0 + rem.width() * share).min(rem.x1)
            };
            (Rect::new(rem.x0, rem.y0, cut, rem.y1), Axis::Y)
        };

        let first_tile = self.out.tiles.len();
        let (lo, hi) = match axis {
            Axis::X => (extent.x0, extent.x1),
            Axis::Y => (extent.y0, extent.y1),
        };
        let mut pos = lo;
        let mut acc = 0.0;
        for (i, item) in row.iter().enumerate() {
            acc += item.value;
            let edge = if i + 1 == row.len() || row_value <= 0.0 {
                hi
            } else {
                (lo + (hi - lo) * (acc / row_value)).min(hi)
            };
            let rect = match axis {
                Axis::X => Rect::new(pos, extent.y0, edge, extent.y1),
                Axis::Y => Rect::new(extent.x0, pos, extent.x1, edge),
            };
            self.out.tiles.push(Tile {
                node: item.node,
                rect,
                flags: item.flags,
            });
            pos = edge;
        }

        self.out.strips.push(Strip {
            remaining: rem,
            extent,
            axis,
            tiles: first_tile..self.out.tiles.len(),
        });
        self.remaining = if horizontal {
            Rect::new(rem.x0, extent.y1, rem.x1, rem.y1)
        } else {
            Rect::new(extent.x1, rem.y0, rem.x1, rem.y1)
        };
        self.pending -= row_value;
    }

    fn finish(self) -> Treemap<K> {
        self.out
    }
}

/// Worst aspect ratio of a row with the given area statistics laid along `side`.
fn worst_ratio(min: f64, max: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = side_sq * max / sum_sq;
    let b = sum_sq / (side_sq * min);
    a.max(b)
}

impl<K: Debug> Debug for Squarify<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Squarify")
            .field("items", &self.items.len())
            .field("scale", &self.scale)
            .field("remaining", &self.remaining)
            .field("pending", &self.pending)
            .field("next", &self.next)
            .field("out", &self.out)
            .finish()
    }
}
