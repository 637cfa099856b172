// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: compute enter/leave transitions as the pointer moves between tiles.
//!
//! ## Usage
//!
//! 1) Hit test the pointer position and route the hit to get a dispatch sequence.
//! 2) Extract the root→target path from the dispatch with [`path_from_dispatch`].
//! 3) Call [`HoverTracker::update_path`] with that path to get `Enter(..)` / `Leave(..)` transitions.
//!    When the pointer leaves the treemap, call [`HoverTracker::clear`].
//!
//! A renderer shows a tile's tooltip and hover highlight on `Enter` and drops
//! them on `Leave`.
//!
//! ## Minimal example
//!
//! ```
//! use scenemap_responder::hover::{HoverEvent, HoverTracker};
//! let mut h: HoverTracker<u32> = HoverTracker::new();
//! assert_eq!(h.update_path(&[4]), vec![HoverEvent::Enter(4)]);
//! assert!(h.update_path(&[4]).is_empty());
//! assert_eq!(h.update_path(&[9]), vec![HoverEvent::Leave(4), HoverEvent::Enter(9)]);
//! assert_eq!(h.clear(), vec![HoverEvent::Leave(9)]);
//! ```

use alloc::vec::Vec;

use crate::types::{Dispatch, Phase};

/// A hover state machine over root→target paths.
///
/// Tracks the current hovered path and, when updated with a new path,
/// computes the minimal sequence of leave and enter transitions.
///
/// Ordering semantics:
/// - Leave events are emitted from inner-most to outer-most.
/// - Enter events are emitted from outer-most to inner-most.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker<K: Copy + Eq> {
    current: Vec<K>,
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given node (in order from outer→inner).
    Enter(K),
    /// Pointer leaves the given node (in order from inner→outer).
    Leave(K),
}

impl<K: Copy + Eq> HoverTracker<K> {
    /// Create an empty hover tracker.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Return the current root→target path (if any).
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// The innermost hovered node.
    pub fn hovered(&self) -> Option<K> {
        self.current.last().copied()
    }

    /// Clear the current hover path, returning the corresponding leave events
    /// from inner-most to outer-most.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self.current.iter().rev().map(|&k| HoverEvent::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Update the hover path and return the enter/leave events required to
    /// transition from the previous path to `new_path`.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        // Length of the shared ancestry.
        let lca = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        out.extend(self.current[lca..].iter().rev().map(|&k| HoverEvent::Leave(k)));
        out.extend(new_path[lca..].iter().map(|&k| HoverEvent::Enter(k)));

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

/// Extract a root→target path from a router dispatch sequence.
///
/// Assumes the sequence begins with all [`Capture`](crate::types::Phase::Capture)
/// events for the path, as produced by the router in this crate.
pub fn path_from_dispatch<K: Copy, M>(seq: &[Dispatch<K, M>]) -> Vec<K> {
    seq.iter()
        .take_while(|d| d.phase == Phase::Capture)
        .map(|d| d.node)
        .collect()
}
