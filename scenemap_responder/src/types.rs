// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, hits, lookups, and dispatch.
//!
//! ## Overview
//!
//! These types describe the responder protocol and its inputs/outputs.
//! They are referenced by the [`router`](crate::router) and the
//! [`events`](crate::events) dispatcher.

use alloc::vec::Vec;

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by
/// [`Router::handle_with_hits`](crate::router::Router::handle_with_hits).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target node.
    Target,
    /// Target-to-root traversal.
    Bubble,
}

/// Handler outcome controlling propagation.
///
/// Returned by per-node handlers passed to
/// [`Dispatcher::dispatch_with`](crate::events::Dispatcher::dispatch_with) to
/// decide whether to continue within a phase or abort remaining phases.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Continue within the current phase.
    Continue,
    /// Stop propagation within the current phase.
    Stop,
    /// Stop and mark consumed; remaining phases are skipped.
    StopAndConsume,
}

/// A resolved hit to be routed.
///
/// Typically obtained from a tile hit test. It is the input to
/// [`Router::handle_with_hits`](crate::router::Router::handle_with_hits).
#[derive(Clone, Debug)]
pub struct ResolvedHit<K, M = ()> {
    /// Node key associated with the hit.
    pub node: K,
    /// Optional root→target path; if absent, the router may consult [`ParentLookup`] to derive one.
    pub path: Option<Vec<K>>,
    /// Metadata carried alongside the hit (e.g., the triggering event).
    pub meta: M,
}

impl<K, M> ResolvedHit<K, M> {
    /// A hit on `node` with no precomputed path.
    pub fn new(node: K, meta: M) -> Self {
        Self {
            node,
            path: None,
            meta,
        }
    }
}

/// Look up the parent of a node to reconstruct a root→target path for propagation.
///
/// The [router](crate::router::Router) consults this when a [`ResolvedHit::path`] is absent, if you
/// construct it via [`Router::with_parent`](crate::router::Router::with_parent).
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider for flat scenes.
///
/// Used by [`Router::new`](crate::router::Router::new). All calls to
/// [`ParentLookup::parent_of`] return `None`, so every path is a singleton.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single dispatch item.
///
/// Produced by [`Router::handle_with_hits`](crate::router::Router::handle_with_hits) and walked by
/// the [`Dispatcher`](crate::events::Dispatcher) in [`Capture`](Phase::Capture), then
/// [`Target`](Phase::Target), then [`Bubble`](Phase::Bubble) order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K, M = ()> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node associated with this dispatch step.
    pub node: K,
    /// Metadata cloned from the winning hit.
    pub meta: Option<M>,
}
