// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Selects a target, reconstructs its path, and emits dispatch steps.
//! Produces a capture → target → bubble sequence for the selected target.
//!
//! ## Target Selection
//!
//! Treemap tiles never overlap, so a point hit yields at most one candidate.
//! When several hits are supplied anyway (for example a tile and a legend
//! entry for the same node), the last one wins.
//!
//! ## See Also
//!
//! [`hover`](crate::hover) for hover transitions derived from the dispatch sequence.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase, ResolvedHit};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] for flat scenes, or with
///   [`Router::with_parent`] to reconstruct paths via a [`ParentLookup`].
/// - Call [`Router::handle_with_hits`] for each input event to select the
///   winning candidate and produce a capture → target → bubble sequence.
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    _key: core::marker::PhantomData<fn() -> K>,
}

impl<K: Copy + Eq + core::fmt::Debug, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _key: core::marker::PhantomData,
        }
    }

    /// Handle a pre-resolved sequence of hits and produce a propagation sequence.
    ///
    /// Returns an empty sequence when there are no hits.
    pub fn handle_with_hits<M: Clone>(&self, hits: &[ResolvedHit<K, M>]) -> Vec<Dispatch<K, M>> {
        let Some(best) = hits.last() else {
            return Vec::new();
        };
        let path = match &best.path {
            Some(p) if !p.is_empty() => p.clone(),
            _ => self.reconstruct_path(best.node),
        };
        emit_path(&path, Some(best.meta.clone()))
    }

    /// Root→target path for `target`.
    ///
    /// Stops at the first repeated node so a cyclic lookup still terminates.
    fn reconstruct_path(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) if !out.contains(&p) => cur = p,
                _ => break,
            }
        }
        out.reverse();
        out
    }
}

fn emit_path<K: Copy, M: Clone>(path: &[K], meta: Option<M>) -> Vec<Dispatch<K, M>> {
    let Some(&target) = path.last() else {
        return Vec::new();
    };
    let step = |phase, node| Dispatch {
        phase,
        node,
        meta: meta.clone(),
    };
    let mut out = Vec::with_capacity(path.len() * 2 + 1);
    // Capture: root→target
    out.extend(path.iter().map(|&n| step(Phase::Capture, n)));
    out.push(step(Phase::Target, target));
    // Bubble: target→root
    out.extend(path.iter().rev().map(|&n| step(Phase::Bubble, n)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    struct Node(u32);

    struct Parents;
    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    fn phases<M>(out: &[Dispatch<Node, M>]) -> Vec<(Phase, u32)> {
        out.iter().map(|d| (d.phase, d.node.0)).collect()
    }

    #[test]
    fn flat_scene_gives_singleton_path() {
        let router: Router<Node> = Router::new();
        let out = router.handle_with_hits(&[ResolvedHit::new(Node(4), ())]);
        assert_eq!(
            phases(&out),
            vec![(Phase::Capture, 4), (Phase::Target, 4), (Phase::Bubble, 4)]
        );
    }

    #[test]
    fn parent_of_reconstructs_path() {
        let router: Router<Node, Parents> = Router::with_parent(Parents);
        let out = router.handle_with_hits(&[ResolvedHit::new(Node(3), ())]);
        assert_eq!(
            phases(&out),
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Capture, 3),
                (Phase::Target, 3),
                (Phase::Bubble, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn explicit_path_wins_over_lookup() {
        let router: Router<Node, Parents> = Router::with_parent(Parents);
        let hit = ResolvedHit {
            node: Node(3),
            path: Some(vec![Node(9), Node(3)]),
            meta: (),
        };
        let out = router.handle_with_hits(&[hit]);
        assert_eq!(out[0].node, Node(9));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn cyclic_parents_terminate() {
        struct Loop;
        impl ParentLookup<Node> for Loop {
            fn parent_of(&self, node: &Node) -> Option<Node> {
                Some(Node(if node.0 == 1 { 2 } else { 1 }))
            }
        }
        let router: Router<Node, Loop> = Router::with_parent(Loop);
        let out = router.handle_with_hits(&[ResolvedHit::new(Node(1), ())]);
        assert_eq!(
            phases(&out)[..3],
            [(Phase::Capture, 2), (Phase::Capture, 1), (Phase::Target, 1)]
        );
    }

    #[test]
    fn last_hit_wins() {
        let router: Router<Node> = Router::new();
        let hits = vec![ResolvedHit::new(Node(5), ()), ResolvedHit::new(Node(6), ())];
        let out = router.handle_with_hits(&hits);
        assert!(out.iter().all(|d| d.node == Node(6)), "earlier hit leaked into {out:?}");
    }

    #[test]
    fn no_hits_no_dispatch() {
        let router: Router<Node> = Router::new();
        assert!(router.handle_with_hits::<()>(&[]).is_empty());
    }
}
