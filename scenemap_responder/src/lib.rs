// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenemap Responder: a deterministic, `no_std` router from tile interactions to host commands.
//!
//! ## Overview
//!
//! This crate builds the responder sequence (capture → target → bubble) for a
//! tile the user clicked or asked to copy, and turns it into outbound
//! [`HostCommand`](crate::events::HostCommand)s. It does not perform hit
//! testing; feed it the node a hit test returned.
//!
//! ## Inputs
//!
//! Provide a [`ResolvedHit`](crate::types::ResolvedHit) for the target, or let
//! the [`Dispatcher`](crate::events::Dispatcher) build one from an
//! [`InteractionEvent`](crate::events::InteractionEvent). A
//! [`ParentLookup`](crate::types::ParentLookup) reconstructs the node's
//! ancestry when the hit carries no path; flat scenes use
//! [`NoParent`](crate::types::NoParent) and get singleton paths.
//!
//! ## Workflow
//!
//! 1) Hit test: map the pointer to a node with the tile index.
//! 2) Route: [`Router`](crate::router::Router) emits a capture→target→bubble
//!    sequence for the node's path.
//! 3) Dispatch: [`Dispatcher`](crate::events::Dispatcher) walks the sequence,
//!    honors handler [`Outcome`](crate::types::Outcome)s, and on reaching the
//!    target emits the default commands: a click selects the node and copies
//!    its name, a copy request copies the name.
//! 4) Hover: derive the path from the dispatch via
//!    [`path_from_dispatch`](crate::hover::path_from_dispatch) and feed it to
//!    [`HoverTracker`](crate::hover::HoverTracker) for enter/leave transitions.
//!
//! ```
//! use scenemap_responder::events::{Dispatcher, InteractionEvent, NodeNames, RecordingHost};
//!
//! struct Names;
//! impl NodeNames<u32> for Names {
//!     fn name_of(&self, node: &u32) -> Option<&str> {
//!         (*node == 7).then_some("persp")
//!     }
//! }
//!
//! let dispatcher: Dispatcher<u32> = Dispatcher::default();
//! let mut host = RecordingHost::default();
//! for cmd in dispatcher.dispatch(InteractionEvent::Click(7), &Names) {
//!     cmd.apply(&mut host);
//! }
//! assert_eq!(host.selected(), Some("persp"));
//! assert_eq!(host.clipboard(), Some("persp"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod events;
pub mod hover;
pub mod router;
pub mod types;
