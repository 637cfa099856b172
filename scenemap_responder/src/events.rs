// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile interactions and the host commands they turn into.
//!
//! The core never talks to the host application directly. A click or copy
//! request on a tile is routed through the [`Router`], walked phase by phase
//! by the [`Dispatcher`], and produces [`HostCommand`]s that a [`Host`]
//! collaborator carries out.

use alloc::string::String;
use alloc::vec::Vec;

use crate::router::Router;
use crate::types::{Dispatch, NoParent, Outcome, ParentLookup, Phase, ResolvedHit};

/// A user interaction on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionEvent<K> {
    /// The tile was clicked: select the node in the host and copy its name.
    Click(K),
    /// The user asked to copy the node's name.
    CopyRequest(K),
}

impl<K: Copy> InteractionEvent<K> {
    /// The node the interaction targets.
    pub fn node(&self) -> K {
        match *self {
            Self::Click(k) | Self::CopyRequest(k) => k,
        }
    }
}

/// An outbound request to the host application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostCommand {
    /// Select the named node in the host's scene.
    Select(String),
    /// Put the text on the clipboard.
    CopyToClipboard(String),
}

impl HostCommand {
    /// Carry out this command on `host`.
    pub fn apply<H: Host + ?Sized>(&self, host: &mut H) {
        match self {
            Self::Select(name) => host.select(name),
            Self::CopyToClipboard(text) => host.copy_to_clipboard(text),
        }
    }
}

/// Host application collaborator.
pub trait Host {
    /// Select the named node.
    fn select(&mut self, name: &str);
    /// Put `text` on the clipboard.
    fn copy_to_clipboard(&mut self, text: &str);
}

/// Resolves node keys to the names used in host commands.
pub trait NodeNames<K> {
    /// The node's name, or `None` if the key is unknown.
    fn name_of(&self, node: &K) -> Option<&str>;
}

/// Turns interactions into host commands.
///
/// The default action (select and copy on click, copy on copy request) runs
/// when the dispatch reaches the [`Target`](Phase::Target) phase. A handler
/// passed to [`Dispatcher::dispatch_with`] sees every step first and can
/// veto the default action by returning [`Outcome::StopAndConsume`] before
/// the target is reached.
pub struct Dispatcher<K, P: ParentLookup<K> = NoParent> {
    router: Router<K, P>,
}

impl<K: Copy + Eq + core::fmt::Debug, P: ParentLookup<K>> core::fmt::Debug for Dispatcher<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .finish()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Dispatcher<K, P> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Dispatcher<K, P> {
    /// Create a dispatcher over `router`.
    pub fn new(router: Router<K, P>) -> Self {
        Self { router }
    }

    /// The underlying router.
    pub fn router(&self) -> &Router<K, P> {
        &self.router
    }

    /// Commands for `event` with no handlers.
    pub fn dispatch<N: NodeNames<K> + ?Sized>(
        &self,
        event: InteractionEvent<K>,
        names: &N,
    ) -> Vec<HostCommand> {
        self.dispatch_with(event, names, |_| Outcome::Continue)
    }

    /// Commands for `event`, consulting `handler` at each dispatch step.
    pub fn dispatch_with<N, F>(
        &self,
        event: InteractionEvent<K>,
        names: &N,
        mut handler: F,
    ) -> Vec<HostCommand>
    where
        N: NodeNames<K> + ?Sized,
        F: FnMut(&Dispatch<K, InteractionEvent<K>>) -> Outcome,
    {
        let seq = self
            .router
            .handle_with_hits(&[ResolvedHit::new(event.node(), event)]);
        let mut out = Vec::new();
        let mut i = 0;
        while i < seq.len() {
            let step = &seq[i];
            match handler(step) {
                Outcome::Continue => {}
                Outcome::Stop => {
                    // Skip remaining entries in this phase.
                    while i + 1 < seq.len() && seq[i + 1].phase == step.phase {
                        i += 1;
                    }
                }
                Outcome::StopAndConsume => return out,
            }
            if step.phase == Phase::Target {
                default_action(event, step.node, names, &mut out);
            }
            i += 1;
        }
        out
    }
}

fn default_action<K, N: NodeNames<K> + ?Sized>(
    event: InteractionEvent<K>,
    target: K,
    names: &N,
    out: &mut Vec<HostCommand>,
) {
    let Some(name) = names.name_of(&target) else {
        return;
    };
    if let InteractionEvent::Click(_) = event {
        out.push(HostCommand::Select(String::from(name)));
    }
    out.push(HostCommand::CopyToClipboard(String::from(name)));
}

/// A [`Host`] that records every call, for tests and headless runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingHost {
    /// Commands received, in order.
    pub commands: Vec<HostCommand>,
}

impl RecordingHost {
    /// The most recent selection, if any.
    pub fn selected(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::Select(name) => Some(name.as_str()),
            HostCommand::CopyToClipboard(_) => None,
        })
    }

    /// The most recent clipboard contents, if any.
    pub fn clipboard(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::CopyToClipboard(text) => Some(text.as_str()),
            HostCommand::Select(_) => None,
        })
    }
}

impl Host for RecordingHost {
    fn select(&mut self, name: &str) {
        self.commands.push(HostCommand::Select(String::from(name)));
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        self.commands
            .push(HostCommand::CopyToClipboard(String::from(text)));
    }
}
