// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer interaction against a published snapshot.
//!
//! A host-provided scene is loaded on the pipeline's worker thread. The
//! pointer then moves across the treemap, producing hover transitions, and a
//! click sends select and copy commands to a host that just prints them.
//!
//! Run:
//! - `cargo run -p scenemap_demos --example host_dispatch`

use std::path::PathBuf;
use std::sync::Arc;

use kurbo::Rect;
use scenemap::{Pipeline, SceneProvider, SceneSource, ViewConfig};
use scenemap_responder::events::Host;
use scenemap_responder::hover::{HoverEvent, HoverTracker};
use scenemap_responder::types::Outcome;

/// A host whose open scene has unsaved changes, so it must be exported.
struct UnsavedHost;

impl SceneProvider for UnsavedHost {
    fn saved_scene(&self) -> Option<PathBuf> {
        None
    }

    fn export_scene(&self) -> Result<Vec<u8>, String> {
        Ok(b"createNode transform -n \"pCube1\";\n\
             createNode mesh -n \"pCubeShape1\" -p \"pCube1\";\n\
             \tsetAttr -s 8 \".vt[0:7]\" -0.5 -0.5 0.5 0.5 -0.5 0.5 -0.5 0.5 0.5 0.5 0.5 0.5;\n\
             createNode transform -n \"pSphere1\";\n\
             createNode mesh -n \"pSphereShape1\" -p \"pSphere1\";\n\
             \tsetAttr \".vt\" -type \"string\" \"lots of vertices\";\n"
            .to_vec())
    }
}

struct PrintingHost;

impl Host for PrintingHost {
    fn select(&mut self, name: &str) {
        println!("  host: select {name}");
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        println!("  host: clipboard <- {text}");
    }
}

fn main() {
    let mut pipeline = Pipeline::new(ViewConfig::default());
    let bounds = Rect::new(0.0, 0.0, 300.0, 200.0);
    let snap = match pipeline.open(SceneSource::Host(Arc::new(UnsavedHost)), bounds).wait() {
        Ok(snap) => snap,
        Err(err) => {
            eprintln!("could not load the host scene: {err}");
            return;
        }
    };
    println!("{}: {}", snap.scene().title(), snap.summary());

    let index = snap.index();
    let mut tracker = HoverTracker::new();
    for x in [10.0, 150.0, 290.0, 400.0] {
        for event in index.hover(&mut tracker, x, 100.0) {
            let (verb, id) = match event {
                HoverEvent::Enter(id) => ("enter", id),
                HoverEvent::Leave(id) => ("leave", id),
            };
            let name = snap.scene().record(id).map_or("?", |r| r.display_name());
            println!("pointer at x={x}: {verb} {name}");
        }
    }

    let mut host = PrintingHost;
    if let Some(id) = index.hit_test(290.0, 100.0) {
        println!("click on {}", snap.records()[id.index()].name);
        index.on_click(id, &mut host);

        println!("click with a handler that stops at the transform");
        index.send(
            scenemap_responder::events::InteractionEvent::Click(id),
            &mut host,
            |step| {
                let is_transform = snap
                    .scene()
                    .record(step.node)
                    .is_some_and(|r| r.node_type == "transform");
                if is_transform {
                    Outcome::StopAndConsume
                } else {
                    Outcome::Continue
                }
            },
        );
    }
}
