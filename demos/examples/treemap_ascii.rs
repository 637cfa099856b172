// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified layout of a small scene, drawn as text.
//!
//! Each tile is filled with the first letter of its node's name, so the
//! strips and their orientation are visible at a glance.
//!
//! Run:
//! - `cargo run -p scenemap_demos --example treemap_ascii`

use std::sync::Arc;

use kurbo::Rect;
use scenemap::{Scene, Snapshot};
use scenemap_parse::parse_bytes;
use scenemap_treemap::TreemapLayout;

const SCENE: &str = "createNode transform -n \"Arm\";\n\
createNode mesh -n \"Body\" -p \"Arm\";\n\
\tsetAttr -s 12 \".vt[0:11]\" 0 0 0 1 1 1 2 2 2 3 3 3 4 4 4 5 5 5 6 6 6 7 7 7 8 8 8 9 9 9 10 10 10 11 11 11;\n\
\tsetAttr -s 12 \".n[0:11]\" 0 0 0 1 1 1 2 2 2 3 3 3 4 4 4 5 5 5 6 6 6 7 7 7 8 8 8 9 9 9 10 10 10 11 11 11;\n\
createNode nurbsCurve -n \"Ctrl\";\n\
\tsetAttr \".cc\" -type \"nurbsCurve\" 1 4 0 no 3 5 0 1 2 3 4 5 0 0 0 1 0 0;\n\
createNode joint -n \"Root\";\n\
createNode camera -n \"Persp\";\n\
\tsetAttr \".fl\" 35;\n";

fn main() {
    let (records, summary) = parse_bytes(SCENE.as_bytes());
    let scene = Arc::new(Scene::new("demo", records, summary));
    let (cols, rows) = (64_u32, 24_u32);
    let snap = Snapshot::build(
        scene,
        &TreemapLayout::default(),
        Rect::new(0.0, 0.0, f64::from(cols), f64::from(rows)),
    );

    println!("{}", snap.summary());
    for row in 0..rows {
        let line: String = (0..cols)
            .map(|col| {
                let (x, y) = (f64::from(col) + 0.5, f64::from(row) + 0.5);
                snap.index()
                    .hit_test(x, y)
                    .and_then(|id| snap.scene().record(id))
                    .and_then(|r| r.name.chars().next())
                    .unwrap_or(' ')
            })
            .collect();
        println!("{line}");
    }
    for tile in snap.treemap().tiles() {
        if let Some(info) = snap.index().metadata_for(tile.node) {
            println!(
                "{:<6} {:<11} {:>4} bytes {:>5.1}%  {}",
                info.record.name,
                info.record.node_type,
                info.record.byte_size,
                info.percent,
                info.color
            );
        }
    }
}
