// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background pipeline against real files.

use std::fs;
use std::sync::Arc;

use kurbo::Rect;
use scenemap::{Error, Pipeline, SceneSource, ViewConfig};
use scenemap_parse::SceneError;
use scenemap_responder::events::{HostCommand, RecordingHost};

const SHOT: &str = "//Maya ASCII 2024 scene\n\
requires maya \"2024\";\n\
createNode transform -s -n \"persp\";\n\
\tsetAttr \".t\" -type \"double3\" 28 21 28 ;\n\
createNode camera -s -n \"perspShape\" -p \"persp\";\n\
\tsetAttr -k off \".v\" no;\n\
\tsetAttr \".fl\" 34.999999999999993;\n\
createNode transform -n \"body\";\n\
createNode mesh -n \"bodyShape\" -p \"body\";\n\
\tsetAttr -s 8 \".vt[0:7]\"  -0.5 -0.5 0.5 0.5 -0.5 0.5 -0.5 0.5 0.5 0.5 0.5 0.5\n\
\t\t -0.5 0.5 -0.5 0.5 0.5 -0.5 -0.5 -0.5 -0.5 0.5 -0.5 -0.5;\n\
\tsetAttr \".notes\" -type \"string\" \"createNode fake -n \\\"nope\\\";\";\n\
connectAttr \"bodyShape.iog\" \":initialShadingGroup.dsm\" -na;\n";

fn write_scene(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn open_file_then_click() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(&dir, "shot.ma", SHOT);
    let mut pipeline = Pipeline::new(ViewConfig::default());
    let snap = pipeline
        .open(SceneSource::path(&path), Rect::new(0.0, 0.0, 600.0, 400.0))
        .wait()
        .unwrap();

    assert_eq!(snap.scene().title(), "shot.ma");
    let names: Vec<_> = snap.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["persp", "perspShape", "body", "bodyShape"]);
    assert_eq!(snap.model().entries()[0].node, snap.records()[3].id);

    let shape = snap.index().tile(snap.records()[3].id).unwrap().rect.center();
    let mut host = RecordingHost::default();
    snap.index().click_at(shape.x, shape.y, &mut host).unwrap();
    assert_eq!(
        host.commands,
        [
            HostCommand::Select("bodyShape".into()),
            HostCommand::CopyToClipboard("bodyShape".into()),
        ]
    );
}

#[test]
fn connections_can_be_cut_off() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(&dir, "shot.ma", SHOT);
    let mut config = ViewConfig::default();
    config.parse.stop_at_connections = true;
    let mut pipeline = Pipeline::new(config);
    let snap = pipeline
        .open(SceneSource::path(&path), config.bounds)
        .wait()
        .unwrap();
    let connect = SHOT.find("connectAttr").unwrap() as u64;
    assert_eq!(snap.records()[3].end_offset, connect);
    assert_eq!(snap.summary().trailer_bytes, SHOT.len() as u64 - connect);
}

#[test]
fn missing_file_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(&dir, "shot.ma", SHOT);
    let mut pipeline = Pipeline::new(ViewConfig::default());
    let good = pipeline
        .open(SceneSource::path(&path), Rect::new(0.0, 0.0, 100.0, 100.0))
        .wait()
        .unwrap();

    let err = pipeline
        .open(
            SceneSource::path(dir.path().join("gone.ma")),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .wait()
        .unwrap_err();
    assert!(matches!(err, Error::File(SceneError::Open { .. })), "{err}");
    assert!(Arc::ptr_eq(&pipeline.snapshot().unwrap(), &good));

    // Directories are rejected too.
    let err = pipeline
        .open(SceneSource::path(dir.path()), Rect::new(0.0, 0.0, 1.0, 1.0))
        .wait()
        .unwrap_err();
    assert!(matches!(err, Error::File(SceneError::NotAFile(_))), "{err}");
    assert!(Arc::ptr_eq(&pipeline.snapshot().unwrap(), &good));

    // The old scene can still be resized.
    let resized = pipeline.resize(Rect::new(0.0, 0.0, 40.0, 90.0)).wait().unwrap();
    assert!(Arc::ptr_eq(resized.scene(), good.scene()));
}

#[test]
fn later_open_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_scene(&dir, "a.ma", SHOT);
    let second = write_scene(&dir, "b.ma", "createNode joint -n \"root\";\n");
    let mut pipeline = Pipeline::new(ViewConfig::default());
    let a = pipeline.open(SceneSource::path(&first), ViewConfig::default().bounds);
    let b = pipeline.open(SceneSource::path(&second), ViewConfig::default().bounds);

    // The first run either finished before it was superseded or was cancelled;
    // either way the second one ends up published.
    match a.wait() {
        Ok(_) | Err(Error::Cancelled) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
    let b = b.wait().unwrap();
    assert_eq!(b.scene().title(), "b.ma");
    assert!(Arc::ptr_eq(&pipeline.snapshot().unwrap(), &b));
}

#[test]
fn resizes_do_not_reparse() {
    let mut pipeline = Pipeline::new(ViewConfig::default());
    let base = pipeline
        .open(SceneSource::bytes("inline", SHOT.as_bytes()), Rect::new(0.0, 0.0, 10.0, 10.0))
        .wait()
        .unwrap();
    let mut last = None;
    for w in [20.0, 30.0, 40.0] {
        last = Some(pipeline.resize(Rect::new(0.0, 0.0, w, 10.0)));
    }
    let last = last.unwrap().wait().unwrap();
    assert!(Arc::ptr_eq(last.scene(), base.scene()));
    assert_eq!(last.bounds(), Rect::new(0.0, 0.0, 40.0, 10.0));
    assert!(Arc::ptr_eq(&pipeline.snapshot().unwrap(), &last));
}
