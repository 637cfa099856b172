// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing scene files from disk.

use std::io::Write;

use scenemap_parse::{ParseStatus, SceneError, SceneParser, parse_bytes};

const SCENE: &str = r#"//Maya ASCII 2024 scene
//Name: props.ma
requires maya "2024";
currentUnit -l centimeter -a degree -t film;
createNode transform -s -n "persp";
	setAttr ".v" no;
	setAttr ".t" -type "double3" 28 21 28 ;
createNode camera -s -n "perspShape" -p "persp";
	setAttr -k off ".v" no;
	setAttr ".fl" 34.999999999999993;
createNode transform -n "pCube1";
createNode mesh -n "pCubeShape1" -p "pCube1";
	setAttr -k off ".v";
	setAttr ".uvst[0].uvsn" -type "string" "map1";
	setAttr -s 8 ".vt[0:7]"  -0.5 -0.5 0.5 0.5 -0.5 0.5 -0.5 0.5 0.5 0.5 0.5 0.5
		 -0.5 0.5 -0.5 0.5 0.5 -0.5 -0.5 -0.5 -0.5 0.5 -0.5 -0.5;
createNode script -n "uiConfigurationScriptNode";
	setAttr ".b" -type "string" "// createNode panel -n \"fake\";\ncreateNode x;";
	setAttr ".st" 3;
select -ne :time1;
connectAttr "pCubeShape1.iog" ":initialShadingGroup.dsm" -na;
// End of props.ma
"#;

#[test]
fn file_and_memory_parses_agree() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENE.as_bytes()).unwrap();
    file.flush().unwrap();

    let (from_disk, disk_summary) = SceneParser::open(file.path()).unwrap().finish();
    let (in_memory, memory_summary) = parse_bytes(SCENE.as_bytes());
    assert_eq!(from_disk, in_memory);
    assert_eq!(disk_summary, memory_summary);

    let types: Vec<_> = from_disk.iter().map(|r| r.node_type.as_str()).collect();
    assert_eq!(types, ["transform", "camera", "transform", "mesh", "script"]);
    assert_eq!(disk_summary.status, ParseStatus::Complete);
    assert_eq!(disk_summary.total_bytes, SCENE.len() as u64);
}

#[test]
fn largest_node_is_the_mesh() {
    let (records, _) = parse_bytes(SCENE.as_bytes());
    let largest = records.iter().max_by_key(|r| r.byte_size).unwrap();
    assert_eq!(largest.name, "pCubeShape1");
    assert_eq!(largest.line_count, 5);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ma");
    match SceneParser::open(&path) {
        Err(SceneError::Open { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected an open error, got {other:?}"),
    }
}

#[test]
fn directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SceneParser::open(dir.path()),
        Err(SceneError::NotAFile(_))
    ));
}

#[test]
fn empty_file_is_empty() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let (records, summary) = SceneParser::open(file.path()).unwrap().finish();
    assert!(records.is_empty());
    assert_eq!(summary.status, ParseStatus::Empty);
}
