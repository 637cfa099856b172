// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile captions.

use scenemap_parse::NodeRecord;

/// Tiles at least this wide show the node name and share; narrower tiles
/// show only the byte count.
pub const LABEL_MIN_WIDTH: f64 = 80.0;

/// Text drawn inside a tile of the given width.
pub fn tile_label(record: &NodeRecord, percent: f64, width: f64) -> String {
    if width > LABEL_MIN_WIDTH {
        format!(
            "{}\n{percent:.1}% ({})",
            record.display_name(),
            record.byte_size
        )
    } else {
        record.byte_size.to_string()
    }
}

/// Tooltip for a tile: name, size and type.
pub fn tooltip(record: &NodeRecord) -> String {
    format!(
        "{} ({})\n{}",
        record.display_name(),
        record.byte_size,
        record.node_type
    )
}

#[cfg(test)]
mod tests {
    use scenemap_parse::{NodeId, RecordStatus};

    use super::*;

    fn record(name: &str, size: u64) -> NodeRecord {
        NodeRecord {
            id: NodeId(0),
            name: name.to_owned(),
            node_type: "mesh".to_owned(),
            parent: None,
            byte_size: size,
            start_offset: 0,
            end_offset: size,
            line_count: 1,
            status: RecordStatus::Complete,
        }
    }

    #[test]
    fn wide_tiles_show_name_and_share() {
        let r = record("bodyShape", 48_213);
        assert_eq!(tile_label(&r, 37.26, 120.0), "bodyShape\n37.3% (48213)");
        assert_eq!(tile_label(&r, 37.26, 80.0), "48213");
    }

    #[test]
    fn tooltip_has_type_on_second_line() {
        assert_eq!(tooltip(&record("bodyShape", 12)), "bodyShape (12)\nmesh");
        assert_eq!(tooltip(&record("", 3)), "<unnamed> (3)\nmesh");
    }
}
