// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A parsed scene: records, summary and the derived size model.

use std::collections::HashMap;
use std::sync::Arc;

use scenemap_parse::{NodeId, NodeRecord, ParseSummary};
use scenemap_responder::events::NodeNames;
use scenemap_responder::types::ParentLookup;
use scenemap_treemap::{SizeInput, SizeModel};

/// Records of one parse and everything derived from them.
///
/// Immutable once built. A resize shares the same `Scene` between the old and
/// the new snapshot; only a re-parse replaces it.
#[derive(Clone, Debug)]
pub struct Scene {
    title: String,
    records: Vec<NodeRecord>,
    summary: ParseSummary,
    model: SizeModel<NodeId>,
    percents: Vec<f64>,
    parents: SceneParents,
}

impl Scene {
    /// Derive the size model and parent links for `records`.
    ///
    /// Records must be in parse order, so that each id equals its position.
    pub fn new(title: impl Into<String>, records: Vec<NodeRecord>, summary: ParseSummary) -> Self {
        debug_assert!(
            records.iter().enumerate().all(|(i, r)| r.id.index() == i),
            "records must be indexed by id"
        );
        let model = SizeModel::build(records.iter().map(|r| SizeInput {
            node: r.id,
            byte_size: r.byte_size,
            node_type: &r.node_type,
        }));
        let mut percents = vec![0.0; records.len()];
        for e in model.entries() {
            percents[e.node.index()] = e.percent;
        }
        let parents = SceneParents::resolve(&records);
        Self {
            title: title.into(),
            records,
            summary,
            model,
            percents,
            parents,
        }
    }

    /// Window title for the scene.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Records in parse order.
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// Parse accounting.
    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    /// Size model over the records.
    pub fn model(&self) -> &SizeModel<NodeId> {
        &self.model
    }

    /// Record for `id`.
    pub fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.records.get(id.index())
    }

    /// Share of the scene's node bytes held by `id`, in percent.
    pub fn percent(&self, id: NodeId) -> Option<f64> {
        self.percents.get(id.index()).copied()
    }

    /// True if no node was parsed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parent links between records, resolved by name.
    pub fn parents(&self) -> &SceneParents {
        &self.parents
    }
}

impl NodeNames<NodeId> for Scene {
    fn name_of(&self, node: &NodeId) -> Option<&str> {
        self.record(*node)
            .map(|r| r.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

/// Parent of each record, from its `-p` flag.
///
/// Names are matched against earlier and later records alike; the first
/// record with a given name wins. Unresolved parents are roots.
#[derive(Clone, Debug, Default)]
pub struct SceneParents {
    parents: Arc<[Option<NodeId>]>,
}

impl SceneParents {
    fn resolve(records: &[NodeRecord]) -> Self {
        let mut by_name: HashMap<&str, NodeId> = HashMap::with_capacity(records.len());
        for r in records {
            if !r.name.is_empty() {
                by_name.entry(r.name.as_str()).or_insert(r.id);
            }
        }
        let parents = records
            .iter()
            .map(|r| {
                let parent = by_name.get(r.parent.as_deref()?).copied()?;
                (parent != r.id).then_some(parent)
            })
            .collect();
        Self { parents }
    }
}

impl ParentLookup<NodeId> for SceneParents {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parents.get(node.index()).copied().flatten()
    }
}
