// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size model: entries ordered by size, with percentages and per-type totals.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// One measured item handed to [`SizeModel::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeInput<'a, K> {
    /// Caller's key for the item.
    pub node: K,
    /// Size in bytes.
    pub byte_size: u64,
    /// Type name used for per-type totals.
    pub node_type: &'a str,
}

/// One entry of the size model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeEntry<K> {
    /// Caller's key.
    pub node: K,
    /// Size in bytes.
    pub byte_size: u64,
    /// Share of the model's total, in percent.
    pub percent: f64,
    /// Position in the input sequence.
    pub ordinal: usize,
}

/// Aggregate for one node type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeTotal {
    /// Type name.
    pub node_type: String,
    /// Bytes across all entries of this type.
    pub byte_size: u64,
    /// Number of entries of this type.
    pub count: usize,
    /// Share of the model's total, in percent.
    pub percent: f64,
}

/// Entries sorted by descending size plus per-type totals.
///
/// Ties keep input order, so building the same input twice yields the same
/// model. When every entry is zero bytes, all percentages are zero and
/// [`SizeModel::equal_partition`] asks the layout to give every entry the same
/// area in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeModel<K> {
    entries: Vec<SizeEntry<K>>,
    types: Vec<TypeTotal>,
    total_bytes: u64,
    equal_partition: bool,
}

impl<K> Default for SizeModel<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            types: Vec::new(),
            total_bytes: 0,
            equal_partition: false,
        }
    }
}

impl<K: Copy> SizeModel<K> {
    /// Build the model from items in input order.
    pub fn build<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = SizeInput<'a, K>>,
    {
        let mut entries = Vec::new();
        let mut types: Vec<TypeTotal> = Vec::new();
        let mut type_slots: BTreeMap<&'a str, usize> = BTreeMap::new();
        let mut total_bytes = 0_u64;

        for (ordinal, item) in items.into_iter().enumerate() {
            total_bytes = total_bytes.saturating_add(item.byte_size);
            entries.push(SizeEntry {
                node: item.node,
                byte_size: item.byte_size,
                percent: 0.0,
                ordinal,
            });
            let slot = *type_slots.entry(item.node_type).or_insert_with(|| {
                types.push(TypeTotal {
                    node_type: String::from(item.node_type),
                    byte_size: 0,
                    count: 0,
                    percent: 0.0,
                });
                types.len() - 1
            });
            types[slot].byte_size += item.byte_size;
            types[slot].count += 1;
        }

        // Stable sort keeps input order among equal sizes.
        entries.sort_by(|a, b| b.byte_size.cmp(&a.byte_size));
        types.sort_by(|a, b| b.byte_size.cmp(&a.byte_size));

        if total_bytes > 0 {
            let total = total_bytes as f64;
            for e in &mut entries {
                e.percent = e.byte_size as f64 / total * 100.0;
            }
            for t in &mut types {
                t.percent = t.byte_size as f64 / total * 100.0;
            }
        }

        let equal_partition = total_bytes == 0 && !entries.is_empty();
        Self {
            entries,
            types,
            total_bytes,
            equal_partition,
        }
    }
}

impl<K> SizeModel<K> {
    /// Entries by descending size, ties in input order.
    pub fn entries(&self) -> &[SizeEntry<K>] {
        &self.entries
    }

    /// Per-type totals by descending size, ties in order of first appearance.
    pub fn type_totals(&self) -> &[TypeTotal] {
        &self.types
    }

    /// Sum of all entry sizes.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the model has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the model is non-empty but every entry is zero bytes.
    pub fn equal_partition(&self) -> bool {
        self.equal_partition
    }
}
