//! Grouping of fingerprinted shapes.
//!
//! # Overview
//!
//! Candidates are grouped by [`Fingerprint`] in first-seen order: groups
//! appear in the order their first member was collected, and members keep
//! collection order. The first member of each group is the one that is kept.
//! Candidates with the empty "no geometry" key are counted and dropped.
//!
//! # Example
//!
//! ```
//! use pathdedup::document::ItemId;
//! use pathdedup::duplicates::group_by_fingerprint;
//! use pathdedup::fingerprint::Fingerprint;
//!
//! let key = Fingerprint::from("0.0,0.0,0.0,0.0,0.0,0.0,corner|open".to_string());
//! let candidates = vec![
//!     (ItemId(1), key.clone()),
//!     (ItemId(2), Fingerprint::empty()),
//!     (ItemId(3), key),
//! ];
//!
//! let (groups, stats) = group_by_fingerprint(candidates);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].keeper(), ItemId(1));
//! assert_eq!(groups[0].redundant(), &[ItemId(3)]);
//! assert_eq!(stats.empty_geometry, 1);
//! ```

use std::collections::HashMap;

use rayon::prelude::*;

use crate::document::{ItemId, PageItem, ShapeKind};
use crate::fingerprint::{Fingerprint, Precision};

/// Shapes sharing one fingerprint, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGroup {
    pub fingerprint: Fingerprint,
    pub members: Vec<ItemId>,
}

impl ShapeGroup {
    #[must_use]
    pub fn new(fingerprint: Fingerprint, first: ItemId) -> Self {
        Self {
            fingerprint,
            members: vec![first],
        }
    }

    /// Number of shapes in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if this group has duplicates (2+ shapes).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// The first-seen member, which is retained.
    ///
    /// # Panics
    ///
    /// Never for groups built by [`group_by_fingerprint`], which are non-empty.
    #[must_use]
    pub fn keeper(&self) -> ItemId {
        self.members[0]
    }

    /// Every member after the first; these are removed.
    #[must_use]
    pub fn redundant(&self) -> &[ItemId] {
        self.members.get(1..).unwrap_or(&[])
    }
}

/// Statistics from one grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Candidates handed to grouping
    pub total_shapes: usize,
    /// Candidates dropped for an empty fingerprint
    pub empty_geometry: usize,
    /// Distinct non-empty fingerprints
    pub unique_fingerprints: usize,
    /// Groups with 2+ members
    pub duplicate_groups: usize,
    /// Members beyond the first across all duplicate groups
    pub redundant_shapes: usize,
}

impl GroupingStats {
    /// Percentage of candidates that are redundant copies.
    #[must_use]
    pub fn redundancy_rate(&self) -> f64 {
        if self.total_shapes == 0 {
            0.0
        } else {
            (self.redundant_shapes as f64 / self.total_shapes as f64) * 100.0
        }
    }
}

/// Fingerprint candidates, in parallel once the list reaches `parallel_threshold`.
///
/// The result keeps candidate order regardless of how it was computed.
#[must_use]
pub fn fingerprint_candidates(
    candidates: &[&PageItem],
    kind: ShapeKind,
    precision: Precision,
    parallel_threshold: usize,
) -> Vec<(ItemId, Fingerprint)> {
    let compute = |item: &&PageItem| (item.id, Fingerprint::of_item(item, kind, precision));

    if candidates.len() >= parallel_threshold.max(1) {
        log::debug!(
            "Fingerprinting {} {}(s) in parallel",
            candidates.len(),
            kind
        );
        candidates.par_iter().map(compute).collect()
    } else {
        candidates.iter().map(compute).collect()
    }
}

/// Group fingerprinted candidates (first-seen order, empty keys skipped).
///
/// Returns every non-empty group, including singletons, plus statistics.
#[must_use]
pub fn group_by_fingerprint(
    candidates: impl IntoIterator<Item = (ItemId, Fingerprint)>,
) -> (Vec<ShapeGroup>, GroupingStats) {
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<ShapeGroup> = Vec::new();
    let mut stats = GroupingStats::default();

    for (id, fingerprint) in candidates {
        stats.total_shapes += 1;

        if fingerprint.is_empty() {
            stats.empty_geometry += 1;
            log::trace!("Skipping {} with empty fingerprint", id);
            continue;
        }

        match index.get(&fingerprint) {
            Some(&slot) => groups[slot].members.push(id),
            None => {
                index.insert(fingerprint.clone(), groups.len());
                groups.push(ShapeGroup::new(fingerprint, id));
            }
        }
    }

    stats.unique_fingerprints = groups.len();
    for group in groups.iter().filter(|g| g.has_duplicates()) {
        stats.duplicate_groups += 1;
        stats.redundant_shapes += group.redundant().len();
        log::debug!(
            "Keeping {}, {} duplicate(s): {:?}",
            group.keeper(),
            group.redundant().len(),
            group.redundant()
        );
    }

    (groups, stats)
}

/// Ids to remove: every redundant member, group by group, in order.
#[must_use]
pub fn removal_plan(groups: &[ShapeGroup]) -> Vec<ItemId> {
    groups
        .iter()
        .flat_map(|group| group.redundant().iter().copied())
        .collect()
}
