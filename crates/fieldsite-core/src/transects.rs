//! Transect assignment: attach each line string to the first Block it
//! intersects.
//!
//! Intersection, not containment: transect lines are walked with hand-held
//! GPS units and routinely start or end a few metres outside their block
//! ring. Blocks are scanned in registry order and the first hit wins, so a
//! line crossing two overlapping blocks lands deterministically in the
//! earlier one. A transect matches at most one block.

use crate::registry::Feature;

/// Per-transect block assignment, parallel to the line-string partition.
///
/// `block_of[t]` is an index into the roots list, or `None` for a transect
/// that intersects no block. Unassigned transects stay in the flat transect
/// list and are surfaced as orphans by the exporter, so they remain visible
/// in the output rather than silently unattached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransectAssignment {
    pub block_of: Vec<Option<usize>>,
}

/// Assign every line string to the first intersecting root polygon.
///
/// `roots` holds indices into `polygons` (registry order), as produced by
/// the nesting resolver.
pub fn assign_transects(
    linestrings: &[Feature],
    polygons: &[Feature],
    roots: &[usize],
) -> TransectAssignment {
    let block_of = linestrings
        .iter()
        .map(|transect| {
            roots
                .iter()
                .position(|&r| polygons[r].geometry.intersects(&transect.geometry))
        })
        .collect();
    TransectAssignment { block_of }
}
