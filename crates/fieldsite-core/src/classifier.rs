//! Pipeline orchestrator: one classification pass over a site map's
//! features.
//!
//! Stage order:
//!   1. Registry: validate records, partition by kind
//!   2. Polygon nesting: root Blocks vs nested Plot candidates
//!   3. Transect assignment: line strings onto Blocks
//!   4. Plot assignment: nested polygons under Transects or Blocks
//!   5. Export: strip geometry, emit the tree plus orphans
//!
//! Each stage is a pure function over owned data from the one before; the
//! whole pass is synchronous and deterministic, so classifying the same
//! record list twice yields identical results.

use crate::hierarchy::{export_hierarchy, Classification};
use crate::nesting::resolve_nesting;
use crate::plots::assign_plots;
use crate::registry::{FeatureRecord, FeatureSet};
use crate::transects::assign_transects;

/// Classify a site map's features into the Block → Transect → Plot tree.
pub fn classify(records: Vec<FeatureRecord>) -> Classification {
    // ── 1. Registry ─────────────────────────────────────────────────────
    let set = FeatureSet::from_records(records);

    // ── 2. Polygon nesting ──────────────────────────────────────────────
    let nesting = resolve_nesting(&set.polygons);

    // ── 3. Transect assignment ──────────────────────────────────────────
    let transects = assign_transects(&set.linestrings, &set.polygons, &nesting.roots);

    // ── 4. Plot assignment ──────────────────────────────────────────────
    let plots = assign_plots(
        &set.polygons,
        &set.linestrings,
        &nesting.roots,
        &nesting.nested,
        &transects,
    );

    // ── 5. Export ───────────────────────────────────────────────────────
    export_hierarchy(&set, &nesting, &transects, &plots)
}
