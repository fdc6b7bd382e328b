//! Plot assignment: place every nested polygon under a Transect or directly
//! under its Block, or orphan it.
//!
//! A plot first needs a containing root Block (`contains || covers`, first
//! root in registry order). Within that block, the plot prefers a transect
//! it touches: the first of the block's transects, in child-insertion order,
//! whose line comes within [`TOUCH_EPSILON`] of the plot or intersects it.
//! No such transect means the plot hangs directly off the block.
//!
//! A nested polygon with no containing root is an orphan. That happens when
//! every polygon covering it is itself nested (deeper than the two-level
//! root/candidate split resolves, or mutually-covering duplicate rings).
//! Such polygons surface in the orphan list; they are never promoted through
//! a transitive-ancestry search.

use crate::registry::Feature;
use crate::transects::TransectAssignment;

/// Plots within this planar distance of a transect line count as touching it.
pub const TOUCH_EPSILON: f64 = 1e-6;

/// Where one nested polygon ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotPlacement {
    /// Child of the transect with this line-string index.
    Transect(usize),
    /// Direct child of the root with this index into the roots list.
    Block(usize),
    /// No root contains it.
    Orphaned,
}

/// Per-plot placements, parallel to the nested-polygon index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotAssignment {
    pub placements: Vec<PlotPlacement>,
}

/// Place every nested polygon. `roots` and `nested` index into `polygons`;
/// `transects` is the block assignment from the previous stage.
pub fn assign_plots(
    polygons: &[Feature],
    linestrings: &[Feature],
    roots: &[usize],
    nested: &[usize],
    transects: &TransectAssignment,
) -> PlotAssignment {
    let mut placements = Vec::with_capacity(nested.len());

    for &p in nested {
        let plot = &polygons[p].geometry;

        // First containing root in registry order wins, even when several
        // overlapping roots contain the plot.
        let block = roots.iter().position(|&r| {
            let root = &polygons[r].geometry;
            root.contains(plot) || root.covers(plot)
        });
        let block = match block {
            Some(block) => block,
            None => {
                placements.push(PlotPlacement::Orphaned);
                continue;
            }
        };

        // Candidate transects: the ones assigned to this block, in the order
        // they were inserted as its children.
        let adopted = transects
            .block_of
            .iter()
            .enumerate()
            .filter(|&(_, assigned)| *assigned == Some(block))
            .find(|&(t, _)| {
                let line = &linestrings[t].geometry;
                line.distance(plot) < TOUCH_EPSILON || line.intersects(plot)
            })
            .map(|(t, _)| t);

        placements.push(match adopted {
            Some(t) => PlotPlacement::Transect(t),
            None => PlotPlacement::Block(block),
        });
    }

    PlotAssignment { placements }
}
