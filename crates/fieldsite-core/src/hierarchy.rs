//! Output tree types and the geometry-stripping exporter.
//!
//! The final hierarchy carries names only. Children reference other nodes by
//! name rather than by ownership, which keeps the tree acyclic even for
//! pathological input where two identical rings cover each other. Serde
//! field spellings (`type`, `geometry_type`) match the wire format the
//! downstream wizard and report tooling already consume.

use serde::{Deserialize, Serialize};

use crate::geometry::GeometryKind;
use crate::nesting::PolygonNesting;
use crate::plots::{PlotAssignment, PlotPlacement};
use crate::registry::FeatureSet;
use crate::transects::TransectAssignment;

/// Role of a child reference inside a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    Transect,
    Plot,
}

/// A by-name reference to a child node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRef {
    #[serde(rename = "type")]
    pub kind: ChildKind,
    pub name: String,
}

/// One named node of the hierarchy, geometry stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(rename = "geometry_type")]
    pub kind: GeometryKind,
    pub children: Vec<ChildRef>,
}

/// A feature the two-level containment model could not place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orphan {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
}

/// The complete classification of one site map.
///
/// `transects` and `plots` are flat views of every transect and every nested
/// polygon in registry order, independent of where they hang in the tree;
/// `blocks` holds the tree roots. The skip counters make upstream data
/// quality visible alongside the hierarchy. The value is final: re-running
/// the classifier on the same input reproduces it field for field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub blocks: Vec<HierarchyNode>,
    pub transects: Vec<HierarchyNode>,
    pub plots: Vec<HierarchyNode>,
    pub orphans: Vec<Orphan>,
    pub skipped_unnamed: usize,
    pub skipped_degenerate: usize,
}

/// Assemble the final tree from the stage outputs, stripping geometry.
///
/// Every registered polygon and line string ends up reachable from `blocks`
/// or listed in `orphans`; named points pass straight through to `orphans`
/// since the hierarchy stages never consume them.
pub fn export_hierarchy(
    set: &FeatureSet,
    nesting: &PolygonNesting,
    transects: &TransectAssignment,
    plots: &PlotAssignment,
) -> Classification {
    let mut orphans = Vec::new();

    // Block nodes, registry order.
    let mut blocks: Vec<HierarchyNode> = nesting
        .roots
        .iter()
        .map(|&r| HierarchyNode {
            name: set.polygons[r].name.clone(),
            kind: GeometryKind::Polygon,
            children: Vec::new(),
        })
        .collect();

    // Transect nodes; attach each to its block (or orphan it) in registry
    // order, so block children start with transects in that order.
    let mut transect_nodes: Vec<HierarchyNode> = set
        .linestrings
        .iter()
        .map(|f| HierarchyNode {
            name: f.name.clone(),
            kind: GeometryKind::LineString,
            children: Vec::new(),
        })
        .collect();
    for (t, assigned) in transects.block_of.iter().enumerate() {
        let child = ChildRef { kind: ChildKind::Transect, name: transect_nodes[t].name.clone() };
        match assigned {
            Some(b) => blocks[*b].children.push(child),
            None => {
                orphans.push(Orphan { name: child.name, kind: GeometryKind::LineString });
            }
        }
    }

    // Flat plot nodes plus their tree attachment.
    let mut plot_nodes = Vec::with_capacity(nesting.nested.len());
    for (slot, &p) in nesting.nested.iter().enumerate() {
        let name = set.polygons[p].name.clone();
        plot_nodes.push(HierarchyNode {
            name: name.clone(),
            kind: GeometryKind::Polygon,
            children: Vec::new(),
        });
        let child = ChildRef { kind: ChildKind::Plot, name };
        match plots.placements[slot] {
            PlotPlacement::Transect(t) => transect_nodes[t].children.push(child),
            PlotPlacement::Block(b) => blocks[b].children.push(child),
            PlotPlacement::Orphaned => {
                orphans.push(Orphan { name: child.name, kind: GeometryKind::Polygon });
            }
        }
    }

    // Survey points are never classified; keep them visible.
    for point in &set.points {
        orphans.push(Orphan { name: point.name.clone(), kind: GeometryKind::Point });
    }

    Classification {
        blocks,
        transects: transect_nodes,
        plots: plot_nodes,
        orphans,
        skipped_unnamed: set.skipped_unnamed,
        skipped_degenerate: set.skipped_degenerate,
    }
}
