//! Polygon nesting: split polygons into root Blocks and nested Plot
//! candidates.
//!
//! Every ordered polygon pair is tested with `contains || covers`. A polygon
//! that no other polygon nests is a root (Block); everything else is a Plot
//! candidate. The scan is O(n²) over the polygon count, bounded in practice
//! by maps of a few hundred polygons nested two or three levels deep. The
//! final parent of each candidate is resolved later by a direct
//! root-containment lookup, not from the pair graph, so transitively
//! recorded ancestors cost nothing.

use crate::registry::Feature;

/// Index partition of the polygon list, registry order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonNesting {
    /// Polygons nested by nothing: the Blocks.
    pub roots: Vec<usize>,
    /// Polygons nested by at least one other polygon: the Plot candidates.
    pub nested: Vec<usize>,
}

/// Partition `polygons` into roots and nested candidates.
///
/// Mutually-covering polygons (duplicated rings, a malformed map) nest each
/// other, leaving neither as a root; downstream they surface as orphans
/// instead of being silently promoted.
pub fn resolve_nesting(polygons: &[Feature]) -> PolygonNesting {
    let mut has_parent = vec![false; polygons.len()];

    for (i, a) in polygons.iter().enumerate() {
        for (j, b) in polygons.iter().enumerate() {
            if i == j {
                continue;
            }
            if a.geometry.contains(&b.geometry) || a.geometry.covers(&b.geometry) {
                has_parent[j] = true;
            }
        }
    }

    let mut roots = Vec::new();
    let mut nested = Vec::new();
    for (i, &parented) in has_parent.iter().enumerate() {
        if parented {
            nested.push(i);
        } else {
            roots.push(i);
        }
    }
    PolygonNesting { roots, nested }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn square(name: &str, x0: f64, y0: f64, size: f64) -> Feature {
        Feature {
            name: name.to_string(),
            geometry: Geometry::polygon(vec![
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
            ])
            .unwrap(),
        }
    }

    #[test]
    fn disjoint_polygons_are_all_roots() {
        let polygons = vec![square("A", 0.0, 0.0, 2.0), square("B", 10.0, 0.0, 2.0)];
        let nesting = resolve_nesting(&polygons);
        assert_eq!(nesting.roots, [0, 1]);
        assert!(nesting.nested.is_empty());
    }

    #[test]
    fn contained_polygon_is_nested() {
        let polygons = vec![
            square("block", 0.0, 0.0, 10.0),
            square("plot", 4.0, 4.0, 2.0),
        ];
        let nesting = resolve_nesting(&polygons);
        assert_eq!(nesting.roots, [0]);
        assert_eq!(nesting.nested, [1]);
    }

    #[test]
    fn nesting_is_independent_of_declaration_order() {
        // Plot listed before its block: still nested.
        let polygons = vec![
            square("plot", 4.0, 4.0, 2.0),
            square("block", 0.0, 0.0, 10.0),
        ];
        let nesting = resolve_nesting(&polygons);
        assert_eq!(nesting.roots, [1]);
        assert_eq!(nesting.nested, [0]);
    }

    #[test]
    fn three_level_concentric_yields_one_root() {
        let polygons = vec![
            square("outer", 0.0, 0.0, 12.0),
            square("middle", 2.0, 2.0, 8.0),
            square("inner", 4.0, 4.0, 2.0),
        ];
        let nesting = resolve_nesting(&polygons);
        assert_eq!(nesting.roots, [0]);
        assert_eq!(nesting.nested, [1, 2]);
    }

    #[test]
    fn mutually_covering_duplicates_leave_no_root() {
        let polygons = vec![square("A", 0.0, 0.0, 4.0), square("A", 0.0, 0.0, 4.0)];
        let nesting = resolve_nesting(&polygons);
        assert!(nesting.roots.is_empty());
        assert_eq!(nesting.nested, [0, 1]);
    }
}
