//! Feature registry: the validated, ordered, partitioned input list.
//!
//! The upstream map-file reader hands over raw `(name, kind, coordinates)`
//! records. The registry builds real geometries out of them, drops what it
//! cannot use (unnamed or degenerate records, counted rather than raised),
//! and partitions the survivors by kind. Input order is preserved in every
//! partition: later stages resolve ties by first match, so order is part of
//! the output contract.

use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, GeometryKind};

/// One unvalidated record from the map-file reader.
///
/// Serde field names follow the wire format of the feature extractor
/// (`type` / `coordinates`), so record lists round-trip through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Vec<(f64, f64)>,
}

/// A named, validated, immutable map feature.
///
/// Duplicate names are legal and preserved as distinct features; a site map
/// may label two plots identically and the classifier must keep both.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub geometry: Geometry,
}

impl Feature {
    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }
}

/// The registry: features partitioned by kind, with data-quality counters.
///
/// `points` are carried for completeness; the hierarchy stages only consume
/// polygons and line strings, and unclassified points surface in the orphan
/// list of the final result.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    pub polygons: Vec<Feature>,
    pub linestrings: Vec<Feature>,
    pub points: Vec<Feature>,
    /// Records dropped for an empty or whitespace-only name.
    pub skipped_unnamed: usize,
    /// Records dropped for a degenerate geometry (ring < 3 points, line < 2).
    pub skipped_degenerate: usize,
}

impl FeatureSet {
    /// Validate and partition raw records. Never fails: bad records are
    /// counted and skipped so one malformed placemark cannot abort a whole
    /// map.
    pub fn from_records(records: Vec<FeatureRecord>) -> Self {
        let mut set = FeatureSet::default();
        for record in records {
            if record.name.trim().is_empty() {
                set.skipped_unnamed += 1;
                continue;
            }
            let geometry = match Geometry::build(record.kind, record.coordinates) {
                Ok(geometry) => geometry,
                Err(_) => {
                    set.skipped_degenerate += 1;
                    continue;
                }
            };
            let feature = Feature { name: record.name, geometry };
            match feature.kind() {
                GeometryKind::Polygon => set.polygons.push(feature),
                GeometryKind::LineString => set.linestrings.push(feature),
                GeometryKind::Point => set.points.push(feature),
            }
        }
        set
    }

    /// Number of registered features across all partitions.
    pub fn len(&self) -> usize {
        self.polygons.len() + self.linestrings.len() + self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
