//! Site map classification front end.
//!
//! Reads a GeoJSON FeatureCollection exported from a field-site map (one
//! feature per named placemark), filters out the noise names the raw export
//! carries (unnamed placemarks, distance-interval markers like "60m 1"),
//! classifies the rest into the Block → Transect → Plot hierarchy and prints
//! the hierarchy JSON on stdout. Data-quality counts go to stderr.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use serde_json::{json, Value};

use fieldsite_core::{classify, FeatureRecord, GeometryKind};

#[derive(Parser, Debug)]
#[command(name = "classify", about = "Infer the Block → Transect → Plot hierarchy of a site map")]
struct Args {
    /// GeoJSON FeatureCollection of named site features.
    input: String,

    /// Also write the filtered flat feature list back out as GeoJSON.
    #[arg(long)]
    geojson: Option<String>,
}

/// Counts of records the filters removed before classification.
#[derive(Debug, Default)]
struct FilterStats {
    unnamed: usize,
    markers: usize,
    unsupported: usize,
}

/// Pull `[lng, lat]` pairs out of a GeoJSON position array.
fn coord_pairs(positions: &Value) -> Vec<(f64, f64)> {
    positions
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|pos| {
                    let pos = pos.as_array()?;
                    Some((pos.first()?.as_f64()?, pos.get(1)?.as_f64()?))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Convert a GeoJSON FeatureCollection into classifier records, applying the
/// name filters the map export needs.
fn load_records(collection: &Value, stats: &mut FilterStats) -> Result<Vec<FeatureRecord>> {
    // Distance-interval markers: "60m", "100m 2", …
    let marker = Regex::new(r"(?i)^\d+m")?;

    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .context("input is not a GeoJSON FeatureCollection (no 'features' array)")?;

    let mut records = Vec::new();
    for feature in features {
        let name = feature
            .pointer("/properties/name")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if name.is_empty() || name == "Unnamed" {
            stats.unnamed += 1;
            continue;
        }
        if marker.is_match(name) {
            stats.markers += 1;
            continue;
        }

        let geometry_type = feature.pointer("/geometry/type").and_then(Value::as_str);
        let coordinates = feature.pointer("/geometry/coordinates");
        let (kind, coordinates) = match (geometry_type, coordinates) {
            // Exterior ring only; plot and block rings never carry holes.
            (Some("Polygon"), Some(coords)) => {
                (GeometryKind::Polygon, coord_pairs(coords.get(0).unwrap_or(&Value::Null)))
            }
            (Some("LineString"), Some(coords)) => (GeometryKind::LineString, coord_pairs(coords)),
            (Some("Point"), Some(coords)) => {
                let pair = coords
                    .as_array()
                    .and_then(|pos| Some((pos.first()?.as_f64()?, pos.get(1)?.as_f64()?)));
                (GeometryKind::Point, pair.into_iter().collect())
            }
            _ => {
                stats.unsupported += 1;
                continue;
            }
        };

        records.push(FeatureRecord { name: name.to_string(), kind, coordinates });
    }
    Ok(records)
}

/// Re-export the filtered flat feature list as a GeoJSON FeatureCollection.
fn export_geojson(records: &[FeatureRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|record| {
            let positions: Vec<Value> =
                record.coordinates.iter().map(|&(x, y)| json!([x, y])).collect();
            let geometry = match record.kind {
                GeometryKind::Point => json!({
                    "type": "Point",
                    "coordinates": positions.first().cloned().unwrap_or(Value::Null),
                }),
                GeometryKind::LineString => json!({
                    "type": "LineString",
                    "coordinates": positions,
                }),
                GeometryKind::Polygon => {
                    // GeoJSON rings are explicitly closed.
                    let mut ring = positions;
                    if ring.first() != ring.last() {
                        if let Some(first) = ring.first().cloned() {
                            ring.push(first);
                        }
                    }
                    json!({ "type": "Polygon", "coordinates": [ring] })
                }
            };
            json!({
                "type": "Feature",
                "properties": { "name": record.name, "type": record.kind },
                "geometry": geometry,
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input))?;
    let collection: Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", args.input))?;

    let mut stats = FilterStats::default();
    let records = load_records(&collection, &mut stats)?;
    eprintln!(
        "{}: {} features ({} unnamed, {} distance markers, {} unsupported geometries filtered)",
        args.input,
        records.len(),
        stats.unnamed,
        stats.markers,
        stats.unsupported
    );

    if let Some(path) = &args.geojson {
        let flat = export_geojson(&records);
        fs::write(path, serde_json::to_string(&flat)?)
            .with_context(|| format!("failed to write {path}"))?;
        eprintln!("wrote flat GeoJSON to {path}");
    }

    let result = classify(records);
    if result.skipped_unnamed + result.skipped_degenerate > 0 {
        eprintln!(
            "skipped during classification: {} unnamed, {} degenerate",
            result.skipped_unnamed, result.skipped_degenerate
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(features: Vec<Value>) -> Value {
        json!({ "type": "FeatureCollection", "features": features })
    }

    fn feature(name: &str, geometry: Value) -> Value {
        json!({ "type": "Feature", "properties": { "name": name }, "geometry": geometry })
    }

    #[test]
    fn marker_and_unnamed_names_are_filtered() {
        let input = collection(vec![
            feature("60m 1", json!({ "type": "Point", "coordinates": [0.0, 0.0] })),
            feature("100M", json!({ "type": "Point", "coordinates": [0.0, 0.0] })),
            feature("Unnamed", json!({ "type": "Point", "coordinates": [0.0, 0.0] })),
            feature("Block_A", json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
            })),
        ]);
        let mut stats = FilterStats::default();
        let records = load_records(&input, &mut stats).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Block_A");
        assert_eq!(stats.markers, 2);
        assert_eq!(stats.unnamed, 1);
    }

    #[test]
    fn polygon_uses_exterior_ring_only() {
        let input = collection(vec![feature(
            "B",
            json!({
                "type": "Polygon",
                "coordinates": [
                    [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                    [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
                ],
            }),
        )]);
        let mut stats = FilterStats::default();
        let records = load_records(&input, &mut stats).unwrap();
        assert_eq!(records[0].kind, GeometryKind::Polygon);
        assert_eq!(records[0].coordinates.len(), 5);
    }

    #[test]
    fn unsupported_geometry_is_counted() {
        let input = collection(vec![feature(
            "multi",
            json!({ "type": "MultiPolygon", "coordinates": [] }),
        )]);
        let mut stats = FilterStats::default();
        let records = load_records(&input, &mut stats).unwrap();
        assert!(records.is_empty());
        assert_eq!(stats.unsupported, 1);
    }

    #[test]
    fn exported_rings_are_closed() {
        let records = vec![FeatureRecord {
            name: "B".to_string(),
            kind: GeometryKind::Polygon,
            coordinates: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)],
        }];
        let flat = export_geojson(&records);
        let ring = flat.pointer("/features/0/geometry/coordinates/0").unwrap();
        let ring = ring.as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }
}
