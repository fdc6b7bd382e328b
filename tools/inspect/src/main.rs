//! Site map diagnostics.
//!
//! Prints a per-feature table (kind, vertex count, planar area and length)
//! for a GeoJSON FeatureCollection, and with `--pair` probes the geometric
//! relation between two named features. Useful when a map classifies
//! unexpectedly: the usual culprits are a plot ring that leaks outside its
//! block or a transect that misses its block entirely.

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;

use fieldsite_core::{Geometry, GeometryKind};

#[derive(Parser, Debug)]
#[command(name = "inspect", about = "Per-feature geometry diagnostics for a site map")]
struct Args {
    /// GeoJSON FeatureCollection of site features.
    input: String,

    /// Probe the relation between two named features.
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    pair: Option<Vec<String>>,
}

struct Entry {
    name: String,
    kind: GeometryKind,
    vertices: usize,
    geometry: Option<Geometry>,
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

fn load_entries(collection: &Value) -> Result<Vec<Entry>> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .context("input is not a GeoJSON FeatureCollection (no 'features' array)")?;

    let mut entries = Vec::new();
    for feature in features {
        let name = feature
            .pointer("/properties/name")
            .and_then(Value::as_str)
            .unwrap_or("Unnamed")
            .to_string();

        let geometry_type = feature.pointer("/geometry/type").and_then(Value::as_str);
        let coordinates = feature.pointer("/geometry/coordinates");
        let (kind, coordinates) = match (geometry_type, coordinates) {
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
            _ => continue,
        };

        let vertices = coordinates.len();
        let geometry = Geometry::build(kind, coordinates).ok();
        entries.push(Entry { name, kind, vertices, geometry });
    }
    Ok(entries)
}

fn print_table(entries: &[Entry]) {
    println!("{:<32} {:<12} {:>8} {:>12} {:>12}", "name", "kind", "vertices", "area", "length");
    for entry in entries {
        match &entry.geometry {
            Some(geometry) => println!(
                "{:<32} {:<12} {:>8} {:>12.2e} {:>12.2e}",
                entry.name,
                format!("{:?}", entry.kind),
                entry.vertices,
                geometry.area(),
                geometry.length()
            ),
            None => println!(
                "{:<32} {:<12} {:>8} {:>12} {:>12}",
                entry.name,
                format!("{:?}", entry.kind),
                entry.vertices,
                "degenerate",
                "-"
            ),
        }
    }
}

fn find_geometry<'a>(entries: &'a [Entry], name: &str) -> Result<&'a Geometry> {
    entries
        .iter()
        .find(|e| e.name == name)
        .with_context(|| format!("no feature named {name:?}"))?
        .geometry
        .as_ref()
        .with_context(|| format!("feature {name:?} has a degenerate geometry"))
}

fn probe_pair(entries: &[Entry], a: &str, b: &str) -> Result<()> {
    let ga = find_geometry(entries, a)?;
    let gb = find_geometry(entries, b)?;

    println!("{a} contains {b}?   {}", ga.contains(gb));
    println!("{a} covers {b}?     {}", ga.covers(gb));
    println!("{b} contains {a}?   {}", gb.contains(ga));
    println!("{a} intersects {b}? {}", ga.intersects(gb));
    println!("distance:          {:.2e}", ga.distance(gb));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input))?;
    let collection: Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", args.input))?;

    let entries = load_entries(&collection)?;
    if entries.is_empty() {
        bail!("no Point/LineString/Polygon features in {}", args.input);
    }

    print_table(&entries);

    if let Some(pair) = &args.pair {
        println!();
        probe_pair(&entries, &pair[0], &pair[1])?;
    }
    Ok(())
}
