//! Browser bindings for the site hierarchy classifier.
//!
//! Lets the setup wizard classify an uploaded site map entirely client-side:
//! the JS layer extracts `(name, type, coordinates)` records from the map
//! file and passes them in as JSON; the classification comes back as a plain
//! JS object with `blocks` / `transects` / `plots` / `orphans`.

use wasm_bindgen::prelude::*;

use fieldsite_core::{classify, FeatureRecord};

/// Classify a JSON array of feature records.
///
/// Input: `[{"name": "...", "type": "Polygon", "coordinates": [[lng, lat], …]}, …]`.
/// Returns the classification as a JS object, or a string error for
/// malformed input JSON.
#[wasm_bindgen]
pub fn classify_features(records_json: &str) -> Result<JsValue, JsValue> {
    let records: Vec<FeatureRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid feature records: {e}")))?;

    let result = classify(records);
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {e}")))
}
