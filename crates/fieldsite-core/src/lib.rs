//! Spatial hierarchy classification for ecological monitoring sites.
//!
//! A field-site map carries named polygons (blocks and plots), line strings
//! (transects) and survey points. This crate infers the three-level
//! Block → Transect → Plot hierarchy purely from planar geometric
//! relationships: which polygons nest which, which lines cross which blocks,
//! and which plots sit on which transect lines. Features the two-level
//! containment model cannot place are reported as orphans rather than
//! dropped.
//!
//! The crate does no I/O. Callers hand [`classify`] an ordered list of
//! [`FeatureRecord`]s (as produced by whatever reads the map file) and get a
//! [`Classification`] back; the same list always yields the same result.

pub mod classifier;
pub mod geometry;
pub mod hierarchy;
pub mod nesting;
pub mod plots;
pub mod registry;
pub mod transects;

pub use classifier::classify;
pub use geometry::{DegenerateGeometryError, Geometry, GeometryKind};
pub use hierarchy::{ChildKind, ChildRef, Classification, HierarchyNode, Orphan};
pub use registry::{Feature, FeatureRecord, FeatureSet};
