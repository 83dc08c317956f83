//! geojson-object - typed access to GeoJSON Feature and FeatureCollection documents
//!
//! The crate wraps an owned `serde_json` object tree and exposes getters and
//! setters for the fields GeoJSON Features and FeatureCollections carry, plus a
//! flattening pass for nested collections. Only `Point` geometries are
//! interpreted; anything else is stored untouched.

pub mod error;
pub mod models;

pub use error::{GeoJsonError, Result};
pub use models::{to_feature_array, GeoJsonKind, GeoJsonObject};
