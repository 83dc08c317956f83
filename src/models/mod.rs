//! GeoJSON data model.

pub mod collection;
pub mod geometry;
pub mod object;

pub use collection::to_feature_array;
pub use object::{GeoJsonKind, GeoJsonObject};
