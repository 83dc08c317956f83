//! GeoJSON object wrapper over an owned JSON tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::geometry::POINT;
use crate::error::{GeoJsonError, Result};

pub(crate) const TYPE: &str = "type";
pub(crate) const PROPERTIES: &str = "properties";

/// Top-level GeoJSON object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoJsonKind {
    /// A single entity with one geometry and a properties mapping
    Feature,
    /// An ordered sequence of Features or nested FeatureCollections
    FeatureCollection,
}

impl GeoJsonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoJsonKind::Feature => "Feature",
            GeoJsonKind::FeatureCollection => "FeatureCollection",
        }
    }
}

impl fmt::Display for GeoJsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoJsonKind {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Feature" => Ok(GeoJsonKind::Feature),
            "FeatureCollection" => Ok(GeoJsonKind::FeatureCollection),
            other => Err(GeoJsonError::Type {
                expected: "Feature or FeatureCollection",
                found: Some(other.to_string()),
            }),
        }
    }
}

/// A GeoJSON Feature or FeatureCollection.
///
/// The document is held as a plain JSON object; every accessor reads or writes
/// straight into it, so fields this type knows nothing about survive a
/// parse/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoJsonObject {
    root: Map<String, Value>,
}

impl GeoJsonObject {
    /// Build the default structure for `kind`.
    ///
    /// "Feature" gets a Point geometry at [0.0, 0.0] and empty properties,
    /// "FeatureCollection" an empty features list. Any other string only sets
    /// `type` and leaves the rest of the structure empty.
    pub fn new(kind: &str) -> Result<Self> {
        let mut object = Self { root: Map::new() };
        object.setup_structure(kind)?;
        Ok(object)
    }

    /// Empty Feature: Point geometry at the origin, no properties
    pub fn feature() -> Self {
        let mut geometry = Map::new();
        geometry.insert(TYPE.to_string(), Value::from(POINT));
        geometry.insert(
            super::geometry::COORDINATES.to_string(),
            Value::from(vec![0.0, 0.0]),
        );

        let mut root = Map::new();
        root.insert(TYPE.to_string(), Value::from(GeoJsonKind::Feature.as_str()));
        root.insert(super::geometry::GEOMETRY.to_string(), Value::Object(geometry));
        root.insert(PROPERTIES.to_string(), Value::Object(Map::new()));
        Self { root }
    }

    /// Empty FeatureCollection
    pub fn feature_collection() -> Self {
        let mut root = Map::new();
        root.insert(
            TYPE.to_string(),
            Value::from(GeoJsonKind::FeatureCollection.as_str()),
        );
        root.insert(super::collection::FEATURES.to_string(), Value::Array(Vec::new()));
        Self { root }
    }

    /// Parse `text` as a GeoJSON document.
    ///
    /// `kind` is what the caller expects; it is not checked against the
    /// content.
    pub fn from_json(kind: &str, text: &str) -> Result<Self> {
        let object: Self = text.parse()?;
        if object.kind().ok() != Some(kind) {
            debug!(
                "Parsed GeoJSON declared as '{}' but content has type {:?}",
                kind,
                object.kind().ok()
            );
        }
        Ok(object)
    }

    fn setup_structure(&mut self, kind: &str) -> Result<()> {
        self.set_kind(kind);

        match kind.parse::<GeoJsonKind>() {
            Ok(GeoJsonKind::Feature) => {
                let mut geometry = Map::new();
                geometry.insert(TYPE.to_string(), Value::from(POINT));
                self.set_geometry(geometry);
                self.set_coordinates([0.0, 0.0])?;
                self.set_properties(Map::new());
            }
            Ok(GeoJsonKind::FeatureCollection) => {
                self.set_features(Vec::new())?;
            }
            Err(_) => debug!("No default structure for GeoJSON type '{}'", kind),
        }

        Ok(())
    }

    /// True if `type` is "Feature"; false when `type` is absent or unreadable
    pub fn is_feature(&self) -> bool {
        self.is_kind(GeoJsonKind::Feature)
    }

    /// True if `type` is "FeatureCollection"; false when `type` is absent or unreadable
    pub fn is_feature_collection(&self) -> bool {
        self.is_kind(GeoJsonKind::FeatureCollection)
    }

    fn is_kind(&self, kind: GeoJsonKind) -> bool {
        match self.kind() {
            Ok(found) => found == kind.as_str(),
            Err(e) => {
                debug!("Unable to read GeoJSON type: {}", e);
                false
            }
        }
    }

    /// Fail with a type error unless `type` equals `kind`
    pub(crate) fn expect_kind(&self, kind: GeoJsonKind) -> Result<()> {
        if self.is_kind(kind) {
            return Ok(());
        }
        Err(GeoJsonError::Type {
            expected: kind.as_str(),
            found: self.kind().ok().map(str::to_string),
        })
    }

    /// The top-level `type` field
    pub fn kind(&self) -> Result<&str> {
        self.root
            .get(TYPE)
            .ok_or_else(|| GeoJsonError::missing(TYPE))?
            .as_str()
            .ok_or_else(|| GeoJsonError::malformed(TYPE, "is not a string"))
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.root.insert(TYPE.to_string(), Value::String(kind.into()));
    }

    /// The `properties` mapping of a Feature
    pub fn properties(&self) -> Result<&Map<String, Value>> {
        self.object_field(PROPERTIES)
    }

    pub fn properties_mut(&mut self) -> Result<&mut Map<String, Value>> {
        self.object_field_mut(PROPERTIES)
    }

    pub fn set_properties(&mut self, properties: Map<String, Value>) {
        self.root
            .insert(PROPERTIES.to_string(), Value::Object(properties));
    }

    pub(crate) fn object_field(&self, field: &'static str) -> Result<&Map<String, Value>> {
        self.root
            .get(field)
            .ok_or_else(|| GeoJsonError::missing(field))?
            .as_object()
            .ok_or_else(|| GeoJsonError::malformed(field, "is not an object"))
    }

    pub(crate) fn object_field_mut(
        &mut self,
        field: &'static str,
    ) -> Result<&mut Map<String, Value>> {
        self.root
            .get_mut(field)
            .ok_or_else(|| GeoJsonError::missing(field))?
            .as_object_mut()
            .ok_or_else(|| GeoJsonError::malformed(field, "is not an object"))
    }

    pub(crate) fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// The underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serialize as indented JSON text
    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

impl Default for GeoJsonObject {
    fn default() -> Self {
        Self::feature()
    }
}

impl FromStr for GeoJsonObject {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(s)?;
        Ok(Self { root })
    }
}

impl fmt::Display for GeoJsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<Map<String, Value>> for GeoJsonObject {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl TryFrom<Value> for GeoJsonObject {
    type Error = GeoJsonError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(GeoJsonError::NotObject),
        }
    }
}

impl From<GeoJsonObject> for Value {
    fn from(object: GeoJsonObject) -> Self {
        object.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_feature_matches_shortcut() {
        let feature = GeoJsonObject::new("Feature").unwrap();
        assert_eq!(feature, GeoJsonObject::feature());
        assert_eq!(feature, GeoJsonObject::default());
    }

    #[test]
    fn test_new_feature_collection_matches_shortcut() {
        let collection = GeoJsonObject::new("FeatureCollection").unwrap();
        assert_eq!(collection, GeoJsonObject::feature_collection());
    }

    #[test]
    fn test_new_feature_predicates() {
        let feature = GeoJsonObject::new("Feature").unwrap();
        assert!(feature.is_feature());
        assert!(!feature.is_feature_collection());
        assert!(feature.properties().unwrap().is_empty());
    }

    #[test]
    fn test_new_unknown_kind_only_sets_type() {
        let object = GeoJsonObject::new("Polygon").unwrap();
        assert_eq!(object.kind().unwrap(), "Polygon");
        assert_eq!(object.as_map().len(), 1);
        assert!(!object.is_feature());
        assert!(!object.is_feature_collection());
    }

    #[test]
    fn test_predicates_without_type() {
        let object: GeoJsonObject = r#"{"properties":{}}"#.parse().unwrap();
        assert!(!object.is_feature());
        assert!(!object.is_feature_collection());
        assert!(matches!(
            object.kind(),
            Err(GeoJsonError::Field { field: "type", .. })
        ));
    }

    #[test]
    fn test_predicates_with_non_string_type() {
        let object: GeoJsonObject = r#"{"type":7}"#.parse().unwrap();
        assert!(!object.is_feature());
        assert!(object.kind().is_err());
    }

    #[test]
    fn test_parse_malformed_text() {
        let err = GeoJsonObject::from_json("Feature", "{\"type\":").unwrap_err();
        assert!(matches!(err, GeoJsonError::Parse(_)));
    }

    #[test]
    fn test_parse_non_object_root() {
        let err = "[1, 2]".parse::<GeoJsonObject>().unwrap_err();
        assert!(matches!(err, GeoJsonError::Parse(_)));
    }

    #[test]
    fn test_declared_kind_not_validated() {
        let object =
            GeoJsonObject::from_json("Feature", r#"{"type":"FeatureCollection","features":[]}"#)
                .unwrap();
        assert!(object.is_feature_collection());
    }

    #[test]
    fn test_set_kind() {
        let mut object = GeoJsonObject::feature();
        object.set_kind("FeatureCollection");
        assert!(object.is_feature_collection());
        assert_eq!(object.kind().unwrap(), "FeatureCollection");
    }

    #[test]
    fn test_properties_roundtrip() {
        let mut feature = GeoJsonObject::feature();
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!("Ferry Building"));
        feature.set_properties(properties);

        feature
            .properties_mut()
            .unwrap()
            .insert("rating".to_string(), json!(4));

        let properties = feature.properties().unwrap();
        assert_eq!(properties["name"], json!("Ferry Building"));
        assert_eq!(properties["rating"], json!(4));
    }

    #[test]
    fn test_properties_missing_on_collection() {
        let collection = GeoJsonObject::feature_collection();
        assert!(matches!(
            collection.properties(),
            Err(GeoJsonError::Field {
                field: "properties",
                ..
            })
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "FeatureCollection".parse::<GeoJsonKind>().unwrap(),
            GeoJsonKind::FeatureCollection
        );
        assert!("Point".parse::<GeoJsonKind>().is_err());
        assert_eq!(GeoJsonKind::Feature.to_string(), "Feature");
    }

    #[test]
    fn test_try_from_value() {
        let object = GeoJsonObject::try_from(json!({"type": "Feature"})).unwrap();
        assert!(object.is_feature());
        assert!(matches!(
            GeoJsonObject::try_from(json!("Feature")),
            Err(GeoJsonError::NotObject)
        ));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let text = r#"{"type":"Feature","id":"abc","properties":{}}"#;
        let object: GeoJsonObject = text.parse().unwrap();
        let value: Value = serde_json::from_str(&object.to_string()).unwrap();
        assert_eq!(value["id"], json!("abc"));
        assert_eq!(value, object.into_value());
    }
}
