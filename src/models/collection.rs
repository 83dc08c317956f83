//! FeatureCollection accessors and nested collection flattening.

use serde_json::Value;
use tracing::debug;

use super::object::{GeoJsonKind, GeoJsonObject};
use crate::error::{GeoJsonError, Result};

pub(crate) const FEATURES: &str = "features";

impl GeoJsonObject {
    /// The `features` sequence. Fails unless `type` is "FeatureCollection".
    pub fn features(&self) -> Result<&Vec<Value>> {
        self.expect_kind(GeoJsonKind::FeatureCollection)?;
        self.root()
            .get(FEATURES)
            .ok_or_else(|| GeoJsonError::missing(FEATURES))?
            .as_array()
            .ok_or_else(|| GeoJsonError::malformed(FEATURES, "is not an array"))
    }

    pub fn features_mut(&mut self) -> Result<&mut Vec<Value>> {
        self.expect_kind(GeoJsonKind::FeatureCollection)?;
        self.root_mut()
            .get_mut(FEATURES)
            .ok_or_else(|| GeoJsonError::missing(FEATURES))?
            .as_array_mut()
            .ok_or_else(|| GeoJsonError::malformed(FEATURES, "is not an array"))
    }

    /// Replace the `features` sequence. Fails unless `type` is "FeatureCollection".
    pub fn set_features(&mut self, features: Vec<Value>) -> Result<()> {
        self.expect_kind(GeoJsonKind::FeatureCollection)?;
        self.root_mut()
            .insert(FEATURES.to_string(), Value::Array(features));
        Ok(())
    }

    /// Append one entry to `features`
    pub fn push_feature(&mut self, feature: GeoJsonObject) -> Result<()> {
        self.features_mut()?.push(feature.into_value());
        Ok(())
    }

    /// Hoist the children of nested FeatureCollections into this collection.
    ///
    /// For every entry that is itself a FeatureCollection, each of its children
    /// is flattened in turn and a copy is appended to the end of `features`.
    /// The nested collection entry stays where it was, so
    /// `[F1, C[F2]]` becomes `[F1, C[F2], F2]`. Appended entries are not
    /// rescanned during the same call. Does nothing on a Feature.
    pub fn flatten(&mut self) -> Result<()> {
        if !self.is_feature_collection() {
            return Ok(());
        }

        let mut hoisted = Vec::new();
        for entry in self.features_mut()?.iter_mut() {
            let Some(map) = entry.as_object_mut() else {
                continue;
            };
            let mut nested = GeoJsonObject::from(std::mem::take(map));
            let result = nested.collect_children(&mut hoisted);
            *map = nested.into_map();
            result?;
        }

        if !hoisted.is_empty() {
            debug!(
                "Hoisted {} features out of nested collections",
                hoisted.len()
            );
            self.features_mut()?.extend(hoisted);
        }

        Ok(())
    }

    // Flattens each child of a nested collection and copies it into `out`.
    fn collect_children(&mut self, out: &mut Vec<Value>) -> Result<()> {
        if !self.is_feature_collection() {
            return Ok(());
        }

        for child in self.features_mut()?.iter_mut() {
            if let Some(map) = child.as_object_mut() {
                let mut sub = GeoJsonObject::from(std::mem::take(map));
                let result = sub.flatten();
                *map = sub.into_map();
                result?;
            }
            out.push(child.clone());
        }

        Ok(())
    }
}

/// Parse each raw JSON text as a Feature and return the wrapped values in
/// input order. Stops at the first text that fails to parse.
pub fn to_feature_array<I, S>(texts: I) -> Result<Vec<GeoJsonObject>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let features = texts
        .into_iter()
        .map(|text| GeoJsonObject::from_json(GeoJsonKind::Feature.as_str(), text.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    debug!("Wrapped {} texts as features", features.len());
    Ok(features)
}
