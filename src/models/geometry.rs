//! Geometry and Point coordinate accessors.

use geo_types::Point;
use serde_json::{Map, Number, Value};

use super::object::{GeoJsonObject, TYPE};
use crate::error::{GeoJsonError, Result};

pub(crate) const GEOMETRY: &str = "geometry";
pub(crate) const COORDINATES: &str = "coordinates";
pub(crate) const POINT: &str = "Point";

const LONGITUDE: usize = 0;
const LATITUDE: usize = 1;

impl GeoJsonObject {
    /// The nested `geometry` object
    pub fn geometry(&self) -> Result<&Map<String, Value>> {
        self.object_field(GEOMETRY)
    }

    pub fn geometry_mut(&mut self) -> Result<&mut Map<String, Value>> {
        self.object_field_mut(GEOMETRY)
    }

    pub fn set_geometry(&mut self, geometry: Map<String, Value>) {
        self.root_mut()
            .insert(GEOMETRY.to_string(), Value::Object(geometry));
    }

    /// The geometry's `type`. Only "Point" is interpreted by this crate.
    pub fn geometry_kind(&self) -> Result<&str> {
        self.geometry()?
            .get(TYPE)
            .ok_or_else(|| GeoJsonError::missing("geometry.type"))?
            .as_str()
            .ok_or_else(|| GeoJsonError::malformed("geometry.type", "is not a string"))
    }

    pub fn set_geometry_kind(&mut self, kind: impl Into<String>) -> Result<()> {
        self.geometry_mut()?
            .insert(TYPE.to_string(), Value::String(kind.into()));
        Ok(())
    }

    /// `geometry.coordinates` as [longitude, latitude].
    ///
    /// Positions with more than two elements (altitude) are accepted; only the
    /// first two are returned.
    pub fn coordinates(&self) -> Result<[f64; 2]> {
        let position = self
            .geometry()?
            .get(COORDINATES)
            .ok_or_else(|| GeoJsonError::missing(COORDINATES))?;
        read_position(position)
    }

    /// Replace `geometry.coordinates` with [longitude, latitude]
    pub fn set_coordinates(&mut self, coordinates: [f64; 2]) -> Result<()> {
        let position = vec![number(coordinates[0])?, number(coordinates[1])?];
        self.geometry_mut()?
            .insert(COORDINATES.to_string(), Value::Array(position));
        Ok(())
    }

    pub fn longitude(&self) -> Result<f64> {
        Ok(self.coordinates()?[LONGITUDE])
    }

    pub fn latitude(&self) -> Result<f64> {
        Ok(self.coordinates()?[LATITUDE])
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        self.set_axis(LONGITUDE, longitude)
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        self.set_axis(LATITUDE, latitude)
    }

    /// The Point as a `geo_types` point (x = longitude, y = latitude)
    pub fn point(&self) -> Result<Point<f64>> {
        let [lon, lat] = self.coordinates()?;
        Ok(Point::new(lon, lat))
    }

    pub fn set_point(&mut self, point: Point<f64>) -> Result<()> {
        self.set_coordinates([point.x(), point.y()])
    }

    // Writes one axis in place; the other axis and any altitude are kept.
    fn set_axis(&mut self, index: usize, value: f64) -> Result<()> {
        let value = number(value)?;
        let position = self
            .geometry_mut()?
            .get_mut(COORDINATES)
            .ok_or_else(|| GeoJsonError::missing(COORDINATES))?;
        read_position(position)?;

        if let Value::Array(values) = position {
            values[index] = value;
        }
        Ok(())
    }
}

fn read_position(position: &Value) -> Result<[f64; 2]> {
    let values = position
        .as_array()
        .ok_or_else(|| GeoJsonError::malformed(COORDINATES, "is not an array"))?;

    match values.as_slice() {
        [lon, lat, ..] => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => Ok([lon, lat]),
            _ => Err(GeoJsonError::malformed(
                COORDINATES,
                "does not hold a numeric longitude and latitude",
            )),
        },
        _ => Err(GeoJsonError::malformed(
            COORDINATES,
            "has fewer than two elements",
        )),
    }
}

// JSON has no NaN or infinity
fn number(value: f64) -> Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| GeoJsonError::malformed(COORDINATES, "must be finite numbers"))
}
