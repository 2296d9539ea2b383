use geo_types::Coord;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6_371.0;
const MILES_PER_KM: f64 = 0.621371;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[serde(alias = "km")]
    Kilometers,
    #[serde(alias = "mi")]
    Miles,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Kilometers
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The (0, 0) placeholder a waypoint carries until its address is resolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_unresolved(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Great-circle (haversine) distance to `other`.
    pub fn distance_to(&self, other: &Coordinates, unit: Unit) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlng = (other.longitude - self.longitude).to_radians();

        let sin_dlat = (dlat / 2.0).sin();
        let sin_dlng = (dlng / 2.0).sin();

        let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
        let km = 2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin();

        match unit {
            Unit::Kilometers => km,
            Unit::Miles => km * MILES_PER_KM,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    // polyline yields x = longitude, y = latitude
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}
