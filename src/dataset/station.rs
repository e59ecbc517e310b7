use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Bluebikes short code, e.g. "A32000". Unique per dock.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationId(String);

impl StationId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub short_name: StationId,
    pub name: String,
    pub coord: Point<f64>,
}

impl Station {
    pub fn new(short_name: StationId, name: String, lon: f64, lat: f64) -> Self {
        Self {
            short_name,
            name,
            coord: Point::new(lon, lat),
        }
    }
}
