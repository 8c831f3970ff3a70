use serde::{Deserialize, Serialize};

/// A longitude/latitude pair, in that order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lon, self.lat)
    }
}

/// Structured form of a free-text address.
///
/// Administrative levels and the street name are trimmed and uppercased.
/// They may be empty, in which case the index simply won't match them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Locator {
    pub department: String,
    pub province: String,
    pub district: String,
    pub street_name: String,
    pub house_number: Option<String>,
}

/// A single door of a street together with its coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseNumberEntry {
    pub number: String,
    pub location: GeoPoint,
}

/// One ranked street document from the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StreetDocument {
    pub id: String,
    pub score: f64,
    pub name: Option<String>,
    pub house_numbers: Vec<HouseNumberEntry>,
}

impl StreetDocument {
    pub fn find_house_number(&self, number: &str) -> Option<&HouseNumberEntry> {
        self.house_numbers.iter().find(|entry| entry.number == number)
    }
}
