use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "entity-conversions")]
mod conv;

/// A single entry of the `elements` array of an Overpass API response.
///
/// Coordinates and geometry are not needed by the harvest and are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Dining,
    Movies,
    #[serde(rename = "Museums/Exhibitions")]
    MuseumsExhibitions,
}

/// An entry of the canonical collection (`data/locations.json`).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id       : String,
    #[serde(rename = "type")]
    pub category : Category,
    pub name     : String,
    #[serde(default)]
    pub address  : String,
    #[serde(default)]
    pub country  : String,
    #[serde(default)]
    pub city     : String,
    #[serde(default)]
    pub rating   : f64,
    #[serde(default)]
    pub link     : String,
    #[serde(default)]
    pub images   : Vec<String>,
}
