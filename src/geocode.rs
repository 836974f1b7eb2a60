use serde::{Deserialize, Serialize};

/// Place types that mark a landmark or point of interest.
pub const LANDMARK_PLACE_TYPES: [&str; 7] = [
    "point_of_interest",
    "establishment",
    "landmark",
    "tourist_attraction",
    "natural_feature",
    "park",
    "airport",
];

/// Geocoded location of the address.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Geocode {
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub plus_code: Option<PlusCode>,
    #[serde(default)]
    pub bounds: Option<Viewport>,
    #[serde(default)]
    /// Size of the geocoded place, in meters. Smaller is more precise.
    pub feature_size_meters: Option<f64>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub place_types: Vec<String>,
}

impl Geocode {
    pub fn is_landmark(&self) -> bool {
        self.place_types
            .iter()
            .any(|t| LANDMARK_PLACE_TYPES.contains(&t.as_str()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlusCode {
    #[serde(default)]
    pub global_code: Option<String>,
    #[serde(default)]
    pub compound_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    #[serde(default)]
    pub low: Option<LatLng>,
    #[serde(default)]
    pub high: Option<LatLng>,
}
