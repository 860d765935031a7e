use serde::{Deserialize, Serialize};

/// One administrative sub-area (prefecture/city/town plus coordinates)
/// returned by the geocoder for a single postal code. A postal code may map
/// to zero or more of these.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLocation {
    pub prefecture: String,
    pub city: String,
    pub town: String,
    pub lat: f64,
    pub lon: f64,
}

/// The resolved address summary for one postal code.
///
/// `common_address` is prefecture + city + the longest shared leading town
/// text, concatenated without separators. `tokyo_sta_distance` is the
/// maximum distance in kilometers from Tokyo Station across all locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSummary {
    pub postal_code: String,
    pub hit_count: usize,
    pub common_address: String,
    pub tokyo_sta_distance: f64,
}

/// One row of the ranked access report: how often a postal code was looked
/// up. Recomputed from the stored events on every report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogSummary {
    pub postal_code: String,
    pub request_count: i64,
}
