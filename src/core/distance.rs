use std::f64::consts::PI;

/// Tokyo Station, the fixed baseline for every distance in the service.
pub const TOKYO_STATION_LAT: f64 = 35.6809591;
pub const TOKYO_STATION_LON: f64 = 139.7673068;

/// Earth mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometers between two coordinates, rounded to one decimal.
///
/// Equirectangular approximation: the longitude delta is scaled by the
/// cosine of the mean latitude before applying Euclidean distance, which
/// holds up for domestic short-to-medium distances but degrades near the
/// poles or across very long arcs.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let mean_lat = (lat1 + lat2) / 2.0;

    let x = d_lon * (mean_lat * PI / 180.0).cos();
    let y = d_lat;
    let distance = (x * x + y * y).sqrt() * EARTH_RADIUS_KM * PI / 180.0;

    // f64::round is round-half-away-from-zero
    (distance * 10.0).round() / 10.0
}
