use std::sync::Arc;

use crate::core::distance::{distance_km, TOKYO_STATION_LAT, TOKYO_STATION_LON};
use crate::domain::model::{AddressSummary, RawLocation};
use crate::domain::ports::LocationLookup;
use crate::utils::error::Result;

/// Resolves a postal code to an [`AddressSummary`] using a geocoder port.
///
/// Stateless apart from the injected lookup and the reference coordinates;
/// safe to share across request tasks.
pub struct AddressResolver {
    lookup: Arc<dyn LocationLookup>,
    reference_lat: f64,
    reference_lon: f64,
}

impl AddressResolver {
    pub fn new(lookup: Arc<dyn LocationLookup>) -> Self {
        Self::with_reference(lookup, TOKYO_STATION_LAT, TOKYO_STATION_LON)
    }

    pub fn with_reference(lookup: Arc<dyn LocationLookup>, lat: f64, lon: f64) -> Self {
        Self {
            lookup,
            reference_lat: lat,
            reference_lon: lon,
        }
    }

    /// Resolve a postal code. `Ok(None)` means the geocoder knows no
    /// location for the code; lookup failures propagate unchanged.
    ///
    /// Does not touch the access log — recording is the caller's concern.
    pub async fn resolve(&self, postal_code: &str) -> Result<Option<AddressSummary>> {
        tracing::debug!(postal_code, "resolving address");

        let locations = self.lookup.fetch(postal_code).await?;

        if locations.is_empty() {
            tracing::info!(postal_code, "no locations found for postal code");
            return Ok(None);
        }

        tracing::debug!(postal_code, count = locations.len(), "fetched locations");

        // Prefecture and city come from the first location unconditionally;
        // entries for one postal code are assumed to agree on both.
        let common_address = format!(
            "{}{}{}",
            locations[0].prefecture,
            locations[0].city,
            common_town(&locations)
        );

        tracing::debug!(%common_address, "constructed common address");

        let mut max_distance = 0.0_f64;
        for loc in &locations {
            let d = distance_km(self.reference_lat, self.reference_lon, loc.lat, loc.lon);
            tracing::debug!(lat = loc.lat, lon = loc.lon, distance_km = d, "location distance");
            if d > max_distance {
                max_distance = d;
            }
        }

        tracing::debug!(postal_code, max_distance, "resolved address");

        Ok(Some(AddressSummary {
            postal_code: postal_code.to_string(),
            hit_count: locations.len(),
            common_address,
            tokyo_sta_distance: max_distance,
        }))
    }
}

/// Longest shared leading text across the town names of all locations.
///
/// The intersection runs on raw bytes, so it can stop mid-way through a
/// multibyte character; the prefix is backed off to the nearest character
/// boundary before trailing whitespace is trimmed.
fn common_town(locations: &[RawLocation]) -> String {
    let first = &locations[0].town;

    let mut len = first.len();
    for loc in &locations[1..] {
        len = common_prefix_len(&first.as_bytes()[..len], loc.town.as_bytes());
        if len == 0 {
            break;
        }
    }

    while len > 0 && !first.is_char_boundary(len) {
        len -= 1;
    }

    first[..len].trim_end().to_string()
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
