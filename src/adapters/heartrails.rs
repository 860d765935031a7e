use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::domain::model::RawLocation;
use crate::domain::ports::LocationLookup;
use crate::utils::error::{AppError, Result};

/// [`LocationLookup`] adapter for the HeartRails Geo API.
///
/// The request is a plain GET with the postal code appended to the base
/// URL. The response envelope nests the locations under
/// `response.location`, with coordinates encoded as JSON strings (`x` is
/// longitude, `y` is latitude).
pub struct HeartRailsLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HeartRailsLookup {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl LocationLookup for HeartRailsLookup {
    async fn fetch(&self, postal_code: &str) -> Result<Vec<RawLocation>> {
        let url = format!("{}{}", self.base_url, postal_code);
        tracing::debug!(%url, "requesting geocoder");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::LookupStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)?;

        Ok(envelope
            .response
            .location
            .into_iter()
            .map(LocationRecord::into_raw_location)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Payload,
}

// A postal code with no hits comes back without a `location` array.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    location: Vec<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    prefecture: String,
    city: String,
    town: String,
    #[serde(deserialize_with = "f64_from_string")]
    x: f64,
    #[serde(deserialize_with = "f64_from_string")]
    y: f64,
}

impl LocationRecord {
    fn into_raw_location(self) -> RawLocation {
        RawLocation {
            prefecture: self.prefecture,
            city: self.city,
            town: self.town,
            lat: self.y,
            lon: self.x,
        }
    }
}

fn f64_from_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn lookup_for(server: &MockServer) -> HeartRailsLookup {
        HeartRailsLookup::new(
            server.url("/api/json?method=searchByPostal&postal="),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_stringified_coordinates() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/json")
                .query_param("method", "searchByPostal")
                .query_param("postal", "5016121");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "response": {
                        "location": [{
                            "prefecture": "岐阜県",
                            "city": "岐阜市",
                            "town": "柳津町",
                            "x": "136.725408",
                            "y": "35.355743"
                        }]
                    }
                }));
        });

        let locations = lookup_for(&server).fetch("5016121").await.unwrap();
        mock.assert();

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].prefecture, "岐阜県");
        assert_eq!(locations[0].town, "柳津町");
        assert_eq!(locations[0].lat, 35.355743);
        assert_eq!(locations[0].lon, 136.725408);
    }

    #[tokio::test]
    async fn test_fetch_missing_location_key_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "response": {
                        "error": "ERROR: not found."
                    }
                }));
        });

        let locations = lookup_for(&server).fetch("9999999").await.unwrap();
        assert!(locations.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/json");
            then.status(503);
        });

        let err = lookup_for(&server).fetch("1000001").await.unwrap_err();
        assert!(err.is_lookup());
        assert!(matches!(err, AppError::LookupStatus(503)));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json");
        });

        let err = lookup_for(&server).fetch("1000001").await.unwrap_err();
        assert!(err.is_lookup());
        assert!(matches!(err, AppError::LookupDecode(_)));
    }

    #[tokio::test]
    async fn test_fetch_unparseable_coordinate_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "response": {
                        "location": [{
                            "prefecture": "岐阜県",
                            "city": "岐阜市",
                            "town": "柳津町",
                            "x": "not-a-number",
                            "y": "35.355743"
                        }]
                    }
                }));
        });

        let err = lookup_for(&server).fetch("5016121").await.unwrap_err();
        assert!(matches!(err, AppError::LookupDecode(_)));
    }
}
