//! HTTP geocoder client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{AddressResolver, ResolvedAddress};
use crate::config::GeocoderConfig;
use crate::models::GeoPoint;

/// Client for a Nominatim-style forward-geocoding endpoint.
pub struct GeocoderClient {
    client: Client,
    endpoint: Url,
}

impl GeocoderClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("Invalid geocoder endpoint")?;

        Ok(Self {
            client: Client::builder()
                .user_agent("Dovoz/0.1 (delivery availability engine)")
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
        })
    }

    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Self::new(&config.endpoint, config.timeout_secs)
    }

    async fn fetch(&self, query: &str) -> Option<Vec<Value>> {
        let mut attempts = 0;
        let max_attempts = 2;

        while attempts < max_attempts {
            attempts += 1;

            let response = match self
                .client
                .get(self.endpoint.clone())
                .query(&[
                    ("q", query),
                    ("format", "json"),
                    ("addressdetails", "1"),
                    ("limit", "5"),
                ])
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!(
                        "Geocoder request failed (attempt {}/{}): {}",
                        attempts, max_attempts, e
                    );
                    if attempts < max_attempts {
                        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                        continue;
                    }
                    return None;
                }
            };

            if !response.status().is_success() {
                warn!(
                    "Geocoder query failed with status {} (attempt {}/{})",
                    response.status(),
                    attempts,
                    max_attempts
                );
                if attempts < max_attempts {
                    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                    continue;
                }
                return None;
            }

            let data: Value = match response.json().await {
                Ok(d) => d,
                Err(e) => {
                    warn!("Failed to parse geocoder response: {}", e);
                    return None;
                }
            };

            return data.as_array().cloned();
        }

        None
    }
}

#[async_trait]
impl AddressResolver for GeocoderClient {
    async fn resolve(&self, query: &str) -> Vec<ResolvedAddress> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let Some(entries) = self.fetch(query).await else {
            return Vec::new();
        };

        let candidates: Vec<ResolvedAddress> =
            entries.iter().filter_map(parse_candidate).collect();
        debug!("resolved {:?} to {} candidates", query, candidates.len());
        candidates
    }
}

/// Coordinates arrive as strings from Nominatim-style services, as numbers
/// from some gateways.
fn coord_field(entry: &Value, key: &str) -> Option<f64> {
    let value = &entry[key];
    if let Some(s) = value.as_str() {
        return s.parse().ok();
    }
    value.as_f64()
}

fn get_str(value: &Value, key: &str) -> Option<String> {
    value[key].as_str().map(String::from)
}

/// Parse one geocoder candidate; malformed entries are dropped.
fn parse_candidate(entry: &Value) -> Option<ResolvedAddress> {
    let lat = coord_field(entry, "lat")?;
    let lon = coord_field(entry, "lon")?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    let address = &entry["address"];

    Some(ResolvedAddress {
        coordinate: GeoPoint::new(lat, lon),
        country: get_str(address, "country"),
        region: get_str(address, "state"),
        city: get_str(address, "city").or_else(|| get_str(address, "town")),
        postcode: get_str(address, "postcode"),
    })
}
