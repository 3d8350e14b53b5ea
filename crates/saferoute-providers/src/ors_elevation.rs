//! openrouteservice elevation client.
//!
//! Requests a cycling route between the two points with elevation enabled and
//! reads the total ascent reported on the first feature.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use saferoute_core::{Coordinates, ElevationReading, ElevationSource, Unavailable};
use serde::{Deserialize, Serialize};

use crate::http::{build_client, classify, read_json};

pub const DEFAULT_ELEVATION_URL: &str =
    "https://api.openrouteservice.org/v2/directions/cycling-regular/geojson";

pub struct OrsElevationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct RouteRequest {
    /// `[lng, lat]` pairs.
    coordinates: [[f64; 2]; 2],
    elevation: bool,
    instructions: bool,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    ascent: Option<f64>,
}

impl OrsElevationClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

fn to_reading(body: FeatureCollection) -> Result<ElevationReading, Unavailable> {
    let Some(feature) = body.features.into_iter().next() else {
        return Ok(ElevationReading::flat());
    };
    match feature.properties.ascent {
        Some(ascent) if ascent.is_finite() && ascent >= 0.0 => Ok(ElevationReading::new(ascent)),
        Some(ascent) => Err(Unavailable::Malformed(format!("ascent {}", ascent))),
        None => Err(Unavailable::Malformed("feature has no ascent".to_string())),
    }
}

#[async_trait]
impl ElevationSource for OrsElevationClient {
    async fn fetch_ascent(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<ElevationReading, Unavailable> {
        let request = RouteRequest {
            coordinates: [[start.lng, start.lat], [end.lng, end.lat]],
            elevation: true,
            instructions: false,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(classify)?;

        to_reading(read_json(response).await?)
    }
}
