//! Google Directions API client.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use saferoute_core::{Coordinates, DirectionsSource, Leg, Location, RouteCandidate, Unavailable};
use serde::Deserialize;
use serde_json::Value;

use crate::http::{build_client, classify, read_json};

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Fetches alternative bicycling routes.
pub struct GoogleDirectionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Value>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleLeg {
    distance: GoogleValue,
    duration: GoogleValue,
    start_location: GoogleLatLng,
    end_location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleValue {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

impl From<GoogleLeg> for Leg {
    fn from(leg: GoogleLeg) -> Self {
        Leg {
            start_location: Coordinates::new(leg.start_location.lat, leg.start_location.lng),
            end_location: Coordinates::new(leg.end_location.lat, leg.end_location.lng),
            distance_m: leg.distance.value,
            duration_s: leg.duration.value,
        }
    }
}

impl GoogleDirectionsClient {
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

/// Turn one provider route object into a candidate.
///
/// Keeps the leading legs that parse and stops at the first one that does
/// not, so an unreadable first leg leaves the candidate without legs. The raw
/// route is always kept.
fn to_candidate(route: Value) -> RouteCandidate {
    let legs = route
        .get("legs")
        .and_then(Value::as_array)
        .map(|legs| {
            legs.iter()
                .map_while(|leg| GoogleLeg::deserialize(leg).ok())
                .map(Leg::from)
                .collect()
        })
        .unwrap_or_default();
    RouteCandidate::new(legs, route)
}

fn into_candidates(body: DirectionsResponse) -> Result<Vec<RouteCandidate>, Unavailable> {
    match body.status.as_str() {
        "OK" if !body.routes.is_empty() => {
            Ok(body.routes.into_iter().map(to_candidate).collect())
        }
        "OK" | "ZERO_RESULTS" => Err(Unavailable::Empty),
        other => Err(Unavailable::Rejected(match body.error_message {
            Some(message) => format!("{}: {}", other, message),
            None => other.to_string(),
        })),
    }
}

#[async_trait]
impl DirectionsSource for GoogleDirectionsClient {
    async fn fetch_routes(
        &self,
        start: &Location,
        end: &Location,
    ) -> Result<Vec<RouteCandidate>, Unavailable> {
        let origin = start.as_query();
        let destination = end.as_query();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("mode", "bicycling"),
                ("alternatives", "true"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(classify)?;

        let body: DirectionsResponse = read_json(response).await?;
        let candidates = into_candidates(body)?;
        tracing::debug!("Directions returned {} alternatives", candidates.len());
        Ok(candidates)
    }
}
