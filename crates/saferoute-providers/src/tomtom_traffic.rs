//! TomTom traffic flow client.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use saferoute_core::{Coordinates, TrafficFlowSource, TrafficReading, Unavailable};
use serde::Deserialize;

use crate::http::{build_client, classify, read_json};

/// Flow segment endpoint at zoom 10, which fixes the search radius.
pub const DEFAULT_TRAFFIC_URL: &str =
    "https://api.tomtom.com/traffic/services/4/flowSegmentData/absolute/10/json";

pub struct TomTomTrafficClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowResponse {
    flow_segment_data: FlowSegmentData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowSegmentData {
    current_speed: f64,
}

impl TomTomTrafficClient {
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

fn to_reading(body: FlowResponse) -> Result<TrafficReading, Unavailable> {
    let speed = body.flow_segment_data.current_speed;
    if !speed.is_finite() || speed < 0.0 {
        return Err(Unavailable::Malformed(format!("current speed {}", speed)));
    }
    Ok(TrafficReading::new(speed))
}

#[async_trait]
impl TrafficFlowSource for TomTomTrafficClient {
    async fn fetch_flow(&self, point: Coordinates) -> Result<TrafficReading, Unavailable> {
        let point = format!("{},{}", point.lat, point.lng);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("point", point.as_str()),
                ("unit", "KMPH"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(classify)?;

        to_reading(read_json(response).await?)
    }
}
