//! Shared application state.

use std::sync::Arc;

use anyhow::Result;
use saferoute_core::PlanRouteService;
use saferoute_providers::{GoogleDirectionsClient, OrsElevationClient, TomTomTrafficClient};

use crate::config::Config;

pub struct AppState {
    planner: PlanRouteService,
}

impl AppState {
    pub fn new(planner: PlanRouteService) -> Self {
        Self { planner }
    }

    /// Wire the real provider clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let directions = GoogleDirectionsClient::new(
            config.directions_url.clone(),
            config.google_maps_api_key.clone(),
            config.provider_timeout,
        )?;
        let traffic = TomTomTrafficClient::new(
            config.traffic_url.clone(),
            config.tomtom_api_key.clone(),
            config.provider_timeout,
        )?;
        let elevation = OrsElevationClient::new(
            config.elevation_url.clone(),
            config.openrouteservice_api_key.clone(),
            config.provider_timeout,
        )?;

        Ok(Self::new(PlanRouteService::new(
            Arc::new(directions),
            Arc::new(traffic),
            Arc::new(elevation),
        )))
    }

    pub fn planner(&self) -> &PlanRouteService {
        &self.planner
    }
}
