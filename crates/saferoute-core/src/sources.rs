//! Interfaces to the external data providers.
//!
//! Each provider either answers or reports [`Unavailable`]. The variants only
//! exist so the cause can be logged; callers must treat them all the same.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Coordinates, ElevationReading, Location, RouteCandidate, TrafficReading};

/// A provider could not supply data for this request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider HTTP {0}")]
    Status(u16),
    #[error("provider rejected request: {0}")]
    Rejected(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("no results")]
    Empty,
}

/// Alternative cycling routes between two locations.
#[async_trait]
pub trait DirectionsSource: Send + Sync {
    async fn fetch_routes(
        &self,
        start: &Location,
        end: &Location,
    ) -> Result<Vec<RouteCandidate>, Unavailable>;
}

/// Current traffic speed near a point.
#[async_trait]
pub trait TrafficFlowSource: Send + Sync {
    async fn fetch_flow(&self, point: Coordinates) -> Result<TrafficReading, Unavailable>;
}

/// Cumulative cycling ascent between two points.
#[async_trait]
pub trait ElevationSource: Send + Sync {
    async fn fetch_ascent(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<ElevationReading, Unavailable>;
}
