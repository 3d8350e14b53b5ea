//! End-to-end route planning: fetch alternatives, rank them, pick the safest.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{Location, PlanResult};
use crate::ranking::RouteRanker;
use crate::sources::{DirectionsSource, ElevationSource, TrafficFlowSource, Unavailable};

/// Terminal failures of a planning request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("start or end location is missing")]
    InvalidInput,
    /// Raised while decoding a request whose locations are not text.
    #[error("start or end location is not text")]
    InputNotText,
    #[error("directions provider unavailable: {0}")]
    UpstreamUnavailable(Unavailable),
    #[error("no route candidate could be scored")]
    NoViableRoute,
}

impl PlanError {
    /// Message shown to API callers. Internal causes are never exposed.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input: 'start' and 'end' are required",
            Self::InputNotText => "Invalid input: 'start' and 'end' must be strings",
            Self::UpstreamUnavailable(_) => "Failed to fetch route data",
            Self::NoViableRoute => "No routes available",
        }
    }
}

/// Plans the safest cycling route between two locations.
pub struct PlanRouteService {
    directions: Arc<dyn DirectionsSource>,
    ranker: RouteRanker,
}

impl PlanRouteService {
    pub fn new(
        directions: Arc<dyn DirectionsSource>,
        traffic: Arc<dyn TrafficFlowSource>,
        elevation: Arc<dyn ElevationSource>,
    ) -> Self {
        Self {
            directions,
            ranker: RouteRanker::new(traffic, elevation),
        }
    }

    /// Plan a route from raw caller input.
    ///
    /// Providers are never contacted when either location is blank.
    pub async fn plan(&self, start: &str, end: &str) -> Result<PlanResult, PlanError> {
        let (start, end) = match (Location::parse(start), Location::parse(end)) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(PlanError::InvalidInput),
        };

        let candidates = self
            .directions
            .fetch_routes(&start, &end)
            .await
            .map_err(|reason| {
                tracing::warn!("Directions lookup failed: {}", reason);
                PlanError::UpstreamUnavailable(reason)
            })?;
        if candidates.is_empty() {
            tracing::warn!("Directions provider returned no routes");
            return Err(PlanError::UpstreamUnavailable(Unavailable::Empty));
        }

        tracing::info!(
            "Ranking {} route candidates from {} to {}",
            candidates.len(),
            start.as_query(),
            end.as_query()
        );

        let best = self
            .ranker
            .rank(candidates)
            .await
            .into_iter()
            .next()
            .ok_or(PlanError::NoViableRoute)?;

        tracing::info!(
            score = best.safety_score(),
            distance_m = best.distance_m(),
            "Selected safest route"
        );
        Ok(PlanResult::from(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteCandidate;
    use crate::test_support::{candidate, StubDirections, StubElevation, StubTraffic};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn service(directions: Arc<StubDirections>) -> PlanRouteService {
        PlanRouteService::new(
            directions,
            Arc::new(StubTraffic::constant(Some(30.0))),
            Arc::new(StubElevation::ascent(8.0)),
        )
    }

    #[tokio::test]
    async fn blank_locations_are_rejected_without_calling_providers() {
        let directions = Arc::new(StubDirections::routes(vec![candidate("A", 1.0, 100, 10)]));
        let service = service(directions.clone());

        assert_eq!(service.plan("", "B").await, Err(PlanError::InvalidInput));
        assert_eq!(service.plan("A", "   ").await, Err(PlanError::InvalidInput));
        assert_eq!(directions.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn directions_failure_is_upstream_unavailable() {
        let directions = Arc::new(StubDirections::unavailable(Unavailable::Status(500)));
        let err = service(directions).plan("A", "B").await.unwrap_err();

        assert_eq!(err, PlanError::UpstreamUnavailable(Unavailable::Status(500)));
        assert_eq!(err.user_message(), "Failed to fetch route data");
    }

    #[tokio::test]
    async fn no_alternatives_is_upstream_unavailable() {
        let directions = Arc::new(StubDirections::routes(Vec::new()));
        let err = service(directions).plan("A", "B").await.unwrap_err();

        assert_eq!(err, PlanError::UpstreamUnavailable(Unavailable::Empty));
    }

    #[tokio::test]
    async fn unscorable_candidates_yield_no_viable_route() {
        let broken = RouteCandidate::new(Vec::new(), json!({"summary": "no legs"}));
        let directions = Arc::new(StubDirections::routes(vec![broken.clone(), broken]));
        let err = service(directions).plan("A", "B").await.unwrap_err();

        assert_eq!(err, PlanError::NoViableRoute);
        assert_eq!(err.user_message(), "No routes available");
    }

    #[tokio::test]
    async fn picks_lowest_score_and_reports_its_metrics() {
        let directions = Arc::new(StubDirections::routes(vec![
            candidate("long", 1.0, 5000, 1200),
            candidate("short", 2.0, 2000, 500),
        ]));
        let result = service(directions)
            .plan("Mission Dolores Park", "Ferry Building")
            .await
            .unwrap();

        assert_eq!(result.safest_route, json!({"summary": "short"}));
        assert_eq!(result.distance, 2000);
        assert_eq!(result.eta, 500);
        assert_eq!(result.traffic_flow, 1.5);
        assert_eq!(result.elevation_gain, 8.0);
    }

    #[test]
    fn input_error_messages() {
        assert_eq!(
            PlanError::InvalidInput.user_message(),
            "Invalid input: 'start' and 'end' are required"
        );
        assert_eq!(
            PlanError::InputNotText.user_message(),
            "Invalid input: 'start' and 'end' must be strings"
        );
    }
}
