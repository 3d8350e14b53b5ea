//! Enrichment and ranking of route candidates.
//!
//! Every candidate is enriched independently: traffic near the start of its
//! first leg and cycling ascent along that leg. Missing enrichment degrades to
//! the fallback constants in [`crate::scoring`]; a candidate that cannot be
//! scored at all is dropped without affecting the others.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use thiserror::Error;

use crate::models::{RouteCandidate, ScoredRoute};
use crate::scoring::{elevation_gain, safety_score, traffic_factor};
use crate::sources::{ElevationSource, TrafficFlowSource};

/// Why a single candidate was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("route has no legs")]
    MissingLeg,
    #[error("first leg has out-of-range coordinates")]
    InvalidCoordinates,
}

/// Scores candidates with live traffic and elevation data.
pub struct RouteRanker {
    traffic: Arc<dyn TrafficFlowSource>,
    elevation: Arc<dyn ElevationSource>,
}

impl RouteRanker {
    pub fn new(traffic: Arc<dyn TrafficFlowSource>, elevation: Arc<dyn ElevationSource>) -> Self {
        Self { traffic, elevation }
    }

    /// Score all candidates and return them safest first.
    ///
    /// Candidates are enriched concurrently. The result order depends only on
    /// the scores; equal scores keep the provider's order. An empty result
    /// means no candidate could be scored.
    pub async fn rank(&self, candidates: Vec<RouteCandidate>) -> Vec<ScoredRoute> {
        let total = candidates.len();
        let outcomes = join_all(
            candidates
                .into_iter()
                .map(|candidate| AssertUnwindSafe(self.score_candidate(candidate)).catch_unwind()),
        )
        .await;

        let mut ranked = Vec::with_capacity(total);
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(Ok(scored)) => ranked.push(scored),
                Ok(Err(err)) => {
                    tracing::warn!(candidate = index, "Dropping route candidate: {}", err);
                }
                Err(_) => {
                    tracing::error!(candidate = index, "Route candidate enrichment panicked, dropping it");
                }
            }
        }

        ranked.sort_by(|a, b| a.safety_score().total_cmp(&b.safety_score()));
        tracing::debug!("Ranked {} of {} route candidates", ranked.len(), total);
        ranked
    }

    async fn score_candidate(&self, candidate: RouteCandidate) -> Result<ScoredRoute, RankError> {
        let leg = candidate.first_leg().ok_or(RankError::MissingLeg)?;
        if !leg.start_location.is_valid() || !leg.end_location.is_valid() {
            return Err(RankError::InvalidCoordinates);
        }
        let (start, end) = (leg.start_location, leg.end_location);
        let (distance_m, duration_s) = (leg.distance_m, leg.duration_s);

        let (flow, ascent) = futures::join!(
            self.traffic.fetch_flow(start),
            self.elevation.fetch_ascent(start, end),
        );

        let flow = match flow {
            Ok(reading) => {
                tracing::debug!(
                    speed_kmh = reading.current_speed_kmh,
                    observed_at = %reading.observed_at,
                    "Traffic factor from live reading"
                );
                Some(reading)
            }
            Err(reason) => {
                tracing::warn!("Traffic data unavailable, using fallback factor: {}", reason);
                None
            }
        };
        let ascent = match ascent {
            Ok(reading) => Some(reading),
            Err(reason) => {
                tracing::warn!("Elevation data unavailable, assuming flat: {}", reason);
                None
            }
        };

        let factor = traffic_factor(flow.as_ref());
        let gain = elevation_gain(ascent.as_ref());
        let score = safety_score(distance_m as f64, duration_s as f64, factor, gain);

        Ok(ScoredRoute::new(
            candidate,
            distance_m,
            duration_s,
            factor,
            flow.map(|reading| reading.observed_at),
            gain,
            score,
        ))
    }
}
