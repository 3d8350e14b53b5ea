//! SafeRoute core library.
//!
//! Provider-agnostic route scoring: data models, the provider interfaces,
//! the safety score, candidate ranking and the plan-route flow. HTTP clients
//! for real providers live in `saferoute-providers`.

pub mod models;
pub mod planner;
pub mod ranking;
pub mod scoring;
pub mod sources;

#[cfg(test)]
mod test_support;

pub use models::{
    Coordinates, ElevationReading, Leg, Location, PlanResult, RouteCandidate, ScoredRoute,
    TrafficReading,
};
pub use planner::{PlanError, PlanRouteService};
pub use ranking::{RankError, RouteRanker};
pub use sources::{DirectionsSource, ElevationSource, TrafficFlowSource, Unavailable};
