//! Core data models for cycling route planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A start or end point as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Free-form place description ("Market St, San Francisco").
    Place(String),
    Coordinates(Coordinates),
}

impl Location {
    /// Parse user input into a location.
    ///
    /// Returns `None` for empty or whitespace-only input. Two comma separated
    /// numbers inside WGS84 bounds become `Coordinates`; everything else is
    /// kept verbatim (trimmed) as a place description.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if let [lat, lng] = parts.as_slice() {
            if let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) {
                let coords = Coordinates::new(lat, lng);
                if coords.is_valid() {
                    return Some(Self::Coordinates(coords));
                }
            }
        }

        Some(Self::Place(input.to_string()))
    }

    /// Render the location the way directions providers accept it.
    pub fn as_query(&self) -> String {
        match self {
            Self::Place(text) => text.clone(),
            Self::Coordinates(coords) => format!("{:.6},{:.6}", coords.lat, coords.lng),
        }
    }
}

/// One start-to-end segment of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub start_location: Coordinates,
    pub end_location: Coordinates,
    pub distance_m: u64,
    pub duration_s: u64,
}

/// One alternative returned by the directions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub legs: Vec<Leg>,
    /// Provider route object, passed through to the caller untouched.
    pub raw: Value,
}

impl RouteCandidate {
    pub fn new(legs: Vec<Leg>, raw: Value) -> Self {
        Self { legs, raw }
    }

    /// Only the first leg is ever scored.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }
}

/// Current traffic speed near a point.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficReading {
    pub current_speed_kmh: f64,
    pub observed_at: DateTime<Utc>,
}

impl TrafficReading {
    pub fn new(current_speed_kmh: f64) -> Self {
        Self {
            current_speed_kmh,
            observed_at: Utc::now(),
        }
    }
}

/// Cumulative ascent between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationReading {
    pub ascent_m: f64,
}

impl ElevationReading {
    pub fn new(ascent_m: f64) -> Self {
        Self { ascent_m }
    }

    /// Reading for a response that carried no route features.
    pub fn flat() -> Self {
        Self { ascent_m: 0.0 }
    }
}

/// A candidate together with the values used to score it.
///
/// Only the ranker builds these; fields are read through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    candidate: RouteCandidate,
    distance_m: u64,
    duration_s: u64,
    traffic_factor: f64,
    traffic_observed_at: Option<DateTime<Utc>>,
    elevation_gain_m: f64,
    safety_score: f64,
}

impl ScoredRoute {
    pub(crate) fn new(
        candidate: RouteCandidate,
        distance_m: u64,
        duration_s: u64,
        traffic_factor: f64,
        traffic_observed_at: Option<DateTime<Utc>>,
        elevation_gain_m: f64,
        safety_score: f64,
    ) -> Self {
        Self {
            candidate,
            distance_m,
            duration_s,
            traffic_factor,
            traffic_observed_at,
            elevation_gain_m,
            safety_score,
        }
    }

    pub fn candidate(&self) -> &RouteCandidate {
        &self.candidate
    }

    pub fn distance_m(&self) -> u64 {
        self.distance_m
    }

    pub fn duration_s(&self) -> u64 {
        self.duration_s
    }

    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }

    /// When the traffic reading behind the factor was taken; `None` means the
    /// fallback factor was used.
    pub fn traffic_observed_at(&self) -> Option<DateTime<Utc>> {
        self.traffic_observed_at
    }

    pub fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    /// Lower is safer.
    pub fn safety_score(&self) -> f64 {
        self.safety_score
    }
}

/// Response shape for the best-ranked route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub safest_route: Value,
    /// Estimated time of arrival, seconds.
    pub eta: u64,
    /// Meters.
    pub distance: u64,
    pub traffic_flow: f64,
    pub elevation_gain: f64,
}

impl From<ScoredRoute> for PlanResult {
    fn from(best: ScoredRoute) -> Self {
        Self {
            eta: best.duration_s,
            distance: best.distance_m,
            traffic_flow: best.traffic_factor,
            elevation_gain: best.elevation_gain_m,
            safest_route: best.candidate.raw,
        }
    }
}
