//! Stub providers shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::models::{
    Coordinates, ElevationReading, Leg, Location, RouteCandidate, TrafficReading,
};
use crate::sources::{DirectionsSource, ElevationSource, TrafficFlowSource, Unavailable};

/// Build a one-leg candidate starting at `(lat, 0.0)`.
///
/// Latitude doubles as a key so stubs can answer per candidate.
pub fn candidate(name: &str, lat: f64, distance_m: u64, duration_s: u64) -> RouteCandidate {
    let start = Coordinates::new(lat, 0.0);
    let end = Coordinates::new(lat + 0.01, 0.01);
    RouteCandidate::new(
        vec![Leg {
            start_location: start,
            end_location: end,
            distance_m,
            duration_s,
        }],
        json!({ "summary": name }),
    )
}

pub fn summary(candidate: &RouteCandidate) -> &str {
    candidate.raw["summary"].as_str().unwrap_or_default()
}

fn key(point: Coordinates) -> i64 {
    (point.lat * 1000.0).round() as i64
}

/// Traffic stub answering by start latitude; other points get `default`.
pub struct StubTraffic {
    by_lat: HashMap<i64, f64>,
    panics: Vec<i64>,
    delays: HashMap<i64, Duration>,
    default: Option<f64>,
    pub calls: AtomicUsize,
}

impl StubTraffic {
    /// `None` makes every unlisted point unavailable.
    pub fn constant(speed: Option<f64>) -> Self {
        Self {
            by_lat: HashMap::new(),
            panics: Vec::new(),
            delays: HashMap::new(),
            default: speed,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_speed(mut self, lat: f64, speed: f64) -> Self {
        self.by_lat.insert(key(Coordinates::new(lat, 0.0)), speed);
        self
    }

    /// Answer for this start latitude only after `millis`.
    pub fn delayed_at(mut self, lat: f64, millis: u64) -> Self {
        self.delays
            .insert(key(Coordinates::new(lat, 0.0)), Duration::from_millis(millis));
        self
    }

    pub fn panicking_at(mut self, lat: f64) -> Self {
        self.panics.push(key(Coordinates::new(lat, 0.0)));
        self
    }
}

#[async_trait]
impl TrafficFlowSource for StubTraffic {
    async fn fetch_flow(&self, point: Coordinates) -> Result<TrafficReading, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = key(point);
        if self.panics.contains(&key) {
            panic!("traffic stub exploded at {:?}", point);
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        self.by_lat
            .get(&key)
            .copied()
            .or(self.default)
            .map(TrafficReading::new)
            .ok_or(Unavailable::Timeout)
    }
}

/// Elevation stub returning the same outcome for every pair of points.
pub struct StubElevation {
    ascent: Result<f64, Unavailable>,
}

impl StubElevation {
    pub fn ascent(ascent_m: f64) -> Self {
        Self { ascent: Ok(ascent_m) }
    }

    pub fn unavailable() -> Self {
        Self {
            ascent: Err(Unavailable::Status(503)),
        }
    }
}

#[async_trait]
impl ElevationSource for StubElevation {
    async fn fetch_ascent(
        &self,
        _start: Coordinates,
        _end: Coordinates,
    ) -> Result<ElevationReading, Unavailable> {
        self.ascent.clone().map(ElevationReading::new)
    }
}

/// Directions stub with a canned answer.
pub struct StubDirections {
    routes: Result<Vec<RouteCandidate>, Unavailable>,
    pub calls: AtomicUsize,
}

impl StubDirections {
    pub fn routes(routes: Vec<RouteCandidate>) -> Self {
        Self {
            routes: Ok(routes),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable(reason: Unavailable) -> Self {
        Self {
            routes: Err(reason),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DirectionsSource for StubDirections {
    async fn fetch_routes(
        &self,
        _start: &Location,
        _end: &Location,
    ) -> Result<Vec<RouteCandidate>, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.routes.clone()
    }
}
