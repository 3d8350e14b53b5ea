//! Safety scoring for route candidates.
//!
//! The score is a raw weighted sum over heterogeneous units: a factor derived
//! from km/h, meters of ascent, meters of distance and seconds of duration.
//! Nothing is normalized across candidates. Lower is safer.

use crate::models::{ElevationReading, TrafficReading};

pub const TRAFFIC_WEIGHT: f64 = 0.4;
pub const ELEVATION_WEIGHT: f64 = 0.3;
pub const DISTANCE_WEIGHT: f64 = 0.2;
pub const DURATION_WEIGHT: f64 = 0.1;

/// Traffic factor applied when no traffic reading is available.
pub const FALLBACK_TRAFFIC_FACTOR: f64 = 3.0;

/// Speed that maps to a traffic factor of 1.
pub const TRAFFIC_SPEED_DIVISOR_KMH: f64 = 20.0;

/// Weighted safety score for one candidate.
pub fn safety_score(
    distance_m: f64,
    duration_s: f64,
    traffic_factor: f64,
    elevation_gain_m: f64,
) -> f64 {
    TRAFFIC_WEIGHT * traffic_factor
        + ELEVATION_WEIGHT * elevation_gain_m
        + DISTANCE_WEIGHT * distance_m
        + DURATION_WEIGHT * duration_s
}

/// `speed / 20`, or exactly [`FALLBACK_TRAFFIC_FACTOR`] without a reading.
pub fn traffic_factor(reading: Option<&TrafficReading>) -> f64 {
    match reading {
        Some(reading) => reading.current_speed_kmh / TRAFFIC_SPEED_DIVISOR_KMH,
        None => FALLBACK_TRAFFIC_FACTOR,
    }
}

/// Ascent in meters, or zero without a reading.
pub fn elevation_gain(reading: Option<&ElevationReading>) -> f64 {
    reading.map(|reading| reading.ascent_m).unwrap_or(0.0)
}
