//! SafeRoute providers - HTTP clients for external map data.
//!
//! Each client implements one of the source traits from `saferoute-core` and
//! reports every failure as `Unavailable`.

mod http;

pub mod google_directions;
pub mod ors_elevation;
pub mod tomtom_traffic;

pub use google_directions::{GoogleDirectionsClient, DEFAULT_DIRECTIONS_URL};
pub use ors_elevation::{OrsElevationClient, DEFAULT_ELEVATION_URL};
pub use tomtom_traffic::{TomTomTrafficClient, DEFAULT_TRAFFIC_URL};
