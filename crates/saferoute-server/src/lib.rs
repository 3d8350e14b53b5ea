//! SafeRoute server - HTTP front end for the route safety planner.

pub mod api;
pub mod config;
pub mod logging;
pub mod state;

pub use api::app;
pub use config::{Config, ConfigError, LogFormat};
pub use state::AppState;
