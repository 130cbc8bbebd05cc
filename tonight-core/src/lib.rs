//! Core library for the `tonight` CLI.
//!
//! This crate defines:
//! - The nighttime comfort evaluator and its verdict model
//! - Coordinate resolvers (bundled table, remote geocoding)
//! - The hourly forecast provider
//! - Configuration & credentials handling
//! - The view-state machine and share-panel content
//!
//! It is used by `tonight-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod evaluator;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod share;
pub mod state;

pub use config::Config;
pub use evaluator::{COMFORT_THRESHOLD_C, NightComfortEvaluator, NightWindow};
pub use model::{ComfortVerdict, Coordinates, HourlyForecast, HourlySample, ResolvedLocation};
pub use provider::ForecastProvider;
pub use resolver::{CoordinateResolver, ResolveError, ResolverId};
pub use state::{Event, SubmitOutcome, View};
