//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The `ForecastSource` abstraction with live (Open-Meteo) and mock variants
//! - Handlers that delegate to a single injected source
//! - The provider registry used to pick a source by name
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{FetchFailure, TransportError};
pub use handler::{FancyForecastHandler, ForecastHandler};
pub use model::{Coordinates, Forecast, HourlyTemperature};
pub use provider::{
    ForecastSource, ProviderId, Registry,
    live::{HttpResponse, HttpTransport, LiveForecastSource, ReqwestTransport},
    mock::MockForecastSource,
};
