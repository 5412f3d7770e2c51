use std::sync::Arc;

use crate::{Coordinates, FetchFailure, Forecast, ForecastSource};

/// Fetches forecasts through a single source fixed at construction.
#[derive(Debug, Clone)]
pub struct ForecastHandler {
    source: Arc<dyn ForecastSource>,
}

impl ForecastHandler {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        Self { source }
    }

    pub async fn get_forecast(&self, coordinates: Coordinates) -> Result<Forecast, FetchFailure> {
        self.source.fetch(coordinates).await
    }
}

/// A [`ForecastHandler`] that logs before each fetch.
#[derive(Debug, Clone)]
pub struct FancyForecastHandler {
    inner: ForecastHandler,
}

impl FancyForecastHandler {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        Self { inner: ForecastHandler::new(source) }
    }

    pub async fn get_forecast(&self, coordinates: Coordinates) -> Result<Forecast, FetchFailure> {
        self.inner.get_forecast(coordinates).await
    }

    pub async fn fancy_get_forecast(
        &self,
        coordinates: Coordinates,
    ) -> Result<Forecast, FetchFailure> {
        tracing::info!("fetching forecast in a fancy way");
        self.inner.get_forecast(coordinates).await
    }
}

impl From<ForecastHandler> for FancyForecastHandler {
    fn from(inner: ForecastHandler) -> Self {
        Self { inner }
    }
}
