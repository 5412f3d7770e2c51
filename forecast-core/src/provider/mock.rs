use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{Coordinates, FetchFailure, Forecast};

use super::ForecastSource;

/// Offline source that echoes the coordinates back with no hourly data.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockForecastSource;

#[async_trait]
impl ForecastSource for MockForecastSource {
    async fn fetch(&self, coordinates: Coordinates) -> Result<Forecast, FetchFailure> {
        let mut body = Map::new();
        body.insert("latitude".to_string(), Value::from(coordinates.latitude));
        body.insert("longitude".to_string(), Value::from(coordinates.longitude));
        body.insert("hourly".to_string(), Value::Object(Map::new()));

        Ok(body.into())
    }
}
