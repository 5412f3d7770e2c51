use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt::Debug;

use crate::{Coordinates, FetchFailure, Forecast, TransportError};

use super::ForecastSource;

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Issues a single GET and hands back whatever came back.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Hourly temperature forecasts from Open-Meteo.
///
/// The endpoint is fixed; only the transport underneath it can be swapped.
#[derive(Debug, Clone)]
pub struct LiveForecastSource<T = ReqwestTransport> {
    transport: T,
}

impl LiveForecastSource {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for LiveForecastSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> LiveForecastSource<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn request_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{OPEN_METEO_FORECAST_URL}?latitude={}&longitude={}&hourly=temperature_2m",
            coordinates.latitude, coordinates.longitude
        )
    }
}

#[async_trait]
impl<T: HttpTransport> ForecastSource for LiveForecastSource<T> {
    async fn fetch(&self, coordinates: Coordinates) -> Result<Forecast, FetchFailure> {
        let url = self.request_url(coordinates);
        tracing::debug!(%url, %coordinates, "requesting forecast");

        let res = self.transport.get(&url).await.map_err(FetchFailure::Transport)?;

        if res.status != StatusCode::OK {
            tracing::warn!(status = %res.status, "forecast API returned non-success status");
            return Err(FetchFailure::Api);
        }

        Ok(serde_json::from_str(&res.body)?)
    }
}
