use thiserror::Error;

/// Boxed error produced by an [`HttpTransport`](crate::provider::live::HttpTransport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a forecast could not be obtained.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The API answered with something other than `200 OK`.
    #[error("failed to fetch forecast from API")]
    Api,

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("failed to reach forecast API")]
    Transport(#[source] TransportError),

    /// The body was not a JSON object.
    #[error("failed to decode forecast body")]
    Decode(#[from] serde_json::Error),
}
