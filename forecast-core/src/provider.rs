use crate::{
    Coordinates, FetchFailure, Forecast,
    provider::{live::LiveForecastSource, mock::MockForecastSource},
};
use async_trait::async_trait;
use std::{collections::BTreeMap, convert::TryFrom, fmt::Debug, sync::Arc};

pub mod live;
pub mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderId {
    Live,
    Mock,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Live => "live",
            ProviderId::Mock => "mock",
        }
    }

    /// Capitalised name used when listing providers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Live => "Live",
            ProviderId::Mock => "Mock",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Live, ProviderId::Mock]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "live" => Ok(ProviderId::Live),
            "mock" => Ok(ProviderId::Mock),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: live, mock."
            )),
        }
    }
}

/// Something that turns coordinates into a [`Forecast`].
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, coordinates: Coordinates) -> Result<Forecast, FetchFailure>;
}

/// Name-to-source mapping used to pick the active [`ForecastSource`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sources: BTreeMap<ProviderId, Arc<dyn ForecastSource>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the live Open-Meteo source and the mock.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderId::Live, LiveForecastSource::new());
        registry.register(ProviderId::Mock, MockForecastSource);
        registry
    }

    pub fn register(&mut self, id: ProviderId, source: impl ForecastSource + 'static) {
        self.sources.insert(id, Arc::new(source));
    }

    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn ForecastSource>> {
        self.sources.get(&id).cloned()
    }

    /// Look a source up by its exact key ("live", "mock"), failing on unknown
    /// or unregistered names.
    pub fn select(&self, name: &str) -> anyhow::Result<Arc<dyn ForecastSource>> {
        let id = ProviderId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown provider '{name}'. Supported providers: live, mock.")
            })?;
        self.get(id)
            .ok_or_else(|| anyhow::anyhow!("Provider '{id}' is not registered."))
    }

    /// Registered ids in listing order.
    pub fn ids(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.sources.keys().copied()
    }
}
