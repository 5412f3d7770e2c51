use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{Coordinates, provider::ProviderId};

/// Chicago, the location used when none is configured.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(41.85, -87.65);

/// User settings stored on disk. Every field is optional.
///
/// Only user defaults live here; the forecast endpoint is not configurable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider id used when none is given, e.g. "live" or "mock".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [location]
    /// latitude = 41.85
    /// longitude = -87.65
    pub location: Option<Coordinates>,
}

impl Config {
    /// Return the default provider, falling back to the live source.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            None => Ok(ProviderId::Live),
            Some(s) => ProviderId::try_from(s).with_context(|| {
                format!(
                    "Invalid default provider in config.\n\
                     Hint: run `forecast configure` or edit {}.",
                    Self::config_file_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the config file".to_string())
                )
            }),
        }
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    pub fn coordinates(&self) -> Coordinates {
        self.location.unwrap_or(DEFAULT_COORDINATES)
    }

    pub fn set_location(&mut self, coordinates: Coordinates) {
        self.location = Some(coordinates);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_builtin_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Live);
        assert_eq!(cfg.coordinates(), Coordinates::new(41.85, -87.65));
    }

    #[test]
    fn invalid_default_provider_is_reported() {
        let cfg = Config { default_provider: Some("cached".into()), ..Config::default() };
        let err = cfg.default_provider_id().unwrap_err();

        assert!(err.to_string().contains("Invalid default provider"));
        assert!(format!("{err:#}").contains("Unknown provider 'cached'"));
    }

    #[test]
    fn set_default_provider_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_default_provider(ProviderId::Mock);

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Mock);
        assert_eq!(cfg.default_provider.as_deref(), Some("mock"));
    }

    #[test]
    fn parses_location_table() {
        let cfg = Config::from_toml(
            r#"
            default_provider = "mock"

            [location]
            latitude = 52.52
            longitude = 13.41
            "#,
        )
        .expect("valid TOML");

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Mock);
        assert_eq!(cfg.coordinates(), Coordinates::new(52.52, 13.41));
    }

    #[test]
    fn endpoint_override_is_rejected() {
        let err = Config::from_toml(r#"api_url = "http://localhost:8080/v1/forecast""#)
            .unwrap_err();

        assert!(format!("{err:#}").contains("api_url"));
    }

    #[test]
    fn toml_roundtrip_keeps_location() {
        let mut cfg = Config::default();
        cfg.set_location(Coordinates::new(-33.87, 151.21));

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();

        assert_eq!(back.coordinates(), Coordinates::new(-33.87, 151.21));
        assert!(back.default_provider.is_none());
    }
}
