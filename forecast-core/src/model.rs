use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Open-Meteo hourly timestamps, e.g. `2024-03-14T00:00`.
const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A latitude/longitude pair.
///
/// Values are not range-checked; whatever is given here is sent upstream verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A decoded forecast body.
///
/// The shape belongs to whoever produced it (the upstream API or the mock);
/// the only guarantee is that it is a JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast(Map<String, Value>);

impl Forecast {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Unit of `hourly.temperature_2m`, if the body reports one.
    pub fn temperature_unit(&self) -> Option<&str> {
        self.0
            .get("hourly_units")
            .and_then(|units| units.get("temperature_2m"))
            .and_then(Value::as_str)
    }

    /// Pair up `hourly.time` with `hourly.temperature_2m`.
    ///
    /// A body without hourly series (such as the mock's) yields an empty list.
    pub fn hourly_temperatures(&self) -> Result<Vec<HourlyTemperature>> {
        let Some(hourly) = self.0.get("hourly") else {
            return Ok(Vec::new());
        };

        let times = hourly.get("time").and_then(Value::as_array);
        let temps = hourly.get("temperature_2m").and_then(Value::as_array);

        let (times, temps) = match (times, temps) {
            (None, None) => return Ok(Vec::new()),
            (Some(times), Some(temps)) => (times, temps),
            _ => return Err(anyhow!("Forecast has only one of hourly.time / hourly.temperature_2m")),
        };

        if times.len() != temps.len() {
            return Err(anyhow!(
                "Forecast hourly series differ in length: {} times, {} temperatures",
                times.len(),
                temps.len()
            ));
        }

        times
            .iter()
            .zip(temps)
            .enumerate()
            .map(|(i, (time, temp))| -> Result<HourlyTemperature> {
                let raw = time
                    .as_str()
                    .ok_or_else(|| anyhow!("hourly.time[{i}] is not a string"))?;
                let time = NaiveDateTime::parse_from_str(raw, HOURLY_TIME_FORMAT)
                    .with_context(|| format!("Failed to parse hourly.time[{i}]: {raw}"))?;
                let temperature = temp
                    .as_f64()
                    .ok_or_else(|| anyhow!("hourly.temperature_2m[{i}] is not a number"))?;

                Ok(HourlyTemperature { time, temperature })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Forecast {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// One entry of the hourly temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyTemperature {
    pub time: NaiveDateTime,
    pub temperature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast(value: Value) -> Forecast {
        serde_json::from_value(value).expect("test body must be an object")
    }

    #[test]
    fn non_object_body_is_rejected() {
        let res: Result<Forecast, _> = serde_json::from_str("[1, 2, 3]");
        assert!(res.is_err());
    }

    #[test]
    fn display_renders_compact_json() {
        let f = forecast(json!({ "hourly": {} }));
        assert_eq!(f.to_string(), r#"{"hourly":{}}"#);
    }

    #[test]
    fn hourly_temperatures_pairs_series() {
        let f = forecast(json!({
            "hourly_units": { "time": "iso8601", "temperature_2m": "°C" },
            "hourly": {
                "time": ["2024-03-14T00:00", "2024-03-14T01:00"],
                "temperature_2m": [10.1, 9.2]
            }
        }));

        let series = f.hourly_temperatures().expect("series must decode");
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].time.format("%H:%M").to_string(), "01:00");
        assert_eq!(series[1].temperature, 9.2);
        assert_eq!(f.temperature_unit(), Some("°C"));
    }

    #[test]
    fn empty_hourly_yields_no_entries() {
        let f = forecast(json!({ "latitude": 1.0, "longitude": 2.0, "hourly": {} }));
        assert!(f.hourly_temperatures().unwrap().is_empty());
        assert_eq!(f.temperature_unit(), None);
    }

    #[test]
    fn mismatched_series_is_an_error() {
        let f = forecast(json!({
            "hourly": { "time": ["2024-03-14T00:00"], "temperature_2m": [] }
        }));
        let err = f.hourly_temperatures().unwrap_err();
        assert!(err.to_string().contains("differ in length"));
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let f = forecast(json!({
            "hourly": { "time": ["yesterday"], "temperature_2m": [1.0] }
        }));
        let err = f.hourly_temperatures().unwrap_err();
        assert!(err.to_string().contains("hourly.time[0]"));
    }
}
