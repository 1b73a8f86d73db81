use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a snapshot was observed, as resolved by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.region, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned by the provider, often protocol-relative.
    pub icon: String,
}

impl Condition {
    /// Icon reference usable outside a browser page.
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

/// Current conditions, both temperature units included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub pressure_mb: f64,
    pub vis_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_epoch: Option<i64>,
}

/// Result of one lookup. Replaced wholesale by the next successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Current,
}

impl WeatherSnapshot {
    pub fn temperature(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.current.temp_c,
            TemperatureUnit::Fahrenheit => self.current.temp_f,
        }
    }

    /// Temperature formatted for display, e.g. `20 °C`.
    pub fn temperature_label(&self, unit: TemperatureUnit) -> String {
        format!("{} {}", self.temperature(unit), unit.symbol())
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.current.last_updated_epoch.and_then(unix_to_utc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn is_celsius(self) -> bool {
        self == TemperatureUnit::Celsius
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::paris;

    #[test]
    fn location_label_joins_all_parts() {
        assert_eq!(paris().location.to_string(), "Paris, Île-de-France, France");
    }

    #[test]
    fn temperature_label_uses_selected_unit() {
        let snap = paris();
        assert_eq!(snap.temperature_label(TemperatureUnit::Celsius), "20 °C");
        assert_eq!(snap.temperature_label(TemperatureUnit::Fahrenheit), "68 °F");
    }

    #[test]
    fn protocol_relative_icon_gets_https() {
        let snap = paris();
        assert_eq!(
            snap.current.condition.icon_url(),
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }

    #[test]
    fn unit_parsing_accepts_short_and_long_names() {
        assert_eq!(TemperatureUnit::try_from("F").unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::try_from("celsius").unwrap(), TemperatureUnit::Celsius);
        let err = TemperatureUnit::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit"));
    }

    #[test]
    fn toggled_twice_is_identity() {
        let unit = TemperatureUnit::Celsius;
        assert_eq!(unit.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(unit.toggled().toggled(), unit);
    }

    #[test]
    fn deserializes_provider_payload() {
        let json = r#"{
            "location": {
                "name": "Paris", "region": "Île-de-France", "country": "France", "lat": 48.87
            },
            "current": {
                "last_updated_epoch": 1714564800,
                "temp_c": 20.0, "temp_f": 68.0,
                "condition": {"text": "Sunny", "icon": "//cdn/113.png", "code": 1000},
                "humidity": 50, "pressure_mb": 1012.0, "vis_km": 10.0, "wind_kph": 3.6
            }
        }"#;
        let snap: WeatherSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.location.region, "Île-de-France");
        assert_eq!(snap.current.humidity, 50);
        assert_eq!(
            snap.observed_at().map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:00:00+00:00".to_string())
        );
    }
}
