//! Fixtures shared by unit tests.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    error::ProviderError,
    model::{Condition, Current, Location, WeatherSnapshot},
    provider::WeatherProvider,
};

pub fn paris() -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            name: "Paris".into(),
            region: "Île-de-France".into(),
            country: "France".into(),
        },
        current: Current {
            temp_c: 20.0,
            temp_f: 68.0,
            condition: Condition {
                text: "Sunny".into(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
            },
            humidity: 50,
            pressure_mb: 1012.0,
            vis_km: 10.0,
            last_updated_epoch: None,
        },
    }
}

pub fn london() -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            name: "London".into(),
            region: "City of London, Greater London".into(),
            country: "United Kingdom".into(),
        },
        current: Current {
            temp_c: 12.5,
            temp_f: 54.5,
            condition: Condition {
                text: "Light rain".into(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/296.png".into(),
            },
            humidity: 87,
            pressure_mb: 1004.0,
            vis_km: 6.0,
            last_updated_epoch: Some(1714564800),
        },
    }
}

/// Answers known cities with a snapshot and everything else with the
/// provider's "no matching location" error.
#[derive(Debug, Default)]
pub struct StubProvider {
    cities: HashMap<String, WeatherSnapshot>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: &str, snapshot: WeatherSnapshot) -> Self {
        self.cities.insert(city.to_string(), snapshot);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cities
            .get(city)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: StatusCode::BAD_REQUEST,
                message: Some("No matching location found.".into()),
            })
    }
}
