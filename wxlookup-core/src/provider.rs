use crate::{
    Config, WeatherSnapshot, error::ProviderError, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-form city name.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for WeatherAPI.com.\n\
                 Hint: run `wxlookup configure` or set WEATHERAPI_KEY."
        )
    })?;

    let provider = WeatherApiProvider::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout(Duration::from_secs(config.timeout_secs()))
        .build()?;

    Ok(Box::new(provider))
}
