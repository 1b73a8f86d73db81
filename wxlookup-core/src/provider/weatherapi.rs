use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::ProviderError, model::WeatherSnapshot};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug)]
pub struct WeatherApiProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl WeatherApiProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<WeatherApiProvider> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(WeatherApiProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl WeatherApiProvider {
    pub fn builder(api_key: String) -> WeatherApiProviderBuilder {
        WeatherApiProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let url = format!("{}/current.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ProviderError::Transport)?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "WeatherAPI request failed");
            let message = serde_json::from_str::<WaErrorBody>(&body)
                .ok()
                .map(|b| b.error.message);
            return Err(ProviderError::Status { status, message });
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::debug!(body = %truncate_body(&body), "Unparseable WeatherAPI payload");
            ProviderError::Malformed(err)
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_strips_trailing_slash() {
        let provider = WeatherApiProvider::builder("KEY".into())
            .base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(provider.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
