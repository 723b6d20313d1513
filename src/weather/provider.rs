//! Weather service access.

use super::model::{ApiErrorBody, CitySearchResult, WeatherData};
use crate::config::WeatherConfig;
use crate::constants::{CITY_SEARCH_ENDPOINT, CURRENT_WEATHER_ENDPOINT, WEATHER_API_KEY_ENV};
use crate::logger::log;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key not configured (set {env} or [weather].api_key)", env = WEATHER_API_KEY_ENV)]
    MissingApiKey,

    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of weather data and city search results.
pub trait WeatherProvider: Send + Sync + 'static {
    /// Current conditions for a city name
    fn current_weather(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherData, WeatherError>> + Send;

    /// Cities matching a free-text query
    fn search_cities(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<CitySearchResult>, WeatherError>> + Send;
}

/// HTTP client for a WeatherAPI.com-compatible service
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl WeatherApiClient {
    pub fn new(config: &WeatherConfig) -> Self {
        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            log::warn!("No weather API key configured; weather will show an error");
        }

        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<T, WeatherError> {
        let key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {} q={}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("key", key)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|body| format!("{} (code {})", body.error.message, body.error.code))
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl WeatherProvider for WeatherApiClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        self.get_json(CURRENT_WEATHER_ENDPOINT, city).await
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CitySearchResult>, WeatherError> {
        self.get_json(CITY_SEARCH_ENDPOINT, query).await
    }
}
