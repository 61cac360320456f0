//! Open-Meteo API client
//!
//! Thin async wrapper over the Open-Meteo geocoding and forecast endpoints.
//! Every call is a single attempt: failures are reported, never retried.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, Location};
use crate::{ErrorCode, Result, TenkiError};

/// Fields requested from the forecast endpoint's `current` block
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

/// Looks up current weather for a coordinate pair
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn current_conditions(&self, latitude: f64, longitude: f64)
    -> Result<CurrentConditions>;
}

/// HTTP client for the Open-Meteo APIs
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherApiClient {
    /// Create a new client from the weather section of the configuration
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tenki/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TenkiError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Geocoding request URL for a free-text place name
    #[must_use]
    pub fn geocoding_url(&self, name: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.config.geocoding_base_url.trim_end_matches('/'),
            urlencoding::encode(name),
            urlencoding::encode(&self.config.language),
        )
    }

    /// Forecast request URL for current conditions at a coordinate pair
    #[must_use]
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&wind_speed_unit=ms&timezone=auto",
            self.config.forecast_base_url.trim_end_matches('/'),
            latitude,
            longitude,
            CURRENT_FIELDS,
        )
    }

    /// Candidate locations for a place name, best match first. Empty when nothing matched.
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Vec<Location>> {
        info!("Geocoding location: '{}'", name);
        let start_time = Instant::now();

        let url = self.geocoding_url(name);
        let response: openmeteo::GeocodingResponse = self
            .fetch_json(&url, HashMap::from([("location".to_string(), name.to_string())]))
            .await?;

        let locations: Vec<Location> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect();

        if locations.is_empty() {
            warn!("No results found for location '{}'", name);
        } else {
            info!(
                "Found {} geocoding results for '{}' in {:.3}s",
                locations.len(),
                name,
                start_time.elapsed().as_secs_f64()
            );
            debug!(
                "Geocoding results: {:?}",
                locations
                    .iter()
                    .map(|l| format!("{} ({})", l.name, l.format_coordinates()))
                    .collect::<Vec<_>>()
            );
        }

        Ok(locations)
    }

    /// Current conditions at a coordinate pair
    #[instrument(skip(self))]
    pub async fn get_current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions> {
        info!(
            "Getting current weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );
        let start_time = Instant::now();
        let coordinates = format!("{latitude:.4},{longitude:.4}");

        let url = self.forecast_url(latitude, longitude);
        let response: openmeteo::ForecastResponse = self
            .fetch_json(&url, HashMap::from([("coordinates".to_string(), coordinates.clone())]))
            .await?;

        let current = response.current.ok_or_else(|| {
            error!("Forecast response has no current block");
            TenkiError::api_with_context(
                "No current weather data available from Open-Meteo",
                ErrorCode::ApiInvalidResponse,
                HashMap::from([("coordinates".to_string(), coordinates)]),
            )
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved current weather in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", total_duration.as_secs_f64());
        }

        Ok(current.into())
    }

    /// Send a GET and decode the JSON body
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: HashMap<String, String>,
    ) -> Result<T> {
        let response = self.make_request(url, &context).await?;

        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            TenkiError::api_with_context(
                format!("Failed to read Open-Meteo response: {e}"),
                ErrorCode::ApiNetworkError,
                context.clone(),
            )
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {}", e);
            TenkiError::api_with_context(
                format!("Invalid data received from Open-Meteo: {e}"),
                ErrorCode::ApiInvalidResponse,
                context,
            )
        })
    }

    /// Single-attempt request with status mapping
    #[instrument(skip(self, context))]
    async fn make_request(&self, url: &str, context: &HashMap<String, String>) -> Result<Response> {
        debug!("Making HTTP request");
        let attempt_start = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                "Network error after {:.3}s: {}",
                attempt_start.elapsed().as_secs_f64(),
                e
            );
            let mut context = context.clone();
            context.insert("error".to_string(), e.to_string());
            TenkiError::api_with_context(
                format!("Network error: {e}"),
                ErrorCode::ApiNetworkError,
                context,
            )
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            attempt_start.elapsed().as_secs_f64()
        );

        if status.is_success() {
            return Ok(response);
        }

        let reason = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<openmeteo::ErrorResponse>(&body).ok())
            .map(|e| e.reason);

        let error_msg = match reason {
            Some(reason) => format!("API request failed with status {status}: {reason}"),
            None => format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            ),
        };
        warn!("HTTP error: {}", error_msg);

        let mut context = context.clone();
        context.insert("status_code".to_string(), status.as_u16().to_string());
        Err(TenkiError::api_with_context(
            error_msg,
            ErrorCode::ApiHttpStatus,
            context,
        ))
    }
}

#[async_trait]
impl WeatherFetcher for WeatherApiClient {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions> {
        self.get_current_conditions(latitude, longitude).await
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use serde::Deserialize;

    use crate::models::{CurrentConditions, Location};

    /// Forecast response, reduced to the `current` block
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: f64,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: f64,
        pub weather_code: i32,
    }

    /// Geocoding response; `results` is absent when nothing matched
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    /// Error body, e.g. `{"error": true, "reason": "..."}`
    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub reason: String,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                name: result.name,
                country: result.country,
                latitude: result.latitude,
                longitude: result.longitude,
            }
        }
    }

    impl From<CurrentData> for CurrentConditions {
        fn from(current: CurrentData) -> Self {
            CurrentConditions {
                temperature_celsius: current.temperature,
                humidity_percent: current.humidity,
                wind_speed_ms: current.wind_speed,
                weather_code: current.weather_code,
            }
        }
    }
}
