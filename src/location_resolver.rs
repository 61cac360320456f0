//! Location Resolution Module
//!
//! Turns the free-text city typed by the user into a single `Location`.

use async_trait::async_trait;
use tracing::debug;

use crate::models::Location;
use crate::weather::WeatherApiClient;
use crate::{Result, TenkiError};

/// Resolves a city name to the geocoder's best candidate
#[async_trait]
pub trait CoordinateResolver: Send + Sync {
    /// Returns [`TenkiError::NotFound`] when the geocoder has no candidate.
    async fn resolve(&self, city: &str) -> Result<Location>;
}

/// Trim user input and reject blank queries
pub fn normalize_city_input(input: &str) -> Result<&str> {
    let city = input.trim();
    if city.is_empty() {
        return Err(TenkiError::validation("Location cannot be empty"));
    }
    Ok(city)
}

#[async_trait]
impl CoordinateResolver for WeatherApiClient {
    async fn resolve(&self, city: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", city);

        let location = self
            .geocode(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TenkiError::not_found(city))?;

        debug!(
            "Resolved location: {} at ({})",
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }
}
