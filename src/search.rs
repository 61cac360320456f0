//! Search pipeline and card rendering
//!
//! A search resolves the city, then fetches current conditions for the first
//! candidate. Rendering is a separate synchronous step that takes everything it
//! needs as arguments, so the same card feeds the CLI and the HTTP surface.

use serde::Serialize;
use tracing::{info, instrument};

use crate::classifier::classify;
use crate::impression::{TemplateSelector, generate_with};
use crate::location_resolver::{CoordinateResolver, normalize_city_input};
use crate::models::{CurrentConditions, Location};
use crate::weather::WeatherFetcher;
use crate::Result;

/// Everything one successful search produced
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub location: Location,
    pub conditions: CurrentConditions,
}

/// Rendered weather card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    /// "name, country" heading
    pub location_label: String,
    /// Rounded temperature, e.g. `32°C`
    pub temperature: String,
    /// e.g. `5 m/s`
    pub wind_speed: String,
    /// e.g. `40%`
    pub humidity: String,
    /// Icon class, e.g. `fa-sun`
    pub icon: String,
    /// Class attribute for the icon element, e.g. `fa-solid fa-sun`
    pub icon_class: String,
    /// Classifier label, e.g. `clear sky`
    pub condition: String,
    /// Generated impression sentence
    pub impression: String,
}

/// Resolve `city` and fetch its current conditions.
///
/// The forecast request is only sent once geocoding produced a candidate.
#[instrument(skip(resolver, fetcher))]
pub async fn search<R, F>(resolver: &R, fetcher: &F, city: &str) -> Result<SearchOutcome>
where
    R: CoordinateResolver + ?Sized,
    F: WeatherFetcher + ?Sized,
{
    let city = normalize_city_input(city)?;

    let location = resolver.resolve(city).await?;
    let conditions = fetcher
        .current_conditions(location.latitude, location.longitude)
        .await?;

    info!(
        "Search for '{}' resolved to {} (code {})",
        city, location.name, conditions.weather_code
    );

    Ok(SearchOutcome {
        location,
        conditions,
    })
}

/// Build the card for a resolved location and its conditions
pub fn render<S: TemplateSelector + ?Sized>(
    location: &Location,
    conditions: &CurrentConditions,
    selector: &mut S,
) -> WeatherCard {
    let classification = classify(conditions.weather_code);

    WeatherCard {
        location_label: location.display_label(),
        temperature: conditions.format_temperature(),
        wind_speed: conditions.format_wind(),
        humidity: conditions.format_humidity(),
        icon: classification.icon.css_class(),
        icon_class: classification.icon.element_class(),
        condition: classification.label.to_string(),
        impression: generate_with(selector, &location.name, conditions),
    }
}

impl SearchOutcome {
    /// Render this outcome as a card
    pub fn render<S: TemplateSelector + ?Sized>(&self, selector: &mut S) -> WeatherCard {
        render(&self.location, &self.conditions, selector)
    }
}

impl WeatherCard {
    /// Plain-text layout for terminal output
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{} {} ({})\nWind: {}  Humidity: {}\n\n{}",
            self.location_label,
            self.temperature,
            self.condition,
            self.icon,
            self.wind_speed,
            self.humidity,
            self.impression
        )
    }
}
