//! Current-conditions model and display helpers

use serde::{Deserialize, Serialize};

/// Current weather at a location, as reported by the forecast API
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Relative humidity in percent
    pub humidity_percent: f64,
    /// Wind speed at 10 m, in m/s
    pub wind_speed_ms: f64,
    /// WMO weather interpretation code, not range-checked
    pub weather_code: i32,
}

/// Round half toward positive infinity, so 2.5 becomes 3 and -2.5 becomes -2.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl CurrentConditions {
    /// Temperature rounded to a whole degree
    #[must_use]
    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature_celsius)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.rounded_temperature())
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} m/s", self.wind_speed_ms)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity_percent)
    }
}
