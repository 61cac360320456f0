//! Weather code classification
//!
//! Maps a WMO weather interpretation code (<https://open-meteo.com/en/docs>)
//! to a coarse condition category and the icon shown on the weather card.
//! The impression text uses its own, looser table in [`crate::impression`];
//! the two disagree near range boundaries and are kept separate.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};

/// Font Awesome icon identifiers used by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    CloudSun,
    Smog,
    CloudRain,
    Umbrella,
    Snowflake,
    CloudShowersHeavy,
    Bolt,
    Cloud,
}

impl Icon {
    /// Bare icon name, e.g. `cloud-sun`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::CloudSun => "cloud-sun",
            Self::Smog => "smog",
            Self::CloudRain => "cloud-rain",
            Self::Umbrella => "umbrella",
            Self::Snowflake => "snowflake",
            Self::CloudShowersHeavy => "cloud-showers-heavy",
            Self::Bolt => "bolt",
            Self::Cloud => "cloud",
        }
    }

    /// Icon class, e.g. `fa-cloud-sun`
    #[must_use]
    pub fn css_class(self) -> String {
        format!("fa-{}", self.name())
    }

    /// Full class attribute for the icon element
    #[must_use]
    pub fn element_class(self) -> String {
        format!("fa-solid {}", self.css_class())
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Coarse weather condition derived from a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    ClearSky,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    HeavyRainShowers,
    Thunderstorm,
    Cloudy,
}

impl ConditionCategory {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClearSky => "clear sky",
            Self::PartlyCloudy => "partly cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle/rain",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::HeavyRainShowers => "heavy rain showers",
            Self::Thunderstorm => "thunderstorm",
            Self::Cloudy => "cloudy",
        }
    }

    #[must_use]
    pub const fn icon(self) -> Icon {
        match self {
            Self::ClearSky => Icon::Sun,
            Self::PartlyCloudy => Icon::CloudSun,
            Self::Fog => Icon::Smog,
            Self::Drizzle => Icon::CloudRain,
            Self::Rain => Icon::Umbrella,
            Self::Snow => Icon::Snowflake,
            Self::HeavyRainShowers => Icon::CloudShowersHeavy,
            Self::Thunderstorm => Icon::Bolt,
            Self::Cloudy => Icon::Cloud,
        }
    }
}

/// Evaluated in order, first match wins. Codes outside every range are `Cloudy`.
const CATEGORY_RULES: [(RangeInclusive<i32>, ConditionCategory); 8] = [
    (0..=0, ConditionCategory::ClearSky),
    (1..=3, ConditionCategory::PartlyCloudy),
    (45..=48, ConditionCategory::Fog),
    (51..=55, ConditionCategory::Drizzle),
    (61..=67, ConditionCategory::Rain),
    (71..=77, ConditionCategory::Snow),
    (80..=82, ConditionCategory::HeavyRainShowers),
    (95..=99, ConditionCategory::Thunderstorm),
];

/// Result of classifying a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: ConditionCategory,
    pub label: &'static str,
    pub icon: Icon,
}

impl From<ConditionCategory> for Classification {
    fn from(category: ConditionCategory) -> Self {
        Self {
            category,
            label: category.label(),
            icon: category.icon(),
        }
    }
}

/// Category for a weather code
#[must_use]
pub fn category_for_code(weather_code: i32) -> ConditionCategory {
    CATEGORY_RULES
        .iter()
        .find(|(range, _)| range.contains(&weather_code))
        .map_or(ConditionCategory::Cloudy, |(_, category)| *category)
}

/// Classify a weather code into its label and icon
#[must_use]
pub fn classify(weather_code: i32) -> Classification {
    category_for_code(weather_code).into()
}
