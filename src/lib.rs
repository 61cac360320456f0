//! `tenki` - city weather lookup with a shareable impression summary
//!
//! Resolves a city through the Open-Meteo geocoder, fetches its current
//! conditions, classifies the weather code into an icon and label, and
//! generates a short impression sentence.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod impression;
pub mod location_resolver;
pub mod models;
pub mod search;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use classifier::{Classification, ConditionCategory, Icon, classify};
pub use config::TenkiConfig;
pub use error::{CITY_NOT_FOUND_MESSAGE, ErrorCode, TenkiError};
pub use impression::{FixedSelector, ImpressionGenerator, RandomSelector, TemplateSelector};
pub use location_resolver::CoordinateResolver;
pub use models::{CurrentConditions, Location};
pub use search::{SearchOutcome, WeatherCard, render, search};
pub use weather::{WeatherApiClient, WeatherFetcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TenkiError>;
