//! Data models for `tenki`
//!
//! - Location: a resolved geocoding candidate
//! - Conditions: the current-weather record used for one search

pub mod conditions;
pub mod location;

pub use conditions::CurrentConditions;
pub use location::Location;
