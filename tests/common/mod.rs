//! Stub collaborators shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tenki::{CoordinateResolver, CurrentConditions, Location, TenkiError, WeatherFetcher};

/// Resolver returning a fixed candidate, or not-found when empty
pub struct StubResolver {
    pub location: Option<Location>,
    pub calls: AtomicUsize,
}

impl StubResolver {
    pub fn found(location: Location) -> Self {
        Self {
            location: Some(location),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            location: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoordinateResolver for StubResolver {
    async fn resolve(&self, city: &str) -> tenki::Result<Location> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.location
            .clone()
            .ok_or_else(|| TenkiError::not_found(city))
    }
}

/// Fetcher returning fixed conditions and recording the coordinates it saw
pub struct StubFetcher {
    pub conditions: CurrentConditions,
    pub calls: AtomicUsize,
    pub seen: std::sync::Mutex<Vec<(f64, f64)>>,
}

impl StubFetcher {
    pub fn new(conditions: CurrentConditions) -> Self {
        Self {
            conditions,
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherFetcher for StubFetcher {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> tenki::Result<CurrentConditions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((latitude, longitude));
        }
        Ok(self.conditions)
    }
}

/// Fetcher that always fails like a dropped connection
pub struct FailingFetcher;

#[async_trait]
impl WeatherFetcher for FailingFetcher {
    async fn current_conditions(&self, _: f64, _: f64) -> tenki::Result<CurrentConditions> {
        Err(TenkiError::api(
            "Network error: connection reset",
            tenki::ErrorCode::ApiNetworkError,
        ))
    }
}

pub fn tokyo() -> Location {
    Location::with_country("Tokyo", "Japan", 35.6, 139.7)
}

pub fn hot_clear_day() -> CurrentConditions {
    CurrentConditions {
        temperature_celsius: 32.0,
        humidity_percent: 40.0,
        wind_speed_ms: 5.0,
        weather_code: 0,
    }
}
