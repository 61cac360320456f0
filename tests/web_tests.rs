//! Router tests driving the axum app in-process

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{FailingFetcher, StubFetcher, StubResolver, hot_clear_day, tokyo};
use http_body_util::BodyExt;
use tenki::api::AppState;
use tenki::web;
use tower::ServiceExt;

fn state(resolver: StubResolver) -> AppState {
    AppState {
        resolver: Arc::new(resolver),
        fetcher: Arc::new(StubFetcher::new(hot_clear_day())),
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = web::app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_weather_endpoint_returns_card() {
    let (status, body) = get_json(state(StubResolver::found(tokyo())), "/api/weather?city=Tokyo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location_label"], "Tokyo, Japan");
    assert_eq!(body["temperature"], "32°C");
    assert_eq!(body["wind_speed"], "5 m/s");
    assert_eq!(body["humidity"], "40%");
    assert_eq!(body["icon_class"], "fa-solid fa-sun");
    assert_eq!(body["condition"], "clear sky");

    let impression = body["impression"].as_str().unwrap();
    assert!(impression.contains("Tokyo"));
    assert!(impression.contains("32℃"));
    assert!(impression.contains("快晴"));
}

#[tokio::test]
async fn test_weather_endpoint_not_found() {
    let (status, body) = get_json(state(StubResolver::empty()), "/api/weather?city=Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "都市が見つかりませんでした。");
}

#[tokio::test]
async fn test_weather_endpoint_requires_city() {
    let (status, body) = get_json(state(StubResolver::found(tokyo())), "/api/weather").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Location cannot be empty"));
}

#[tokio::test]
async fn test_weather_endpoint_upstream_failure() {
    let state = AppState {
        resolver: Arc::new(StubResolver::found(tokyo())),
        fetcher: Arc::new(FailingFetcher),
    };
    let (status, body) = get_json(state, "/api/weather?city=Tokyo").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Network error: connection reset");
}

#[tokio::test]
async fn test_index_serves_widget_page() {
    let response = web::app(state(StubResolver::found(tokyo())))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/weather?city="));
    assert!(html.contains("copy-btn"));
}
