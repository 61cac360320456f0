//! HTTP API for the weather widget

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::TenkiError;
use crate::impression::RandomSelector;
use crate::location_resolver::CoordinateResolver;
use crate::search::{WeatherCard, search};
use crate::weather::{WeatherApiClient, WeatherFetcher};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Collaborators shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn CoordinateResolver>,
    pub fetcher: Arc<dyn WeatherFetcher>,
}

impl AppState {
    /// State backed by one Open-Meteo client for both lookups
    #[must_use]
    pub fn from_client(client: WeatherApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            resolver: client.clone(),
            fetcher: client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps search failures onto HTTP responses
#[derive(Debug)]
pub struct ApiError(TenkiError);

impl From<TenkiError> for ApiError {
    fn from(err: TenkiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TenkiError::Validation { .. } => StatusCode::BAD_REQUEST,
            TenkiError::NotFound { .. } => StatusCode::NOT_FOUND,
            TenkiError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Weather lookup failed: {}", self.0);
        }
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", get(get_weather))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherCard>, ApiError> {
    let outcome = search(state.resolver.as_ref(), state.fetcher.as_ref(), &params.city).await?;
    let card = outcome.render(&mut RandomSelector::new());
    Ok(Json(card))
}
