//! Error types and handling for `tenki`

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Message shown when geocoding yields no candidate for the searched city.
pub const CITY_NOT_FOUND_MESSAGE: &str = "都市が見つかりませんでした。";

/// Machine-readable classification of upstream API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request never produced a response (DNS, connect, timeout)
    ApiNetworkError,
    /// The service answered with a non-success status
    ApiHttpStatus,
    /// The response body could not be decoded or lacked required data
    ApiInvalidResponse,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::ApiNetworkError => "API_NETWORK_ERROR",
            ErrorCode::ApiHttpStatus => "API_HTTP_STATUS",
            ErrorCode::ApiInvalidResponse => "API_INVALID_RESPONSE",
        };
        f.write_str(code)
    }
}

/// Main error type for `tenki`
#[derive(Error, Debug)]
pub enum TenkiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error [{code}]: {message}")]
    Api {
        message: String,
        code: ErrorCode,
        context: HashMap<String, String>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned no candidate for the query
    #[error("{}", CITY_NOT_FOUND_MESSAGE)]
    NotFound { query: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TenkiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without extra context
    pub fn api<S: Into<String>>(message: S, code: ErrorCode) -> Self {
        Self::api_with_context(message, code, HashMap::new())
    }

    /// Create a new API error carrying request details
    pub fn api_with_context<S: Into<String>>(
        message: S,
        code: ErrorCode,
        context: HashMap<String, String>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            code,
            context,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for a city query
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TenkiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TenkiError::Api { message, .. } => message.clone(),
            TenkiError::Validation { message } => format!("Invalid input: {message}"),
            TenkiError::NotFound { .. } => CITY_NOT_FOUND_MESSAGE.to_string(),
            TenkiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TenkiError::General { message } => message.clone(),
        }
    }
}
