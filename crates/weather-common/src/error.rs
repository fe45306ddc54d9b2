//! Error types for weather-archive services.

use thiserror::Error;

/// Result type alias using WeatherError.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Primary error type for weather-archive operations.
#[derive(Debug, Error)]
pub enum WeatherError {
    // === Request Errors ===
    #[error("{0}")]
    Validation(String),

    // === Upstream Provider Errors ===
    #[error("Open-Meteo API error: {status} - {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("Request timeout: Open-Meteo API did not respond in time")]
    ProviderTimeout,

    #[error("Failed to fetch weather data: {0}")]
    ProviderTransport(String),

    // === Storage Errors ===
    #[error("Failed to store file '{0}' in cloud storage. Please check storage configuration.")]
    UploadFailed(String),

    #[error("File '{0}' not found in storage")]
    NotFound(String),

    #[error("Invalid JSON format in file '{file}': {detail}")]
    InvalidStoredContent { file: String, detail: String },

    #[error("Storage configuration error: {0}")]
    StorageConfig(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl WeatherError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WeatherError::Validation(_) => 400,
            WeatherError::NotFound(_) => 404,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for WeatherError {
    fn from(err: std::io::Error) -> Self {
        WeatherError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            WeatherError::Validation("bad latitude".into()).http_status_code(),
            400
        );
        assert_eq!(
            WeatherError::NotFound("missing.json".into()).http_status_code(),
            404
        );
        assert_eq!(WeatherError::ProviderTimeout.http_status_code(), 500);
        assert_eq!(
            WeatherError::UploadFailed("x.json".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_provider_status_message() {
        let err = WeatherError::ProviderStatus {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "Open-Meteo API error: 429 - rate limited");
    }
}
