//! Weather archive endpoints: store, list and fetch stored objects.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use storage::StoredObject;
use weather_common::WeatherError;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::validate_request;

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub status: &'static str,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<StoredObject>,
}

/// POST /api/store-weather-data
///
/// Validates the query, fetches historical data from Open-Meteo and
/// stores the provider response as one JSON object.
pub async fn store_weather_data(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<StoreResponse>, ApiError> {
    if let Err(e) = validate_request(
        request.latitude,
        request.longitude,
        &request.start_date,
        &request.end_date,
    ) {
        warn!(
            latitude = request.latitude,
            longitude = request.longitude,
            start_date = %request.start_date,
            end_date = %request.end_date,
            error = %e,
            "Rejected invalid weather request"
        );
        return Err(WeatherError::Validation(e.to_string()).into());
    }

    let data = state
        .weather
        .fetch_daily(
            request.latitude,
            request.longitude,
            &request.start_date,
            &request.end_date,
        )
        .await?;

    let file_name = generate_file_name(
        request.latitude,
        request.longitude,
        &request.start_date,
        &request.end_date,
        Utc::now(),
    );

    let content = serde_json::to_vec_pretty(&data)
        .map_err(|e| WeatherError::Internal(format!("Failed to serialize weather data: {}", e)))?;

    info!(file = %file_name, size = content.len(), "Storing weather data");
    if !state.storage.upload(&file_name, content.into()).await {
        error!(file = %file_name, "Failed to store weather data");
        return Err(WeatherError::UploadFailed(file_name).into());
    }

    info!(file = %file_name, "Stored weather data");
    Ok(Json(StoreResponse {
        status: "ok",
        file: file_name,
    }))
}

/// GET /api/list-weather-files
pub async fn list_weather_files(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<FileListResponse> {
    let files = state.storage.list().await;
    info!(count = files.len(), "Listed weather files");
    Json(FileListResponse { files })
}

/// GET /api/weather-file-content/:file_name
///
/// Returns the stored JSON document verbatim; 404 when the object is
/// absent, 500 when its bytes are not valid JSON.
pub async fn weather_file_content(
    Extension(state): Extension<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let content = match state.storage.get(&file_name).await {
        Some(content) => content,
        None => {
            warn!(file = %file_name, "Requested weather file not found");
            return Err(WeatherError::NotFound(file_name).into());
        }
    };

    let data: serde_json::Value = serde_json::from_slice(&content).map_err(|e| {
        error!(file = %file_name, error = %e, "Stored weather file holds invalid JSON");
        WeatherError::InvalidStoredContent {
            file: file_name.clone(),
            detail: e.to_string(),
        }
    })?;

    info!(file = %file_name, size = content.len(), "Fetched weather file content");
    Ok(Json(data))
}

/// Build the object name for one stored query.
///
/// Slashes, backslashes and spaces in the formatted parameters are
/// replaced so the name is a single flat key.
pub fn generate_file_name(
    latitude: f64,
    longitude: f64,
    start_date: &str,
    end_date: &str,
    now: DateTime<Utc>,
) -> String {
    let name = format!(
        "weather_{}_{}_{}_{}_{}.json",
        latitude,
        longitude,
        start_date,
        end_date,
        now.format("%Y%m%d_%H%M%S")
    );
    name.replace(['/', '\\', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_name_shape() {
        let name = generate_file_name(10.0, 20.0, "2024-01-01", "2024-01-05", fixed_now());
        assert_eq!(name, "weather_10_20_2024-01-01_2024-01-05_20240110_120000.json");
    }

    #[test]
    fn test_generated_name_fractional_coordinates() {
        let name = generate_file_name(59.91, -10.75, "2024-01-01", "2024-01-02", fixed_now());
        assert!(name.starts_with("weather_59.91_-10.75_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_generated_name_has_no_path_separators() {
        let name = generate_file_name(1.0, 2.0, "2024/01/01", "2024 01 02", fixed_now());
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_store_response_serialization() {
        let response = StoreResponse {
            status: "ok",
            file: "weather_10_20_2024-01-01_2024-01-05_20240110_120000.json".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"file\":\"weather_10_20_"));
    }
}
