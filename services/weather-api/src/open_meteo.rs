//! Client for the Open-Meteo historical weather archive.

use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use weather_common::{WeatherError, WeatherResult};

/// Daily measurement series requested from the archive.
const DAILY_SERIES: &str =
    "temperature_2m_max,temperature_2m_min,apparent_temperature_max,apparent_temperature_min";

/// Upstream request timeout. No retry on expiry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum upstream error body length echoed into error messages.
const ERROR_BODY_LIMIT: usize = 100;

/// Open-Meteo archive client. One instance is created at startup and
/// shared across requests.
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a client for the given archive base URL.
    pub fn new(base_url: impl Into<String>) -> WeatherResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WeatherError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch daily historical data for one coordinate and date range.
    ///
    /// The provider response is returned verbatim; callers store it
    /// without reshaping.
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
    ) -> WeatherResult<serde_json::Value> {
        info!(
            latitude,
            longitude, start_date, end_date, "Fetching weather data from Open-Meteo"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
                ("daily", DAILY_SERIES.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate(&response.text().await.unwrap_or_default(), ERROR_BODY_LIMIT);
            error!(status = %status, body = %body, "Open-Meteo returned an error status");
            return Err(WeatherError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = response.json().await.map_err(map_transport_error)?;

        info!(days = daily_count(&data), "Fetched weather data");
        Ok(data)
    }
}

fn map_transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        error!("Timeout while fetching weather data from Open-Meteo");
        WeatherError::ProviderTimeout
    } else {
        error!(error = %err, "Failed to fetch weather data from Open-Meteo");
        WeatherError::ProviderTransport(err.to_string())
    }
}

/// Number of days in the provider's time-indexed daily array.
fn daily_count(data: &serde_json::Value) -> usize {
    data.pointer("/daily/time")
        .and_then(|t| t.as_array())
        .map(|a| a.len())
        .unwrap_or(0)
}

/// Truncate on a char boundary so multi-byte bodies cannot split.
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
