//! Process configuration, read once at startup from the environment.

use anyhow::{Context, Result};

use storage::{GcsConfig, S3Config, StorageSettings};

/// Default Open-Meteo archive endpoint.
pub const DEFAULT_OPEN_METEO_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Local development frontends.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Immutable process-wide settings. Constructed once during startup and
/// passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageSettings,
    pub cors_origins: Vec<String>,
    pub open_meteo_base_url: String,
}

impl Settings {
    /// Read settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let kind = env_or("STORAGE_BACKEND", "gcs")
            .parse()
            .context("STORAGE_BACKEND must be 'gcs' or 's3'")?;

        let gcs = GcsConfig {
            bucket: env_or("GCS_BUCKET_NAME", ""),
            service_account_path: env_opt("GOOGLE_APPLICATION_CREDENTIALS"),
        };

        let s3 = S3Config {
            bucket: env_or("S3_BUCKET_NAME", ""),
            access_key_id: env_or("AWS_ACCESS_KEY_ID", ""),
            secret_access_key: env_or("AWS_SECRET_ACCESS_KEY", ""),
            region: env_or("AWS_REGION", "us-east-1"),
            endpoint: env_opt("S3_ENDPOINT"),
            allow_http: env_or("S3_ALLOW_HTTP", "false") == "true",
        };

        Ok(Self {
            storage: StorageSettings { kind, gcs, s3 },
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            open_meteo_base_url: env_or("OPEN_METEO_BASE_URL", DEFAULT_OPEN_METEO_URL),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.example, http://b.example"),
            vec!["http://a.example", "http://b.example"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }
}
