//! Shared application state.

use std::sync::Arc;

use anyhow::Result;

use storage::{make_backend, StorageBackend};

use crate::config::Settings;
use crate::open_meteo::OpenMeteoClient;

/// State shared by every request: the storage backend handle and the
/// upstream weather client, both created once at startup.
pub struct AppState {
    pub storage: Arc<dyn StorageBackend>,
    pub weather: OpenMeteoClient,
}

impl AppState {
    /// Build the process-wide state from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let storage = make_backend(&settings.storage)?;
        let weather = OpenMeteoClient::new(settings.open_meteo_base_url.clone())?;
        Ok(Self { storage, weather })
    }
}
