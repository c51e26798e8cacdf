// src/state.rs
use crate::{
    api::ApiClient,
    config::AppConfig,
    error::{AppError, AppResult},
};
use std::sync::Arc;
use tower_cookies::Key;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Arc<AppConfig>,
    // Assina os cookies de mensagens flash
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = ApiClient::new(&config.api_base_url)?;
        let cookie_key = Key::try_from(config.session_secret.as_bytes()).map_err(|e| {
            AppError::Config(format!("SESSION_SECRET precisa de pelo menos 64 bytes: {}", e))
        })?;
        Ok(Self {
            api,
            config: Arc::new(config),
            cookie_key,
        })
    }
}
