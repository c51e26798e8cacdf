// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

/// Host usado quando `API_BASE_URL` não está definida.
pub const DEFAULT_API_BASE_URL: &str = "https://cnx-app-cadu-gev.azurewebsites.net";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sessoes.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Intervalo (segundos) da rotação automática do destaque no portal público.
pub const HERO_ROTATION_SECS: u64 = 3;

/// Configuração da aplicação, lida do ambiente (e de `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub recaptcha_site_key: Option<String>,
    pub session_secret: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = non_empty_var("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let recaptcha_site_key = non_empty_var("RECAPTCHA_SITE_KEY");
        let session_secret = env::var("SESSION_SECRET")?;
        let database_url = non_empty_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido ('{}'): {}", bind_raw, e)))?;

        if recaptcha_site_key.is_none() {
            tracing::info!("reCAPTCHA desativado (RECAPTCHA_SITE_KEY não definida).");
        }

        Ok(Self {
            api_base_url,
            recaptcha_site_key,
            session_secret,
            database_url,
            bind_addr,
        })
    }

    /// Configuração mínima para testes e ferramentas: sem reCAPTCHA, store em memória.
    pub fn for_api(api_base_url: &str, session_secret: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            recaptcha_site_key: None,
            session_secret: session_secret.to_string(),
            database_url: "sqlite::memory:".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}

// Variáveis definidas mas vazias contam como ausentes.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
