// src/api/client.rs
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Prefixo comum a todos os endpoints da API REST.
const API_PREFIX: &str = "api";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Erro de rede ao comunicar com a API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL base da API inválida: {0}")]
    InvalidBaseUrl(String),

    /// 401/403: o servidor recusou o token da sessão.
    #[error("Sessão recusada pela API ({0})")]
    Rejected(StatusCode),

    #[error("API respondeu {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Resposta inválida da API: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected(s) => Some(*s),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected(_))
    }

    /// Converte o erro numa mensagem para a página, com texto fixo.
    /// Rejeições de sessão não são exibidas: voltam como `Err` para encerrar a sessão.
    pub fn display_or(self, fallback: &str) -> Result<String, ApiError> {
        if self.is_rejection() {
            return Err(self);
        }
        tracing::warn!("Falha na API: {}", self);
        Ok(fallback.to_string())
    }

    /// Como `display_or`, mas prefere a mensagem enviada pelo servidor quando existe.
    pub fn server_message_or(self, fallback: &str) -> Result<String, ApiError> {
        match self {
            ApiError::Status { message, status } if !message.trim().is_empty() => {
                tracing::warn!("Falha na API ({}): {}", status, message);
                Ok(message)
            }
            other => other.display_or(fallback),
        }
    }
}

/// Remove barras finais e um eventual sufixo `/api`, deixando apenas o host.
pub fn normalize_base_url(raw: &str) -> String {
    let mut base = raw.trim().trim_end_matches('/').to_string();
    if base.to_ascii_lowercase().ends_with("/api") {
        base.truncate(base.len() - 4);
        base = base.trim_end_matches('/').to_string();
    }
    base
}

/// Cliente da API REST externa. Barato de clonar (o `reqwest::Client` é um Arc).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url);
        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        tracing::info!("Cliente da API configurado para {}", base_url);
        Ok(Self { http, base_url })
    }

    /// Host da API, sem barra final.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, path.trim_start_matches('/'))
    }

    /// Monta um pedido, anexando `Authorization: Bearer` quando há token.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(path));
        match token {
            Some(t) if !t.is_empty() => builder.bearer_auth(t),
            _ => builder,
        }
    }

    /// Envia sem interpretar o status (usado pelo login, que decide caso a caso).
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        Ok(builder.send().await?)
    }

    /// Envia e classifica o status: 401/403 viram `Rejected`, outros não-2xx viram `Status`.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = self.execute(builder).await?;
        check_status(resp).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError> {
        let resp = self.send(self.request(Method::GET, path, token)).await?;
        decode_json(resp).await
    }

    /// GET com query string, para a listagem pública.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q, token: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self.send(self.request(Method::GET, path, token).query(query)).await?;
        decode_json(resp).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B, token: Option<&str>) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path, token).json(body)).await?;
        Ok(())
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B, token: Option<&str>) -> Result<(), ApiError> {
        self.send(self.request(Method::PUT, path, token).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path, token)).await?;
        Ok(())
    }
}

pub async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!("API recusou a sessão: {} em {}", status, resp.url());
        return Err(ApiError::Rejected(status));
    }
    let message = error_message(resp).await;
    Err(ApiError::Status { status, message })
}

/// Extrai a mensagem de erro do corpo: campo `message`/`mensagem` em JSON, ou o texto cru.
pub async fn error_message(resp: Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["message", "mensagem", "title"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    body.trim().to_string()
}

pub async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_api_suffix() {
        assert_eq!(normalize_base_url("https://host.example/"), "https://host.example");
        assert_eq!(normalize_base_url("https://host.example///"), "https://host.example");
        assert_eq!(normalize_base_url("https://host.example/api/"), "https://host.example");
        assert_eq!(normalize_base_url("https://host.example/API"), "https://host.example");
        assert_eq!(normalize_base_url("http://localhost:5000"), "http://localhost:5000");
    }

    #[test]
    fn endpoint_joins_under_api_prefix() {
        let api = ApiClient::new("https://host.example/api/").unwrap();
        assert_eq!(api.endpoint("Noticias"), "https://host.example/api/Noticias");
        assert_eq!(api.endpoint("/usuarios/7"), "https://host.example/api/usuarios/7");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(ApiError::InvalidBaseUrl(_))));
        assert!(matches!(ApiClient::new("ftp://host"), Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn rejection_is_never_displayed() {
        let err = ApiError::Rejected(StatusCode::FORBIDDEN);
        assert!(err.display_or("x").is_err());

        let err = ApiError::Status { status: StatusCode::BAD_REQUEST, message: "Título obrigatório".into() };
        assert_eq!(err.server_message_or("Falha").unwrap(), "Título obrigatório");

        let err = ApiError::Status { status: StatusCode::BAD_REQUEST, message: " ".into() };
        assert_eq!(err.server_message_or("Falha").unwrap(), "Falha");
    }
}
