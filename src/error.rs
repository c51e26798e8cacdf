// src/error.rs
use crate::api::ApiError;
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na API: {0}")]
    Api(#[from] ApiError),

    #[error("Erro na base de dados de sessões: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar página: {0}")]
    Render(#[from] askama::Error),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

/// Marca uma resposta cuja causa foi 401/403 da API.
/// O middleware `mw_api_auth` troca-a por limpeza da sessão + redirecionamento.
#[derive(Clone, Copy, Debug)]
pub struct SessionRejected;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if let AppError::Api(ApiError::Rejected(status)) = &self {
            tracing::warn!("API recusou o token ({}); sessão será encerrada.", status);
            let mut response = (StatusCode::UNAUTHORIZED, "Sessão expirada.").into_response();
            response.extensions_mut().insert(SessionRejected);
            return response;
        }

        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::Api(ApiError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, "Não foi possível comunicar com o servidor de dados.")
            }
            AppError::Api(_) => (StatusCode::BAD_GATEWAY, "O servidor de dados devolveu um erro."),
            AppError::SqlxError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder às sessões."),
            AppError::EnvVarError(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::SessionError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão."),
            AppError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao montar a página."),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html lang="pt-BR"><head><meta charset="utf-8"><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
