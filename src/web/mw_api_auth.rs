// src/web/mw_api_auth.rs
use crate::{error::SessionRejected, services::sessao_service};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Quando a API responde 401/403 a qualquer chamada, apaga token e utilizador
/// e manda para `/login` (exceto se já estivermos no login).
pub async fn clear_rejected_session(session: Session, request: Request, next: Next) -> Response {
    let na_pagina_de_login = request.uri().path() == "/login";
    let response = next.run(request).await;

    if response.extensions().get::<SessionRejected>().is_none() {
        return response;
    }

    if let Err(e) = sessao_service::clear(&session).await {
        tracing::error!("Falha ao limpar sessão recusada: {:?}", e);
    } else {
        tracing::info!("🚪 Sessão encerrada após recusa da API.");
    }

    if na_pagina_de_login {
        response
    } else {
        Redirect::to("/login").into_response()
    }
}
