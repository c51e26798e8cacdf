// src/web/mw_auth.rs
use crate::{
    error::AppError,
    services::sessao_service,
    web::{
        guard::{self, GuardOutcome},
        links,
    },
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Middleware que verifica se há sessão (token) e a expõe aos handlers
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let sessao = sessao_service::load(&session).await?;

    match guard::avaliar(sessao.as_ref(), false) {
        GuardOutcome::Permitir => {
            if let Some(sessao) = sessao {
                tracing::debug!("Autenticação MW: '{}' autenticado.", sessao.user.email);
                request.extensions_mut().insert(sessao);
            }
            Ok(next.run(request).await)
        }
        _ => {
            tracing::debug!("Autenticação MW: sem token. Redirecionando para /login");
            Ok(Redirect::to(&login_redirect(&request)).into_response())
        }
    }
}

// Guarda o destino original para voltar a ele após o login
fn login_redirect(request: &Request) -> String {
    let destino = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    if destino == "/" {
        "/login".to_string()
    } else {
        links::with_query("/login", &[("redirect", destino.to_string())])
    }
}
