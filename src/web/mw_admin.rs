// src/web/mw_admin.rs
use crate::{
    models::sessao::AuthSession,
    web::guard::{self, GuardOutcome},
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Páginas que alteram notícias ou utilizadores exigem `isAdmin`.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match guard::avaliar(request.extensions().get::<AuthSession>(), true) {
        GuardOutcome::Permitir => next.run(request).await,
        GuardOutcome::RedirecionarLogin => Redirect::to("/login").into_response(),
        GuardOutcome::RedirecionarInicio => {
            tracing::warn!("Admin MW: acesso negado a {} (sem isAdmin).", request.uri().path());
            Redirect::to("/").into_response()
        }
    }
}
