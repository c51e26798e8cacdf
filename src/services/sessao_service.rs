// src/services/sessao_service.rs
use crate::{
    error::{AppError, AppResult},
    models::sessao::{AuthSession, SessionUser, TOKEN_KEY, USER_KEY},
    services::auth_service,
};
use tower_sessions::Session;

/// Lê `token` + `user` da sessão. Sem token não há sessão.
/// Se houver token mas faltar `user`, reconstrói-o a partir dos claims e grava-o.
pub async fn load(session: &Session) -> AppResult<Option<AuthSession>> {
    let token = session
        .get::<String>(TOKEN_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao ler token: {}", e)))?;

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    // Um `user` ilegível é tratado como ausente.
    let user = session.get::<SessionUser>(USER_KEY).await.unwrap_or_else(|e| {
        tracing::warn!("Utilizador na sessão ilegível, será reconstruído: {}", e);
        None
    });

    let user = match user {
        Some(u) => u,
        None => {
            tracing::debug!("Sessão com token mas sem utilizador; reconstruindo a partir do token.");
            let rebuilt = auth_service::user_from_token(&token);
            session
                .insert(USER_KEY, &rebuilt)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao gravar utilizador: {}", e)))?;
            rebuilt
        }
    };

    Ok(Some(AuthSession { token, user }))
}

/// Grava a sessão após o login, rodando o id para evitar fixação de sessão.
pub async fn persist(session: &Session, auth: &AuthSession) -> AppResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(TOKEN_KEY, &auth.token)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir token: {}", e)))?;
    session
        .insert(USER_KEY, &auth.user)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir utilizador: {}", e)))?;
    Ok(())
}

/// Remove token e utilizador (logout ou token recusado pela API).
pub async fn clear(session: &Session) -> AppResult<()> {
    session
        .flush()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))
}
