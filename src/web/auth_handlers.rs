// src/web/auth_handlers.rs
use crate::{
    api::ApiError,
    error::AppResult,
    models::sessao::LoginForm,
    services::{auth_service, sessao_service},
    state::AppState,
    templates::LoginPage,
    web::{links, render},
};
use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

const CAPTCHA_INDISPONIVEL: &str =
    "Não foi possível validar o reCAPTCHA. Atualize a página e tente novamente.";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

fn login_page(state: &AppState, error: Option<String>, email: String, redirect: String) -> LoginPage {
    LoginPage {
        error,
        email,
        redirect,
        recaptcha_site_key: state.config.recaptcha_site_key.clone(),
    }
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> AppResult<Response> {
    if sessao_service::load(&session).await?.is_some() {
        tracing::debug!("GET /login: utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }

    let redirect = links::safe_redirect(query.redirect.as_deref());
    render(&login_page(&state, None, String::new(), redirect))
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim().to_string();
    let redirect = links::safe_redirect(form.redirect.as_deref());

    if email.is_empty() || form.senha.is_empty() {
        let page = login_page(&state, Some("Informe e-mail e senha.".to_string()), email, redirect);
        return render(&page);
    }

    let captcha_token = form.captcha_token.as_deref().map(str::trim).filter(|t| !t.is_empty());
    if state.config.recaptcha_site_key.is_some() && captcha_token.is_none() {
        tracing::warn!("Login sem token reCAPTCHA para: {}", email);
        let page = login_page(&state, Some(CAPTCHA_INDISPONIVEL.to_string()), email, redirect);
        return render(&page);
    }

    match auth_service::login(&state.api, &email, &form.senha, captcha_token).await {
        Ok(auth) => {
            sessao_service::persist(&session, &auth).await?;
            tracing::info!("✅ Login bem-sucedido para: {}", auth.user.email);
            Ok(Redirect::to(&redirect).into_response())
        }
        Err(e) => {
            tracing::warn!("Login falhou para {}: {}", email, e);
            let page = login_page(&state, Some(login_error_message(e)), email, redirect);
            render(&page)
        }
    }
}

fn login_error_message(error: ApiError) -> String {
    match error {
        ApiError::Status { message, .. } if !message.trim().is_empty() => message,
        ApiError::Transport(_) => "Não foi possível comunicar com o servidor. Tente novamente.".to_string(),
        _ => "Falha no login".to_string(),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let email = sessao_service::load(&session)
        .await
        .ok()
        .flatten()
        .map(|s| s.user.email);

    sessao_service::clear(&session).await?;

    match email {
        Some(e) => tracing::info!("🚪 Utilizador '{}' desligado.", e),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }

    Ok(Redirect::to("/login"))
}
