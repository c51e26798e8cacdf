// src/web/mod.rs
pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod flash;
pub mod guard;
pub mod links;
pub mod mw_admin;
pub mod mw_api_auth;
pub mod mw_auth;
pub mod noticias_handlers;
pub mod portal_handlers;
pub mod routes;
pub mod usuarios_handlers;

use crate::{
    error::AppResult,
    models::sessao::AuthSession,
    state::AppState,
    templates::Layout,
};
use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use tower_cookies::Cookies;

/// Renderiza um template askama como resposta HTML.
pub fn render<T: Template>(template: &T) -> AppResult<Response> {
    let html = template.render()?;
    Ok(Html(html).into_response())
}

/// Cabeçalho comum; consome a mensagem flash pendente.
pub fn layout(state: &AppState, cookies: &Cookies, sessao: &AuthSession, current_path: &str) -> Layout {
    Layout {
        user_name: sessao.user.name.clone(),
        is_admin: sessao.is_admin(),
        current_path: current_path.to_string(),
        flash: flash::take(cookies, &state.cookie_key),
    }
}
