// src/web/dashboard_handlers.rs
use crate::{
    error::AppResult,
    models::sessao::AuthSession,
    services::{dashboard, noticias_service, sessao_service},
    state::AppState,
    templates::{DashboardPage, NotFoundPage},
    web::{
        guard::{self, GuardOutcome},
        layout, render,
    },
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tower_sessions::Session;

// GET /
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
) -> AppResult<Response> {
    tracing::debug!("GET /: painel para {}", sessao.user.email);

    let (barras, erro) = match noticias_service::ultimos_7_dias(&state.api, Some(&sessao.token)).await {
        Ok(estatisticas) => (dashboard::montar_grafico(estatisticas), None),
        Err(e) => (Vec::new(), Some(e.display_or("Falha ao carregar estatísticas de notícias.")?)),
    };

    let page = DashboardPage {
        layout: layout(&state, &cookies, &sessao, "/"),
        total_semana: barras.iter().map(|b| b.total).sum(),
        barras,
        erro,
    };
    render(&page)
}

// Qualquer outro caminho: exige sessão e mostra 404
pub async fn not_found_handler(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
) -> AppResult<Response> {
    let sessao = sessao_service::load(&session).await?;
    match (guard::avaliar(sessao.as_ref(), false), sessao) {
        (GuardOutcome::Permitir, Some(sessao)) => {
            let page = NotFoundPage { layout: layout(&state, &cookies, &sessao, "") };
            let mut response = render(&page)?;
            *response.status_mut() = StatusCode::NOT_FOUND;
            Ok(response)
        }
        _ => Ok(Redirect::to("/login").into_response()),
    }
}
