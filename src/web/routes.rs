// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, dashboard_handlers, mw_admin, mw_api_auth, mw_auth, noticias_handlers,
        portal_handlers, usuarios_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/portal/noticias", get(portal_handlers::portal_handler));

    // --- Rotas de Admin ---
    // Exigem login E isAdmin (require_auth é aplicado no router pai)
    let admin_routes = Router::new()
        .route(
            "/noticias/nova",
            get(noticias_handlers::show_create_form).post(noticias_handlers::handle_create),
        )
        .route(
            "/noticias/editar/{id}",
            get(noticias_handlers::show_edit_form).post(noticias_handlers::handle_edit),
        )
        .route("/noticias/{id}/excluir", post(noticias_handlers::handle_delete))
        .route("/usuarios", get(usuarios_handlers::list_usuarios_handler))
        .route(
            "/usuarios/novo",
            get(usuarios_handlers::show_create_form).post(usuarios_handlers::handle_create),
        )
        .route(
            "/usuarios/editar/{id}",
            get(usuarios_handlers::show_edit_form).post(usuarios_handlers::handle_edit),
        )
        .route("/usuarios/{id}/excluir", post(usuarios_handlers::handle_delete))
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/", get(dashboard_handlers::dashboard_handler))
        .route("/noticias", get(noticias_handlers::list_noticias_handler))
        .merge(admin_routes)
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    // --- Router Final ---
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .fallback(dashboard_handlers::not_found_handler)
        // 401/403 da API em qualquer página encerra a sessão
        .layer(middleware::from_fn(mw_api_auth::clear_rejected_session))
        .with_state(app_state)
}
