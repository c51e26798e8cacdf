// tests/api_client.rs
mod common;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use common::{jwt, paths, spawn_api};
use gerenciador_noticias::{
    api::{ApiClient, ApiError},
    models::noticia::{AtualizarNoticia, Categoria},
    services::{
        auth_service,
        noticias_service::{self, PortalQuery},
        usuarios_service,
    },
};
use serde_json::json;

fn atualizacao() -> AtualizarNoticia {
    AtualizarNoticia {
        id: "7".into(),
        titulo: "Obras na avenida".into(),
        conteudo: "Texto".into(),
        categoria: Categoria::Institucional,
        caminho_foto: None,
    }
}

#[tokio::test]
async fn bearer_token_is_attached_only_with_session() {
    let stub = Router::new().route("/api/Noticias", get(|| async { Json(json!([])) }));
    let (base, log) = spawn_api(stub).await;
    let api = ApiClient::new(&format!("{base}/api/")).unwrap();

    noticias_service::list_noticias(&api, Some("abc.def.ghi")).await.unwrap();
    let query = PortalQuery { page: 2, page_size: 12, q: String::new(), categoria: "Saúde".into() };
    noticias_service::list_publicas(&api, &query).await.unwrap();

    let chamadas = log.lock().unwrap().clone();
    assert_eq!(chamadas.len(), 2);
    assert_eq!(chamadas[0].authorization.as_deref(), Some("Bearer abc.def.ghi"));
    assert_eq!(chamadas[1].authorization, None);
    let q = chamadas[1].query.clone().unwrap();
    assert!(q.contains("page=2"));
    assert!(q.contains("pageSize=12"));
    assert!(q.contains("categoria=Sa%C3%BAde"));
    assert!(!q.contains("q="));
}

#[tokio::test]
async fn login_tries_next_endpoint_on_404_and_405() {
    let token = jwt(json!({
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin",
        "sub": "3f2504e0-4f89-41d3-9a0c-0305e82c3301",
    }));
    let resposta = json!({ "token": token, "usuario": "Ana", "email": "ana@pjf.example" });
    let stub = Router::new()
        // Só GET: um POST aqui devolve 405
        .route("/api/auth/login", get(|| async { StatusCode::OK }))
        .route("/api/login", post(move || async move { Json(resposta) }));
    let (base, log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    let sessao = auth_service::login(&api, "ana@pjf.example", "segredo", None).await.unwrap();

    assert_eq!(
        paths(&log),
        vec!["POST /api/Auth/login", "POST /api/auth/login", "POST /api/login"]
    );
    assert_eq!(sessao.user.name, "Ana");
    assert!(sessao.user.is_admin);
    assert_eq!(sessao.user.id.as_deref(), Some("3f2504e0-4f89-41d3-9a0c-0305e82c3301"));
}

#[tokio::test]
async fn login_stops_on_401_with_server_message() {
    let stub = Router::new().route(
        "/api/Auth/login",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Credenciais inválidas" }))) }),
    );
    let (base, log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    let erro = auth_service::login(&api, "x@y", "errada", Some("captcha")).await.unwrap_err();

    assert_eq!(paths(&log), vec!["POST /api/Auth/login"]);
    match erro {
        ApiError::Status { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Credenciais inválidas");
        }
        other => panic!("erro inesperado: {other:?}"),
    }
}

#[tokio::test]
async fn login_returns_last_error_when_every_endpoint_is_missing() {
    let (base, log) = spawn_api(Router::new()).await;
    let api = ApiClient::new(&base).unwrap();

    let erro = auth_service::login(&api, "x@y", "s", None).await.unwrap_err();

    assert_eq!(log.lock().unwrap().len(), auth_service::LOGIN_ENDPOINTS.len());
    assert_eq!(erro.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn update_retries_without_id_on_405() {
    let stub = Router::new()
        .route("/api/Noticias/{id}", get(|| async { StatusCode::OK }))
        .route("/api/Noticias", put(|| async { StatusCode::NO_CONTENT }));
    let (base, log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    noticias_service::update_noticia(&api, Some("t"), "7", &atualizacao()).await.unwrap();

    assert_eq!(paths(&log), vec!["PUT /api/Noticias/7", "PUT /api/Noticias"]);
}

#[tokio::test]
async fn update_surfaces_result_of_retry() {
    let stub = Router::new()
        .route("/api/Noticias/{id}", get(|| async { StatusCode::OK }))
        .route(
            "/api/Noticias",
            put(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "mensagem": "Título obrigatório" }))) }),
        );
    let (base, _log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    let erro = noticias_service::update_noticia(&api, Some("t"), "7", &atualizacao()).await.unwrap_err();
    assert_eq!(erro.server_message_or("fallback").unwrap(), "Título obrigatório");
}

#[tokio::test]
async fn update_does_not_retry_on_success() {
    let stub = Router::new().route("/api/Noticias/{id}", put(|| async { StatusCode::OK }));
    let (base, log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    noticias_service::update_noticia(&api, Some("t"), "7", &atualizacao()).await.unwrap();
    assert_eq!(paths(&log), vec!["PUT /api/Noticias/7"]);
}

#[tokio::test]
async fn forbidden_is_a_session_rejection() {
    let stub = Router::new().route("/api/usuarios", get(|| async { StatusCode::FORBIDDEN }));
    let (base, _log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    let erro = usuarios_service::find_all_users(&api, Some("t")).await.unwrap_err();
    assert!(erro.is_rejection());
    // Rejeições nunca viram mensagem na página
    assert!(erro.display_or("x").is_err());
}

#[tokio::test]
async fn user_list_is_unwrapped() {
    let stub = Router::new().route(
        "/api/usuarios",
        get(|| async { Json(json!({ "data": [{ "id": 1, "name": "Bia", "userEmail": "bia@pjf.example", "admin": 1 }] })) }),
    );
    let (base, _log) = spawn_api(stub).await;
    let api = ApiClient::new(&base).unwrap();

    let usuarios = usuarios_service::find_all_users(&api, Some("t")).await.unwrap();
    assert_eq!(usuarios.len(), 1);
    assert_eq!(usuarios[0].id, "1");
    assert_eq!(usuarios[0].nome_exibicao(), "Bia");
    assert!(usuarios[0].is_admin);
}
