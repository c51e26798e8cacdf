// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Response, StatusCode},
    middleware::{self, Next},
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use gerenciador_noticias::{config::AppConfig, state::AppState, web};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;
use tower::{ServiceBuilder, ServiceExt};
use tower_cookies::CookieManagerLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub const SECRET: &str = "segredo-de-testes-com-mais-de-sessenta-e-quatro-bytes-0123456789abcdef";

/// Um pedido recebido pela API falsa.
#[derive(Debug, Clone)]
pub struct Chamada {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

pub type Log = Arc<Mutex<Vec<Chamada>>>;

async fn registrar(State(log): State<Log>, request: Request, next: Next) -> axum::response::Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let request = Request::from_parts(parts, Body::from(bytes.clone()));
    let chamada = Chamada {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    };
    log.lock().unwrap().push(chamada);
    next.run(request).await
}

/// Sobe a API falsa numa porta efémera e devolve a URL base + o registo de chamadas.
pub async fn spawn_api(router: Router) -> (String, Log) {
    let log = Log::default();
    let app = router.layer(middleware::from_fn_with_state(log.clone(), registrar));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), log)
}

/// Última chamada feita com `method` a `path`.
pub fn chamada(log: &Log, method: &str, path: &str) -> Option<Chamada> {
    log.lock()
        .unwrap()
        .iter()
        .rev()
        .find(|c| c.method == method && c.path == path)
        .cloned()
}

pub fn paths(log: &Log) -> Vec<String> {
    log.lock().unwrap().iter().map(|c| format!("{} {}", c.method, c.path)).collect()
}

/// JWT sem assinatura válida, só com o payload que interessa.
pub fn jwt(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.assinatura")
}

/// A aplicação completa, com sessões em memória, apontada para a API falsa.
pub fn app(api_base: &str) -> Router {
    let state = AppState::new(AppConfig::for_api(api_base, SECRET)).unwrap();
    web::routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(CookieManagerLayer::new())
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false)),
    )
}

/// Cliente mínimo que guarda cookies entre pedidos.
pub struct Navegador {
    app: Router,
    jar: HashMap<String, String>,
}

impl Navegador {
    pub fn new(app: Router) -> Self {
        Self { app, jar: HashMap::new() }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.builder("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = self
            .builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.jar.contains_key(name)
    }

    fn builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if !self.jar.is_empty() {
            let cookie = self
                .jar
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: axum::http::Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();
        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let par = raw.split(';').next().unwrap_or_default();
            let Some((nome, valor)) = par.split_once('=') else { continue };
            let expirado = raw.to_ascii_lowercase().contains("max-age=0");
            if valor.is_empty() || expirado {
                self.jar.remove(nome.trim());
            } else {
                self.jar.insert(nome.trim().to_string(), valor.to_string());
            }
        }
        response
    }
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn is_redirect(response: &Response<Body>) -> bool {
    response.status().is_redirection()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn status_ok(response: &Response<Body>) -> bool {
    response.status() == StatusCode::OK
}
