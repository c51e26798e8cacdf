// src/models/sessao.rs
use serde::{Deserialize, Serialize};

/// Chave da sessão onde fica o token da API.
pub const TOKEN_KEY: &str = "token";
/// Chave da sessão onde fica o utilizador (JSON).
pub const USER_KEY: &str = "user";

/// Utilizador autenticado, derivado da resposta do login e/ou dos claims do token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Option<String>,
    pub role: Option<String>,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Estado completo da sessão: token + utilizador.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: SessionUser,
}

impl AuthSession {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    // Preenchido pelo script do reCAPTCHA v3 quando ativo
    #[serde(default)]
    pub captcha_token: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}
