// src/services/auth_service.rs
use crate::{
    api::{client::error_message, ApiClient, ApiError},
    models::{
        sessao::{AuthSession, SessionUser},
        value_to_id,
    },
    services::token_claims::{TokenClaims, ADMIN_ROLE},
};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caminhos de login tentados por ordem (relativos a `/api`).
pub const LOGIN_ENDPOINTS: &[&str] = &["Auth/login", "auth/login", "login", "Login", "api/login"];

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    senha: &'a str,
    #[serde(rename = "captchaToken", skip_serializing_if = "Option::is_none")]
    captcha_token: Option<&'a str>,
}

/// Resposta esperada: `{ token, usuario, email, role?, usuarioId? }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub usuario: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default)]
    pub usuario_id: Option<Value>,
}

/// Envia as credenciais, percorrendo os endpoints candidatos.
/// 404/405 e falhas de rede passam ao próximo; 400/401 e outros erros param logo.
pub async fn login_request(
    api: &ApiClient,
    email: &str,
    senha: &str,
    captcha_token: Option<&str>,
) -> Result<LoginResponse, ApiError> {
    let payload = LoginPayload { email, senha, captcha_token };
    let mut last_error: Option<ApiError> = None;

    for endpoint in LOGIN_ENDPOINTS {
        tracing::debug!("Login: tentando endpoint '{}'", endpoint);
        let builder = api.request(Method::POST, endpoint, None).json(&payload);
        let resp = match api.execute(builder).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Login: falha de rede em '{}': {}", endpoint, e);
                last_error = Some(e);
                continue;
            }
        };

        let status = resp.status();
        if status.is_success() {
            tracing::debug!("Login: endpoint '{}' respondeu {}", endpoint, status);
            return crate::api::client::decode_json(resp).await;
        }

        let message = error_message(resp).await;
        let error = ApiError::Status { status, message };
        if status == StatusCode::NOT_FOUND || status == StatusCode::METHOD_NOT_ALLOWED {
            tracing::debug!("Login: endpoint '{}' indisponível ({}), tentando o próximo", endpoint, status);
            last_error = Some(error);
            continue;
        }
        return Err(error);
    }

    Err(last_error.unwrap_or_else(|| ApiError::Status {
        status: StatusCode::NOT_FOUND,
        message: "Não foi possível acessar o endpoint de login.".to_string(),
    }))
}

/// Combina os campos do servidor com os claims do token, preferindo o servidor.
pub fn build_session_user(resp: &LoginResponse, typed_email: &str) -> SessionUser {
    let claims = TokenClaims::decode(&resp.token);
    let server_role = resp.role.as_ref().and_then(Value::as_str);

    let id = resp
        .usuario_id
        .as_ref()
        .and_then(value_to_id)
        .or_else(|| claims.user_id());

    let role = server_role
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .or_else(|| claims.role().map(|r| r.label()));

    let is_admin = match server_role {
        Some(r) => r == ADMIN_ROLE,
        None => claims.is_admin(),
    };

    SessionUser {
        id,
        role,
        name: resp
            .usuario
            .clone()
            .or_else(|| claims.login_name())
            .unwrap_or_else(|| typed_email.to_string()),
        email: resp.email.clone().unwrap_or_else(|| typed_email.to_string()),
        is_admin,
    }
}

/// Reconstrói o utilizador só a partir do token (sessão com token mas sem `user`).
pub fn user_from_token(token: &str) -> SessionUser {
    let claims = TokenClaims::decode(token);
    SessionUser {
        id: claims.user_id(),
        role: claims.role().map(|r| r.label()),
        name: claims.name().unwrap_or_else(|| "Usuário".to_string()),
        email: claims.email().unwrap_or_default(),
        is_admin: claims.is_admin(),
    }
}

/// Login completo: pedido + derivação do utilizador.
pub async fn login(
    api: &ApiClient,
    email: &str,
    senha: &str,
    captcha_token: Option<&str>,
) -> Result<AuthSession, ApiError> {
    tracing::info!("Tentativa de login para: {}", email);
    let resp = login_request(api, email, senha, captcha_token).await?;
    if resp.token.is_empty() {
        return Err(ApiError::Decode("resposta de login sem token".to_string()));
    }
    let user = build_session_user(&resp, email);
    tracing::info!("✅ Login aceite para {} (admin: {})", user.email, user.is_admin);
    Ok(AuthSession { token: resp.token, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use serde_json::json;

    fn token_with(payload: Value) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes()))
    }

    fn response(token: String, role: Option<Value>) -> LoginResponse {
        LoginResponse { token, usuario: None, email: None, role, usuario_id: None }
    }

    #[test]
    fn server_role_string_wins_over_claims() {
        let token = token_with(json!({"role": "Admin"}));
        let user = build_session_user(&response(token, Some(json!("Editor"))), "a@b");
        assert!(!user.is_admin);
        assert_eq!(user.role.as_deref(), Some("Editor"));
    }

    #[test]
    fn claims_decide_when_server_omits_role() {
        let guid = "0b9e8f5c-2a1d-4c3b-8e7f-6a5b4c3d2e1f";
        let token = token_with(json!({"role": "Admin", "nameid": guid, "unique_name": "Joana"}));
        let user = build_session_user(&response(token, None), "joana@pjf");
        assert!(user.is_admin);
        assert_eq!(user.id.as_deref(), Some(guid));
        assert_eq!(user.name, "Joana");
        assert_eq!(user.email, "joana@pjf");
    }

    #[test]
    fn login_name_skips_uri_claim_and_falls_back_to_typed_email() {
        let uri = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
        let token = token_with(json!({ uri: "Nome URI", "name": "Joana" }));
        assert_eq!(build_session_user(&response(token, None), "j@pjf").name, "Joana");

        let token = token_with(json!({ uri: "Nome URI" }));
        assert_eq!(build_session_user(&response(token, None), "j@pjf").name, "j@pjf");
    }

    #[test]
    fn server_fields_preferred() {
        let token = token_with(json!({"unique_name": "Do token", "email": "token@x"}));
        let resp = LoginResponse {
            token,
            usuario: Some("Do servidor".into()),
            email: Some("servidor@x".into()),
            role: None,
            usuario_id: Some(json!(17)),
        };
        let user = build_session_user(&resp, "digitado@x");
        assert_eq!(user.name, "Do servidor");
        assert_eq!(user.email, "servidor@x");
        assert_eq!(user.id.as_deref(), Some("17"));
    }

    #[test]
    fn name_falls_back_to_typed_email() {
        let user = build_session_user(&response("sem.claims".into(), None), "x@y");
        assert_eq!(user.name, "x@y");
        assert!(!user.is_admin);
    }

    #[test]
    fn rebuilt_user_defaults() {
        let user = user_from_token("invalido");
        assert_eq!(user.name, "Usuário");
        assert_eq!(user.email, "");
        assert_eq!(user.id, None);
    }
}
