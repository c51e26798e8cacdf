// src/services/token_claims.rs
//! Leitura dos claims de um JWT emitido pela API.
//!
//! Só o segmento do payload é descodificado (base64url). A assinatura não é
//! verificada aqui: quem confia no token é a API, que o valida em cada pedido.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};
use uuid::{Uuid, Variant};

const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
const NAMEID_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/nameidentifier";
const NAME_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const EMAIL_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Claims candidatos ao id do utilizador, por ordem de preferência.
const USER_ID_CLAIMS: &[&str] = &[NAMEID_CLAIM, "nameid", "sub", "uid", "userId", "userid", "user_id"];

pub const ADMIN_ROLE: &str = "Admin";

/// Um claim de role pode vir como texto único ou como lista.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleClaim {
    Single(String),
    Many(Vec<String>),
}

impl RoleClaim {
    pub fn is_admin(&self) -> bool {
        match self {
            RoleClaim::Single(r) => r == ADMIN_ROLE,
            RoleClaim::Many(rs) => rs.iter().any(|r| r == ADMIN_ROLE),
        }
    }

    /// Forma textual guardada na sessão.
    pub fn label(&self) -> String {
        match self {
            RoleClaim::Single(r) => r.clone(),
            RoleClaim::Many(rs) => rs.join(","),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims(Map<String, Value>);

impl TokenClaims {
    /// Descodifica o payload; qualquer falha resulta num conjunto vazio.
    pub fn decode(token: &str) -> Self {
        Self::try_decode(token).unwrap_or_default()
    }

    fn try_decode(token: &str) -> Option<Self> {
        let payload = token.split('.').nth(1)?;
        // Aceita também payloads com padding ou no alfabeto base64 padrão.
        let normalized: String = payload
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();
        let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes()).ok()?;
        match serde_json::from_slice::<Value>(&bytes).ok()? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn truthy(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| match v {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    fn first_string(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.truthy(k))
            .find_map(|v| v.as_str().map(str::to_string))
    }

    pub fn role(&self) -> Option<RoleClaim> {
        if let Some(v) = self.truthy(ROLE_CLAIM).or_else(|| self.truthy("role")) {
            return role_from_value(v);
        }
        match self.0.get("roles") {
            Some(Value::Array(items)) => items.first().and_then(|v| v.as_str()).map(|s| RoleClaim::Single(s.to_string())),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|r| r.is_admin())
    }

    /// Primeiro candidato que seja um GUID RFC 4122 (versões 1 a 5) no formato com hífens.
    pub fn user_id(&self) -> Option<String> {
        USER_ID_CLAIMS
            .iter()
            .filter_map(|k| self.truthy(k))
            .filter_map(Value::as_str)
            .find(|s| is_guid(s))
            .map(str::to_string)
    }

    pub fn name(&self) -> Option<String> {
        self.first_string(&[NAME_CLAIM, "unique_name", "name"])
    }

    /// Nome usado no login quando o servidor não manda `usuario`: sem o claim URI.
    pub fn login_name(&self) -> Option<String> {
        self.first_string(&["unique_name", "name"])
    }

    pub fn email(&self) -> Option<String> {
        self.first_string(&[EMAIL_CLAIM, "email"])
    }
}

fn role_from_value(value: &Value) -> Option<RoleClaim> {
    match value {
        Value::String(s) => Some(RoleClaim::Single(s.clone())),
        Value::Array(items) => Some(RoleClaim::Many(
            items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        )),
        _ => None,
    }
}

pub fn is_guid(candidate: &str) -> bool {
    if candidate.len() != 36 {
        return false;
    }
    match Uuid::try_parse(candidate) {
        Ok(uuid) => (1..=5).contains(&uuid.get_version_num()) && uuid.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(payload: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.assinatura")
    }

    #[test]
    fn malformed_tokens_decode_to_empty() {
        assert!(TokenClaims::decode("").is_empty());
        assert!(TokenClaims::decode("semPontos").is_empty());
        assert!(TokenClaims::decode("a.!!!.c").is_empty());
        assert!(TokenClaims::decode(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("[1,2]"))).is_empty());
    }

    #[test]
    fn role_prefers_microsoft_claim_uri() {
        let claims = TokenClaims::decode(&token_with(json!({ROLE_CLAIM: "Admin", "role": "Editor"})));
        assert_eq!(claims.role(), Some(RoleClaim::Single("Admin".into())));
        assert!(claims.is_admin());
    }

    #[test]
    fn role_falls_back_to_roles_array() {
        let claims = TokenClaims::decode(&token_with(json!({"roles": ["Editor", "Admin"]})));
        assert_eq!(claims.role(), Some(RoleClaim::Single("Editor".into())));
        assert!(!claims.is_admin());
    }

    #[test]
    fn role_list_containing_admin_is_admin() {
        let claims = TokenClaims::decode(&token_with(json!({"role": ["Leitor", "Admin"]})));
        assert!(claims.is_admin());
        assert_eq!(claims.role().unwrap().label(), "Leitor,Admin");
    }

    #[test]
    fn user_id_skips_non_guid_candidates() {
        let guid = "3f2b8c1e-4a5d-4e6f-9a7b-1c2d3e4f5a6b";
        let claims = TokenClaims::decode(&token_with(json!({
            "nameid": "42",
            "sub": "joana@prefeitura.gov",
            "uid": guid,
        })));
        assert_eq!(claims.user_id().as_deref(), Some(guid));
    }

    #[test]
    fn user_id_absent_without_guid() {
        let claims = TokenClaims::decode(&token_with(json!({"sub": "123"})));
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn name_and_email_fallbacks() {
        let claims = TokenClaims::decode(&token_with(json!({
            "unique_name": "Joana",
            "name": "Outro",
            EMAIL_CLAIM: "joana@pjf.mg.gov.br",
        })));
        assert_eq!(claims.name().as_deref(), Some("Joana"));
        assert_eq!(claims.email().as_deref(), Some("joana@pjf.mg.gov.br"));
    }

    #[test]
    fn login_name_ignores_uri_claim() {
        let claims = TokenClaims::decode(&token_with(json!({
            NAME_CLAIM: "Nome URI",
            "name": "Joana",
        })));
        assert_eq!(claims.name().as_deref(), Some("Nome URI"));
        assert_eq!(claims.login_name().as_deref(), Some("Joana"));

        let so_uri = TokenClaims::decode(&token_with(json!({ NAME_CLAIM: "Nome URI" })));
        assert_eq!(so_uri.login_name(), None);
    }

    #[test]
    fn accepts_padded_standard_alphabet_payload() {
        use base64::engine::general_purpose::STANDARD;
        let body = STANDARD.encode(json!({"role": "Admin", "name": "Zé?>"}).to_string());
        let claims = TokenClaims::decode(&format!("h.{body}.s"));
        assert!(claims.is_admin());
    }

    #[test]
    fn guid_validation() {
        assert!(is_guid("3f2b8c1e-4a5d-4e6f-9a7b-1c2d3e4f5a6b"));
        assert!(!is_guid("3f2b8c1e4a5d4e6f9a7b1c2d3e4f5a6b"));
        assert!(!is_guid("3f2b8c1e-4a5d-0e6f-9a7b-1c2d3e4f5a6b"));
        assert!(!is_guid("3f2b8c1e-4a5d-4e6f-0a7b-1c2d3e4f5a6b"));
    }
}
