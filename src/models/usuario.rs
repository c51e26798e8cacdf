// src/models/usuario.rs
use super::value_to_id;
use serde::Serialize;
use serde_json::Value;

/// Conta de utilizador como exibida nas páginas de administração.
/// A senha nunca é lida da API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Usuario {
    pub id: String,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// Chaves onde a API costuma embrulhar a lista de utilizadores.
const LIST_WRAPPERS: &[&str] = &["items", "data", "result", "value", "usuarios", "users"];

impl Usuario {
    /// Lê um utilizador tolerando os nomes de campo alternativos que a API usa.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let first_str = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| obj.get(*k))
                .find_map(|v| v.as_str().map(str::to_string))
        };

        Some(Self {
            id: obj.get("id").and_then(value_to_id).unwrap_or_default(),
            nome: first_str(&["nome", "name", "usuario"]),
            email: first_str(&["email", "userEmail"]),
            is_admin: ["isAdmin", "admin"].iter().any(|k| obj.get(*k).is_some_and(truthy)),
        })
    }

    pub fn nome_exibicao(&self) -> &str {
        self.nome.as_deref().unwrap_or("—")
    }

    pub fn email_exibicao(&self) -> &str {
        self.email.as_deref().unwrap_or("—")
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Normaliza a resposta de `GET /api/usuarios`: array direto ou o primeiro
/// array encontrado numa das chaves de embrulho; qualquer outra coisa é lista vazia.
pub fn normalize_usuarios(payload: &Value) -> Vec<Usuario> {
    let list = match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_WRAPPERS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array)),
        _ => None,
    };

    list.map(|items| items.iter().filter_map(Usuario::from_value).collect())
        .unwrap_or_default()
}

/// Corpo de `POST /api/usuarios`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub is_admin: bool,
}

/// Corpo de `PUT /api/usuarios`; a senha só segue quando preenchida.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarUsuario {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bare_array() {
        let users = normalize_usuarios(&json!([{"id": 1, "nome": "Ana", "email": "a@x", "isAdmin": true}]));
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "1");
        assert!(users[0].is_admin);
    }

    #[test]
    fn finds_first_wrapped_array() {
        let payload = json!({"total": 2, "data": "nope", "result": [{"id": "g1"}, {"id": "g2"}]});
        let users = normalize_usuarios(&payload);
        assert_eq!(users.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["g1", "g2"]);
    }

    #[test]
    fn unknown_shapes_become_empty() {
        assert!(normalize_usuarios(&json!({"foo": []})).is_empty());
        assert!(normalize_usuarios(&json!("texto")).is_empty());
        assert!(normalize_usuarios(&Value::Null).is_empty());
    }

    #[test]
    fn alternate_field_names() {
        let u = Usuario::from_value(&json!({"id": "x", "name": "Bia", "userEmail": "b@x", "admin": 1})).unwrap();
        assert_eq!(u.nome_exibicao(), "Bia");
        assert_eq!(u.email_exibicao(), "b@x");
        assert!(u.is_admin);

        let u = Usuario::from_value(&json!({"id": "y", "usuario": "Caio"})).unwrap();
        assert_eq!(u.nome_exibicao(), "Caio");
        assert_eq!(u.email_exibicao(), "—");
        assert!(!u.is_admin);
    }

    #[test]
    fn update_skips_blank_password() {
        let body = AtualizarUsuario {
            id: "1".into(),
            nome: "Ana".into(),
            email: "a@x".into(),
            is_admin: false,
            senha: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("senha").is_none());
        assert_eq!(value["isAdmin"], false);
    }
}
