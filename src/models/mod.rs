// src/models/mod.rs
pub mod noticia;
pub mod sessao;
pub mod usuario;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Ids da API podem ser GUIDs (texto) ou inteiros; guardamos sempre como texto.
pub(crate) fn de_flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_id(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `null` vira texto vazio.
pub(crate) fn de_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
