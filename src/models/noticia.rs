// src/models/noticia.rs
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Categorias fixas aceites pela API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Categoria {
    Institucional,
    Saude,
    Educacao,
    Esportes,
    Cultura,
    Policial,
}

impl Categoria {
    pub const ALL: [Categoria; 6] = [
        Categoria::Institucional,
        Categoria::Saude,
        Categoria::Educacao,
        Categoria::Esportes,
        Categoria::Cultura,
        Categoria::Policial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Categoria::Institucional => "Institucional",
            Categoria::Saude => "Saúde",
            Categoria::Educacao => "Educação",
            Categoria::Esportes => "Esportes",
            Categoria::Cultura => "Cultura",
            Categoria::Policial => "Policial",
        }
    }
}

impl fmt::Display for Categoria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Categoria {
    type Err = String;

    // Só o rótulo exato é aceite, como no formulário.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Categoria::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Categoria inválida: '{}'", s))
    }
}

impl Serialize for Categoria {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Notícia tal como vem da API. A categoria fica como texto porque a API
/// pode devolver valores antigos fora da lista fixa.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Noticia {
    #[serde(default, deserialize_with = "super::de_flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::de_opt_string")]
    pub titulo: String,
    #[serde(default, deserialize_with = "super::de_opt_string")]
    pub conteudo: String,
    #[serde(default, deserialize_with = "super::de_opt_string")]
    pub categoria: String,
    #[serde(default)]
    pub caminho_foto: Option<String>,
    #[serde(default)]
    pub criado_em: Option<String>,
    #[serde(default)]
    pub autor: Option<String>,
}

impl Noticia {
    /// Instante de criação em milissegundos; ausente ou inválido conta como 0.
    pub fn criado_em_millis(&self) -> i64 {
        self.criado_em
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }

    /// `dd/MM/yyyy HH:mm` em hora local, ou `-`.
    pub fn criado_em_formatado(&self) -> String {
        self.criado_em
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// `dd de mmm.` para os cartões do portal; vazio quando não há data.
    pub fn criado_em_curto(&self) -> String {
        self.criado_em
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| crate::services::datas::data_curta(&dt))
            .unwrap_or_default()
    }
}

/// Interpreta os formatos de data que a API costuma devolver.
/// Datas sem fuso são tratadas como hora local.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

/// Corpo de `POST /api/Noticias`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaNoticia {
    pub titulo: String,
    pub conteudo: String,
    pub categoria: Categoria,
    pub usuario_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caminho_foto: Option<String>,
}

/// Corpo de `PUT /api/Noticias[/{id}]`. `caminhoFoto` vai como `null` quando vazio.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarNoticia {
    pub id: String,
    pub titulo: String,
    pub conteudo: String,
    pub categoria: Categoria,
    pub caminho_foto: Option<String>,
}

/// Ponto da série `estatisticas/ultimos7dias`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EstatisticaDia {
    pub dia: String,
    #[serde(default)]
    pub total: u32,
}

impl EstatisticaDia {
    /// Só a parte `YYYY-MM-DD` interessa (a API pode mandar `T00:00:00`).
    pub fn data(&self) -> Option<NaiveDate> {
        let prefix = self.dia.get(..10).unwrap_or(&self.dia);
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }
}

/// A listagem pública aceita tanto um array como `{items, total}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoticiasResposta {
    Lista(Vec<Noticia>),
    Pagina {
        #[serde(default)]
        items: Vec<Noticia>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl NoticiasResposta {
    pub fn into_items(self) -> Vec<Noticia> {
        match self {
            NoticiasResposta::Lista(items) => items,
            NoticiasResposta::Pagina { items, .. } => items,
        }
    }
}
