// src/services/noticias_service.rs
use crate::{
    api::{client::check_status, ApiClient, ApiError},
    models::noticia::{AtualizarNoticia, EstatisticaDia, Noticia, NoticiasResposta, NovaNoticia},
};
use reqwest::{Method, StatusCode};
use serde::Serialize;

const NOTICIAS: &str = "Noticias";

/// Busca todas as notícias (lista administrativa).
pub async fn list_noticias(api: &ApiClient, token: Option<&str>) -> Result<Vec<Noticia>, ApiError> {
    tracing::debug!("Buscando todas as notícias...");
    let resposta: NoticiasResposta = api.get_json(NOTICIAS, token).await?;
    let noticias = resposta.into_items();
    tracing::debug!("Encontradas {} notícias.", noticias.len());
    Ok(noticias)
}

pub async fn find_noticia(api: &ApiClient, token: Option<&str>, id: &str) -> Result<Noticia, ApiError> {
    tracing::debug!("Buscando notícia {}", id);
    api.get_json(&format!("{NOTICIAS}/{}", urlencoding::encode(id)), token).await
}

pub async fn create_noticia(api: &ApiClient, token: Option<&str>, payload: &NovaNoticia) -> Result<(), ApiError> {
    tracing::info!("Criando notícia '{}' ({})", payload.titulo, payload.categoria);
    api.post_json(NOTICIAS, payload, token).await?;
    tracing::info!("✅ Notícia '{}' criada.", payload.titulo);
    Ok(())
}

/// Atualiza via `PUT /Noticias/{id}`; se a API responder 405, tenta uma vez
/// `PUT /Noticias` (id só no corpo) e devolve esse resultado.
pub async fn update_noticia(
    api: &ApiClient,
    token: Option<&str>,
    id: &str,
    payload: &AtualizarNoticia,
) -> Result<(), ApiError> {
    tracing::info!("Atualizando notícia {}", id);
    let with_id = format!("{NOTICIAS}/{}", urlencoding::encode(id));
    let mut resp = api
        .execute(api.request(Method::PUT, &with_id, token).json(payload))
        .await?;

    if resp.status() == StatusCode::METHOD_NOT_ALLOWED {
        tracing::debug!("PUT {} devolveu 405; tentando sem id na rota.", with_id);
        resp = api
            .execute(api.request(Method::PUT, NOTICIAS, token).json(payload))
            .await?;
    }

    check_status(resp).await?;
    tracing::info!("✅ Notícia {} atualizada.", id);
    Ok(())
}

pub async fn delete_noticia(api: &ApiClient, token: Option<&str>, id: &str) -> Result<(), ApiError> {
    tracing::info!("Excluindo notícia {}", id);
    api.delete(&format!("{NOTICIAS}/{}", urlencoding::encode(id)), token).await
}

pub async fn ultimos_7_dias(api: &ApiClient, token: Option<&str>) -> Result<Vec<EstatisticaDia>, ApiError> {
    api.get_json(&format!("{NOTICIAS}/estatisticas/ultimos7dias"), token).await
}

/// Parâmetros repassados à API na listagem pública.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalQuery {
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub q: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub categoria: String,
}

/// Listagem pública: sem token, aceita array ou `{items, total}`.
pub async fn list_publicas(api: &ApiClient, query: &PortalQuery) -> Result<Vec<Noticia>, ApiError> {
    tracing::debug!("Portal: buscando notícias públicas {:?}", query);
    let resposta: NoticiasResposta = api.get_json_with_query(NOTICIAS, query, None).await?;
    Ok(resposta.into_items())
}
