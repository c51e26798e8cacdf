// src/services/usuarios_service.rs
use crate::{
    api::{ApiClient, ApiError},
    models::usuario::{normalize_usuarios, AtualizarUsuario, NovoUsuario, Usuario},
};
use serde_json::Value;

const USUARIOS: &str = "usuarios";

/// Busca todos os utilizadores, normalizando o formato da resposta.
pub async fn find_all_users(api: &ApiClient, token: Option<&str>) -> Result<Vec<Usuario>, ApiError> {
    tracing::debug!("Buscando todos os utilizadores...");
    let payload: Value = api.get_json(USUARIOS, token).await?;
    let users = normalize_usuarios(&payload);
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

pub async fn find_user_by_id(api: &ApiClient, token: Option<&str>, id: &str) -> Result<Usuario, ApiError> {
    tracing::debug!("Buscando utilizador por ID: {}", id);
    let payload: Value = api
        .get_json(&format!("{USUARIOS}/{}", urlencoding::encode(id)), token)
        .await?;
    Usuario::from_value(&payload).ok_or_else(|| ApiError::Decode(format!("utilizador '{}' em formato inesperado", id)))
}

pub async fn create_user(api: &ApiClient, token: Option<&str>, novo: &NovoUsuario) -> Result<(), ApiError> {
    tracing::info!("Tentando criar utilizador: {}", novo.email);
    api.post_json(USUARIOS, novo, token).await?;
    tracing::info!("✅ Utilizador '{}' criado com sucesso.", novo.email);
    Ok(())
}

/// `PUT /api/usuarios` com o id no corpo (a rota não leva id).
pub async fn update_user(api: &ApiClient, token: Option<&str>, dados: &AtualizarUsuario) -> Result<(), ApiError> {
    tracing::info!("Atualizando dados para user: {}", dados.id);
    api.put_json(USUARIOS, dados, token).await?;
    tracing::info!("✅ Dados atualizados com sucesso para user: {}", dados.id);
    Ok(())
}

pub async fn delete_user(api: &ApiClient, token: Option<&str>, id: &str) -> Result<(), ApiError> {
    tracing::info!("Excluindo utilizador {}", id);
    api.delete(&format!("{USUARIOS}/{}", urlencoding::encode(id)), token).await
}
