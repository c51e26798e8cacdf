// src/web/usuarios_handlers.rs
use crate::{
    error::AppResult,
    models::{
        sessao::AuthSession,
        usuario::{AtualizarUsuario, NovoUsuario},
    },
    services::usuarios_service,
    state::AppState,
    templates::{UsuarioFormPage, UsuarioLinha, UsuariosListPage},
    web::{flash, layout, render},
};
use axum::{
    extract::{Extension, Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

#[derive(Debug, Default, Deserialize)]
pub struct UsuarioForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    // Checkbox: só vem no corpo quando marcada
    #[serde(default)]
    pub is_admin: Option<String>,
}

impl UsuarioForm {
    fn is_admin(&self) -> bool {
        self.is_admin
            .as_deref()
            .is_some_and(|v| matches!(v, "true" | "on" | "1"))
    }
}

// GET /usuarios
pub async fn list_usuarios_handler(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
) -> AppResult<Response> {
    let (usuarios, erro) = match usuarios_service::find_all_users(&state.api, Some(&sessao.token)).await {
        Ok(u) if u.is_empty() => (u, Some("Nenhum usuário retornado pela API.".to_string())),
        Ok(u) => (u, None),
        Err(e) => (Vec::new(), Some(e.display_or("Falha ao carregar usuários.")?)),
    };

    let linhas = usuarios
        .iter()
        .map(|u| {
            let id = urlencoding::encode(&u.id);
            UsuarioLinha {
                nome: u.nome_exibicao().to_string(),
                email: u.email_exibicao().to_string(),
                admin: if u.is_admin { "Sim" } else { "Não" },
                editar_href: format!("/usuarios/editar/{id}"),
                excluir_action: format!("/usuarios/{id}/excluir"),
            }
        })
        .collect();

    let page = UsuariosListPage {
        layout: layout(&state, &cookies, &sessao, "/usuarios"),
        linhas,
        erro,
    };
    render(&page)
}

#[allow(clippy::too_many_arguments)]
fn form_page(
    state: &AppState,
    cookies: &Cookies,
    sessao: &AuthSession,
    titulo_pagina: &str,
    action: String,
    form: &UsuarioForm,
    senha_obrigatoria: bool,
    erro: Option<String>,
) -> UsuarioFormPage {
    UsuarioFormPage {
        layout: layout(state, cookies, sessao, "/usuarios"),
        titulo_pagina: titulo_pagina.to_string(),
        action,
        nome: form.nome.clone(),
        email: form.email.clone(),
        is_admin: form.is_admin(),
        senha_obrigatoria,
        erro,
    }
}

// GET /usuarios/novo
pub async fn show_create_form(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
) -> AppResult<Response> {
    let form = UsuarioForm::default();
    let page = form_page(&state, &cookies, &sessao, "Novo usuário", "/usuarios/novo".to_string(), &form, true, None);
    render(&page)
}

// POST /usuarios/novo
pub async fn handle_create(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Form(form): Form<UsuarioForm>,
) -> AppResult<Response> {
    let novo = NovoUsuario {
        nome: form.nome.trim().to_string(),
        email: form.email.trim().to_string(),
        senha: form.senha.clone(),
        is_admin: form.is_admin(),
    };

    match usuarios_service::create_user(&state.api, Some(&sessao.token), &novo).await {
        Ok(()) => {
            flash::set(&cookies, &state.cookie_key, "Usuário criado com sucesso.");
            Ok(Redirect::to("/usuarios").into_response())
        }
        Err(e) => {
            let erro = e.display_or("Erro ao criar usuário.")?;
            let page = form_page(&state, &cookies, &sessao, "Novo usuário", "/usuarios/novo".to_string(), &form, true, Some(erro));
            render(&page)
        }
    }
}

// GET /usuarios/editar/{id}
pub async fn show_edit_form(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let action = format!("/usuarios/editar/{}", urlencoding::encode(&id));
    let (form, erro) = match usuarios_service::find_user_by_id(&state.api, Some(&sessao.token), &id).await {
        Ok(u) => (
            UsuarioForm {
                nome: u.nome.unwrap_or_default(),
                email: u.email.unwrap_or_default(),
                senha: String::new(),
                is_admin: u.is_admin.then(|| "true".to_string()),
            },
            None,
        ),
        Err(e) => (UsuarioForm::default(), Some(e.display_or("Falha ao carregar usuário.")?)),
    };
    let page = form_page(&state, &cookies, &sessao, "Editar usuário", action, &form, false, erro);
    render(&page)
}

// POST /usuarios/editar/{id}
pub async fn handle_edit(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
    Form(form): Form<UsuarioForm>,
) -> AppResult<Response> {
    let dados = AtualizarUsuario {
        id: id.clone(),
        nome: form.nome.trim().to_string(),
        email: form.email.trim().to_string(),
        is_admin: form.is_admin(),
        // Senha só vai quando preenchida
        senha: Some(form.senha.clone()).filter(|s| !s.is_empty()),
    };

    match usuarios_service::update_user(&state.api, Some(&sessao.token), &dados).await {
        Ok(()) => {
            flash::set(&cookies, &state.cookie_key, "Usuário atualizado com sucesso.");
            Ok(Redirect::to("/usuarios").into_response())
        }
        Err(e) => {
            let erro = e.display_or("Erro ao atualizar usuário.")?;
            let action = format!("/usuarios/editar/{}", urlencoding::encode(&id));
            let page = form_page(&state, &cookies, &sessao, "Editar usuário", action, &form, false, Some(erro));
            render(&page)
        }
    }
}

// POST /usuarios/{id}/excluir
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let mensagem = match usuarios_service::delete_user(&state.api, Some(&sessao.token), &id).await {
        Ok(()) => "Usuário excluído com sucesso.".to_string(),
        Err(e) => e.display_or("Erro ao excluir usuário.")?,
    };
    flash::set(&cookies, &state.cookie_key, &mensagem);
    Ok(Redirect::to("/usuarios").into_response())
}
