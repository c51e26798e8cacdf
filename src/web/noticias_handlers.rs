// src/web/noticias_handlers.rs
use crate::{
    error::AppResult,
    models::{
        noticia::{AtualizarNoticia, Categoria, Noticia, NovaNoticia},
        sessao::AuthSession,
    },
    services::{listing, noticias_service, token_claims::TokenClaims},
    state::AppState,
    templates::{NoticiaFormPage, NoticiaLinha, NoticiasListPage, SelectOption},
    web::{flash, layout, links, render},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub q: Option<String>,
    pub categoria: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticiaForm {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub conteudo: String,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub caminho_foto: String,
}

impl NoticiaForm {
    fn from_noticia(n: &Noticia) -> Self {
        Self {
            titulo: n.titulo.clone(),
            conteudo: n.conteudo.clone(),
            categoria: n.categoria.clone(),
            caminho_foto: n.caminho_foto.clone().unwrap_or_default(),
        }
    }

    fn caminho_foto(&self) -> Option<String> {
        Some(self.caminho_foto.trim().to_string()).filter(|c| !c.is_empty())
    }

    /// Categoria dentro das seis fixas e título/conteúdo preenchidos.
    fn validar(&self) -> Result<Categoria, String> {
        let categoria = self
            .categoria
            .parse::<Categoria>()
            .map_err(|_| "Selecione uma categoria válida.".to_string())?;
        if self.titulo.trim().is_empty() || self.conteudo.trim().is_empty() {
            return Err("Preencha título e conteúdo.".to_string());
        }
        Ok(categoria)
    }
}

fn opcoes_categoria(atual: &str, com_todas: bool) -> Vec<SelectOption> {
    let mut opcoes = Vec::with_capacity(Categoria::ALL.len() + 1);
    if com_todas {
        opcoes.push(SelectOption::new("", "Todas as categorias", atual));
    }
    opcoes.extend(Categoria::ALL.iter().map(|c| SelectOption::new(c.as_str(), c.as_str(), atual)));
    opcoes
}

/// Id do utilizador para `usuarioId`: o da sessão, senão o GUID dos claims.
fn resolve_usuario_id(sessao: &AuthSession) -> Option<String> {
    sessao
        .user
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| TokenClaims::decode(&sessao.token).user_id())
}

// GET /noticias
pub async fn list_noticias_handler(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    let q = query.q.unwrap_or_default().trim().to_string();
    let categoria = query.categoria.unwrap_or_default();
    let page_size = listing::sanitize_page_size(
        links::parse_usize(query.page_size.as_deref()),
        &listing::PAGE_SIZES,
        listing::DEFAULT_PAGE_SIZE,
    );

    let (todas, erro) = match noticias_service::list_noticias(&state.api, Some(&sessao.token)).await {
        Ok(n) => (n, None),
        Err(e) => (Vec::new(), Some(e.display_or("Falha ao carregar notícias")?)),
    };

    let filtradas = listing::filter_noticias(&todas, &categoria, &q);
    let pagina = listing::paginate(&filtradas, links::parse_page(query.page.as_deref()), page_size);

    let link = |p: usize| {
        links::with_query(
            "/noticias",
            &[
                ("q", q.clone()),
                ("categoria", categoria.clone()),
                ("pageSize", page_size.to_string()),
                ("page", p.to_string()),
            ],
        )
    };

    let linhas = pagina
        .items
        .iter()
        .map(|n| {
            let id = urlencoding::encode(&n.id);
            NoticiaLinha {
                titulo: n.titulo.clone(),
                categoria: n.categoria.clone(),
                data: n.criado_em_formatado(),
                autor: n.autor.clone().filter(|a| !a.is_empty()).unwrap_or_else(|| "-".to_string()),
                editar_href: format!("/noticias/editar/{id}"),
                excluir_action: format!("/noticias/{id}/excluir"),
            }
        })
        .collect();

    let page = NoticiasListPage {
        layout: layout(&state, &cookies, &sessao, "/noticias"),
        linhas,
        categorias: opcoes_categoria(&categoria, true),
        tamanhos: listing::PAGE_SIZES
            .iter()
            .map(|s| SelectOption::new(s.to_string(), format!("{s} por página"), &page_size.to_string()))
            .collect(),
        resumo: format!(
            "{} resultado(s) • Página {} de {}",
            pagina.total, pagina.page, pagina.total_pages
        ),
        nav: links::navegacao(pagina.page, pagina.total_pages, link),
        q,
        erro,
    };
    render(&page)
}

fn form_page(
    state: &AppState,
    cookies: &Cookies,
    sessao: &AuthSession,
    titulo_pagina: &str,
    action: String,
    form: &NoticiaForm,
    erro: Option<String>,
) -> NoticiaFormPage {
    NoticiaFormPage {
        layout: layout(state, cookies, sessao, "/noticias"),
        titulo_pagina: titulo_pagina.to_string(),
        action,
        titulo: form.titulo.clone(),
        conteudo: form.conteudo.clone(),
        caminho_foto: form.caminho_foto.clone(),
        categorias: opcoes_categoria(&form.categoria, false),
        erro,
    }
}

// GET /noticias/nova
pub async fn show_create_form(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
) -> AppResult<Response> {
    let page = form_page(
        &state,
        &cookies,
        &sessao,
        "Nova notícia",
        "/noticias/nova".to_string(),
        &NoticiaForm::default(),
        None,
    );
    render(&page)
}

// POST /noticias/nova
pub async fn handle_create(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Form(form): Form<NoticiaForm>,
) -> AppResult<Response> {
    let erro = |msg: String| {
        let page = form_page(&state, &cookies, &sessao, "Nova notícia", "/noticias/nova".to_string(), &form, Some(msg));
        render(&page)
    };

    let Some(usuario_id) = resolve_usuario_id(&sessao) else {
        tracing::warn!("Criação de notícia sem id de utilizador resolvível ({}).", sessao.user.email);
        return erro("Não foi possível identificar o usuário logado. Faça login novamente.".to_string());
    };

    let categoria = match form.validar() {
        Ok(c) => c,
        Err(msg) => return erro(msg),
    };

    let payload = NovaNoticia {
        titulo: form.titulo.trim().to_string(),
        conteudo: form.conteudo.clone(),
        categoria,
        usuario_id,
        caminho_foto: form.caminho_foto(),
    };

    match noticias_service::create_noticia(&state.api, Some(&sessao.token), &payload).await {
        Ok(()) => {
            flash::set(&cookies, &state.cookie_key, "Notícia criada com sucesso.");
            Ok(Redirect::to("/noticias").into_response())
        }
        Err(e) => erro(e.display_or("Erro ao criar notícia.")?),
    }
}

// GET /noticias/editar/{id}
pub async fn show_edit_form(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let action = format!("/noticias/editar/{}", urlencoding::encode(&id));
    let (form, erro) = match noticias_service::find_noticia(&state.api, Some(&sessao.token), &id).await {
        Ok(n) => (NoticiaForm::from_noticia(&n), None),
        Err(e) => (NoticiaForm::default(), Some(e.server_message_or("Falha ao carregar notícia")?)),
    };
    let page = form_page(&state, &cookies, &sessao, "Editar notícia", action, &form, erro);
    render(&page)
}

// POST /noticias/editar/{id}
pub async fn handle_edit(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
    Form(form): Form<NoticiaForm>,
) -> AppResult<Response> {
    let action = format!("/noticias/editar/{}", urlencoding::encode(&id));
    let erro = |msg: String| {
        let page = form_page(&state, &cookies, &sessao, "Editar notícia", action.clone(), &form, Some(msg));
        render(&page)
    };

    let categoria = match form.validar() {
        Ok(c) => c,
        Err(msg) => return erro(msg),
    };

    let payload = AtualizarNoticia {
        id: id.clone(),
        titulo: form.titulo.trim().to_string(),
        conteudo: form.conteudo.clone(),
        categoria,
        caminho_foto: form.caminho_foto(),
    };

    match noticias_service::update_noticia(&state.api, Some(&sessao.token), &id, &payload).await {
        Ok(()) => {
            flash::set(&cookies, &state.cookie_key, "Notícia atualizada com sucesso.");
            Ok(Redirect::to("/noticias").into_response())
        }
        Err(e) => erro(e.server_message_or("Erro ao salvar alterações.")?),
    }
}

// POST /noticias/{id}/excluir
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(sessao): Extension<AuthSession>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let mensagem = match noticias_service::delete_noticia(&state.api, Some(&sessao.token), &id).await {
        Ok(()) => "Notícia excluída com sucesso.".to_string(),
        Err(e) => e.display_or("Erro ao excluir.")?,
    };
    flash::set(&cookies, &state.cookie_key, &mensagem);
    Ok(Redirect::to("/noticias").into_response())
}
