// src/templates.rs
use crate::services::dashboard::BarraGrafico;
use askama::Template;

/// Dados comuns ao cabeçalho das páginas autenticadas (`base.html`).
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub user_name: String,
    pub is_admin: bool,
    pub current_path: String,
    pub flash: Option<String>,
}

/// Opção de um `<select>` já com o estado de seleção calculado.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self { value, label: label.into(), selected }
    }
}

/// Links de navegação entre páginas; `None` desativa o botão.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navegacao {
    pub primeira: Option<String>,
    pub anterior: Option<String>,
    pub proxima: Option<String>,
    pub ultima: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub email: String,
    pub redirect: String,
    pub recaptcha_site_key: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub layout: Layout,
    pub barras: Vec<BarraGrafico>,
    pub total_semana: u32,
    pub erro: Option<String>,
}

/// Linha da tabela de notícias.
#[derive(Debug, Clone)]
pub struct NoticiaLinha {
    pub titulo: String,
    pub categoria: String,
    pub data: String,
    pub autor: String,
    pub editar_href: String,
    pub excluir_action: String,
}

#[derive(Template)]
#[template(path = "noticias_list.html")]
pub struct NoticiasListPage {
    pub layout: Layout,
    pub linhas: Vec<NoticiaLinha>,
    pub q: String,
    pub categorias: Vec<SelectOption>,
    pub tamanhos: Vec<SelectOption>,
    pub resumo: String,
    pub nav: Navegacao,
    pub erro: Option<String>,
}

#[derive(Template)]
#[template(path = "noticia_form.html")]
pub struct NoticiaFormPage {
    pub layout: Layout,
    pub titulo_pagina: String,
    pub action: String,
    pub titulo: String,
    pub conteudo: String,
    pub caminho_foto: String,
    pub categorias: Vec<SelectOption>,
    pub erro: Option<String>,
}

/// Linha da tabela de utilizadores.
#[derive(Debug, Clone)]
pub struct UsuarioLinha {
    pub nome: String,
    pub email: String,
    pub admin: &'static str,
    pub editar_href: String,
    pub excluir_action: String,
}

#[derive(Template)]
#[template(path = "usuarios_list.html")]
pub struct UsuariosListPage {
    pub layout: Layout,
    pub linhas: Vec<UsuarioLinha>,
    pub erro: Option<String>,
}

#[derive(Template)]
#[template(path = "usuario_form.html")]
pub struct UsuarioFormPage {
    pub layout: Layout,
    pub titulo_pagina: String,
    pub action: String,
    pub nome: String,
    pub email: String,
    pub is_admin: bool,
    // Na edição a senha é opcional
    pub senha_obrigatoria: bool,
    pub erro: Option<String>,
}

/// Cartão (ou destaque) do portal público.
#[derive(Debug, Clone)]
pub struct CartaoNoticia {
    pub titulo: String,
    pub resumo: String,
    pub categoria: String,
    pub data: String,
    pub imagem: String,
}

#[derive(Debug, Clone)]
pub struct Indicador {
    pub href: String,
    pub ativo: bool,
}

/// Recarregamento automático que avança o destaque.
#[derive(Debug, Clone)]
pub struct AutoRefresh {
    pub segundos: u64,
    pub href: String,
}

#[derive(Template)]
#[template(path = "portal.html")]
pub struct PortalPage {
    pub hero: Option<CartaoNoticia>,
    pub anterior_destaque: Option<String>,
    pub proximo_destaque: Option<String>,
    pub indicadores: Vec<Indicador>,
    pub cartoes: Vec<CartaoNoticia>,
    pub q: String,
    pub categorias: Vec<SelectOption>,
    pub tamanhos: Vec<SelectOption>,
    pub resumo: String,
    pub nav: Navegacao,
    pub refresh: Option<AutoRefresh>,
    pub erro: Option<String>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub layout: Layout,
}
