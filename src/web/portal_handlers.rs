// src/web/portal_handlers.rs
// Portal público: sem sessão e sem token.
use crate::{
    config::HERO_ROTATION_SECS,
    error::AppResult,
    models::noticia::{Categoria, Noticia},
    services::{
        imagens,
        listing::{self, Vitrine},
        noticias_service::{self, PortalQuery},
    },
    state::AppState,
    templates::{AutoRefresh, CartaoNoticia, Indicador, PortalPage, SelectOption},
    web::{links, render},
};
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

const RESUMO_MAX_CHARS: usize = 160;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalParams {
    pub q: Option<String>,
    pub categoria: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub destaque: Option<String>,
}

/// Corta o conteúdo num resumo de cartão, sem partir caracteres.
fn resumo(conteudo: &str) -> String {
    let texto = conteudo.trim();
    if texto.chars().count() <= RESUMO_MAX_CHARS {
        return texto.to_string();
    }
    let cortado: String = texto.chars().take(RESUMO_MAX_CHARS).collect();
    format!("{}…", cortado.trim_end())
}

fn cartao(api_base: &str, n: &Noticia) -> CartaoNoticia {
    CartaoNoticia {
        titulo: n.titulo.clone(),
        resumo: resumo(&n.conteudo),
        categoria: n.categoria.clone(),
        data: n.criado_em_curto(),
        imagem: imagens::resolve_image_url(api_base, n.caminho_foto.as_deref()),
    }
}

struct PortalLinks {
    q: String,
    categoria: String,
    page_size: usize,
}

impl PortalLinks {
    fn to(&self, page: usize, destaque: usize) -> String {
        links::with_query(
            "/portal/noticias",
            &[
                ("q", self.q.clone()),
                ("categoria", self.categoria.clone()),
                ("pageSize", self.page_size.to_string()),
                ("page", page.to_string()),
                ("destaque", destaque.to_string()),
            ],
        )
    }
}

// GET /portal/noticias
pub async fn portal_handler(
    State(state): State<AppState>,
    Query(params): Query<PortalParams>,
) -> AppResult<Response> {
    let q = params.q.unwrap_or_default().trim().to_string();
    let categoria = params.categoria.unwrap_or_default().trim().to_string();
    let page = links::parse_page(params.page.as_deref());
    let page_size = listing::sanitize_page_size(
        links::parse_usize(params.page_size.as_deref()),
        &listing::PORTAL_PAGE_SIZES,
        listing::PORTAL_PAGE_SIZE,
    );
    let destaque = links::parse_usize(params.destaque.as_deref()).unwrap_or(0);

    let query = PortalQuery { page, page_size, q: q.clone(), categoria: categoria.clone() };
    let (noticias, erro) = match noticias_service::list_publicas(&state.api, &query).await {
        Ok(n) => (n, None),
        Err(e) => (Vec::new(), Some(e.server_message_or("Falha ao carregar")?)),
    };

    let filtradas = listing::filter_publicas(&noticias, &categoria, &q);
    let vitrine = listing::montar_vitrine(&filtradas, destaque, page, page_size);
    let rotas = PortalLinks { q: q.clone(), categoria: categoria.clone(), page_size };

    let page = montar_pagina(state.api.base_url(), &vitrine, &rotas, erro, q, categoria);
    render(&page)
}

fn montar_pagina(
    api_base: &str,
    vitrine: &Vitrine,
    rotas: &PortalLinks,
    erro: Option<String>,
    q: String,
    categoria: String,
) -> PortalPage {
    let atual = vitrine.hero_index;
    let proximo = listing::next_hero_index(atual, vitrine.total);
    let anterior = (vitrine.total > 1).then(|| (atual + vitrine.total - 1) % vitrine.total);

    let mut categorias = vec![SelectOption::new("", "Todas", &categoria)];
    categorias.extend(Categoria::ALL.iter().map(|c| SelectOption::new(c.as_str(), c.as_str(), &categoria)));

    PortalPage {
        hero: vitrine.hero.as_ref().map(|n| cartao(api_base, n)),
        anterior_destaque: anterior.map(|i| rotas.to(vitrine.page, i)),
        proximo_destaque: proximo.map(|i| rotas.to(vitrine.page, i)),
        indicadores: (0..vitrine.indicators)
            .map(|i| Indicador { href: rotas.to(vitrine.page, i), ativo: i == atual })
            .collect(),
        cartoes: vitrine.grid.iter().map(|n| cartao(api_base, n)).collect(),
        q,
        categorias,
        tamanhos: listing::PORTAL_PAGE_SIZES
            .iter()
            .map(|s| SelectOption::new(s.to_string(), format!("{s} por página"), &vitrine.page_size.to_string()))
            .collect(),
        resumo: format!(
            "{} notícia(s) • Página {} de {}",
            vitrine.total, vitrine.page, vitrine.total_pages
        ),
        nav: links::navegacao(vitrine.page, vitrine.total_pages, |p| rotas.to(p, atual)),
        refresh: proximo.map(|i| AutoRefresh {
            segundos: HERO_ROTATION_SECS,
            href: rotas.to(vitrine.page, i),
        }),
        erro,
    }
}
