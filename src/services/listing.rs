// src/services/listing.rs
//! Busca, filtro, ordenação e paginação feitos em memória sobre listas já
//! carregadas da API. Tudo é recalculado a partir da lista completa a cada pedido.

use crate::models::noticia::Noticia;
use std::cmp::Ordering;

/// Tamanhos de página da lista administrativa.
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Tamanhos de página do portal público.
pub const PORTAL_PAGE_SIZES: [usize; 4] = [6, 12, 18, 24];
pub const PORTAL_PAGE_SIZE: usize = 12;

/// Máximo de indicadores (bolinhas) sob o destaque.
pub const MAX_INDICATORS: usize = 8;

/// Uma fatia paginada de uma lista.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total.div_ceil(size).max(1)
}

/// Coloca a página pedida dentro de `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Fatia `items` na página pedida (já limitada ao intervalo válido).
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Pagina<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);
    let start = (page - 1) * page_size;
    let items = items.iter().skip(start).take(page_size).cloned().collect();
    Pagina { items, page, page_size, total, total_pages }
}

/// Aceita só os tamanhos oferecidos; qualquer outro valor volta ao padrão.
pub fn sanitize_page_size(requested: Option<usize>, allowed: &[usize], default: usize) -> usize {
    requested.filter(|s| allowed.contains(s)).unwrap_or(default)
}

/// Mais recente primeiro; empate por título (ordem alfabética sem acentos).
fn by_date_desc_then_title(a: &Noticia, b: &Noticia) -> Ordering {
    b.criado_em_millis()
        .cmp(&a.criado_em_millis())
        .then_with(|| simplify(&a.titulo).cmp(&simplify(&b.titulo)))
        .then_with(|| a.titulo.cmp(&b.titulo))
}

/// Filtro da lista administrativa: categoria exata + texto (sem distinguir
/// maiúsculas) no título ou conteúdo, ordenado por data desc.
pub fn filter_noticias(noticias: &[Noticia], categoria: &str, q: &str) -> Vec<Noticia> {
    let term = q.trim().to_lowercase();
    let mut filtradas: Vec<Noticia> = noticias
        .iter()
        .filter(|n| categoria.is_empty() || n.categoria == categoria)
        .filter(|n| {
            term.is_empty()
                || n.titulo.to_lowercase().contains(&term)
                || n.conteudo.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();
    filtradas.sort_by(by_date_desc_then_title);
    filtradas
}

/// Remove acentos (latinos) e passa a minúsculas.
pub fn simplify(s: &str) -> String {
    s.chars().map(fold_diacritic).collect::<String>().to_lowercase()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Filtro do portal público: categoria e texto comparados sem acentos,
/// ordenado por data desc (estável para datas iguais).
pub fn filter_publicas(noticias: &[Noticia], categoria: &str, q: &str) -> Vec<Noticia> {
    let wanted = simplify(categoria.trim());
    let term = simplify(q.trim());
    let mut filtradas: Vec<Noticia> = noticias
        .iter()
        .filter(|n| wanted.is_empty() || simplify(&n.categoria) == wanted)
        .filter(|n| term.is_empty() || simplify(&n.titulo).contains(&term) || simplify(&n.conteudo).contains(&term))
        .cloned()
        .collect();
    filtradas.sort_by_key(|n| std::cmp::Reverse(n.criado_em_millis()));
    filtradas
}

/// Destaque + grelha do portal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vitrine {
    pub hero: Option<Noticia>,
    pub hero_index: usize,
    pub indicators: usize,
    pub grid: Vec<Noticia>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Na página 1 o destaque não se repete na grelha, que mostra `page_size - 1`
/// cartões; nas seguintes a grelha começa em `(page - 1) * page_size`.
pub fn montar_vitrine(filtradas: &[Noticia], hero_index: usize, page: usize, page_size: usize) -> Vitrine {
    let page_size = page_size.max(1);
    let total = filtradas.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);
    let hero_index = if total == 0 { 0 } else { hero_index % total };

    let (start, take) = if page == 1 {
        (0, page_size - 1)
    } else {
        ((page - 1) * page_size, page_size)
    };

    let grid = filtradas
        .iter()
        .enumerate()
        .filter(|(i, _)| !(page == 1 && *i == hero_index))
        .map(|(_, n)| n.clone())
        .skip(start)
        .take(take)
        .collect();

    Vitrine {
        hero: filtradas.get(hero_index).cloned(),
        hero_index,
        indicators: if total > 1 { total.min(MAX_INDICATORS) } else { 0 },
        grid,
        page,
        page_size,
        total,
        total_pages,
    }
}

/// Próximo destaque na rotação automática; `None` quando não há o que rodar.
pub fn next_hero_index(current: usize, len: usize) -> Option<usize> {
    (len > 1).then(|| (current + 1) % len)
}
