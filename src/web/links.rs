// src/web/links.rs
// Montagem de links com query string (valores vazios são omitidos).
use crate::templates::Navegacao;

pub fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    let query = pairs
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Só aceita caminhos locais (`/x`), nunca `//host` ou URLs absolutas.
/// Caracteres de controlo e `\` são recusados: o navegador descarta tabs e
/// quebras de linha ao ler a URL, e `/\t/host` viraria `//host`.
pub fn safe_redirect(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(r)
            if r.starts_with('/')
                && !r.starts_with("//")
                && !r.chars().any(|c| c.is_control() || c == '\\') =>
        {
            r.to_string()
        }
        _ => "/".to_string(),
    }
}

/// Número de página vindo da query; lixo ou ausente conta como 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<usize>().ok()).filter(|p| *p >= 1).unwrap_or(1)
}

pub fn parse_usize(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|p| p.trim().parse::<usize>().ok())
}

/// Primeira/anterior/próxima/última; os botões sem destino ficam `None`.
pub fn navegacao(page: usize, total_pages: usize, link: impl Fn(usize) -> String) -> Navegacao {
    let tem_anterior = page > 1;
    let tem_proxima = page < total_pages;
    Navegacao {
        primeira: tem_anterior.then(|| link(1)),
        anterior: tem_anterior.then(|| link(page - 1)),
        proxima: tem_proxima.then(|| link(page + 1)),
        ultima: tem_proxima.then(|| link(total_pages)),
    }
}
