// src/services/imagens.rs

/// Imagem SVG usada quando a notícia não tem foto.
const PLACEHOLDER_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1600 900'>\
<rect width='1600' height='900' fill='#e5e7eb'/>\
<text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
font-size='64' fill='#9ca3af' font-family='sans-serif'>Sem imagem</text></svg>";

pub fn placeholder() -> String {
    format!("data:image/svg+xml;utf8,{}", urlencoding::encode(PLACEHOLDER_SVG))
}

/// Resolve `caminhoFoto` para uma URL exibível:
/// vazio → placeholder; `http(s)://` fica igual; caminho relativo é preso ao host da API.
pub fn resolve_image_url(api_base: &str, caminho: Option<&str>) -> String {
    let caminho = caminho.map(str::trim).unwrap_or_default();
    if caminho.is_empty() {
        return placeholder();
    }

    let lower = caminho.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return caminho.to_string();
    }

    let base = api_base.trim_end_matches('/');
    if caminho.starts_with('/') {
        return format!("{base}{caminho}");
    }
    collapse_slashes(&format!("{base}/{caminho}"))
}

// Junta barras repetidas, exceto a do esquema (`https://`).
fn collapse_slashes(url: &str) -> String {
    let (scheme, rest) = match url.find("://") {
        Some(i) => url.split_at(i + 3),
        None => ("", url),
    };
    let mut out = String::with_capacity(url.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for c in rest.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.pjf.example";

    #[test]
    fn empty_path_uses_placeholder() {
        assert!(resolve_image_url(BASE, None).starts_with("data:image/svg+xml;utf8,"));
        assert!(resolve_image_url(BASE, Some("  ")).contains("Sem%20imagem"));
    }

    #[test]
    fn absolute_urls_are_kept() {
        assert_eq!(resolve_image_url(BASE, Some("HTTPS://cdn.x/a.jpg")), "HTTPS://cdn.x/a.jpg");
    }

    #[test]
    fn relative_paths_join_api_host() {
        assert_eq!(resolve_image_url(BASE, Some("/uploads/a.jpg")), "https://api.pjf.example/uploads/a.jpg");
        assert_eq!(resolve_image_url(BASE, Some("uploads//a.jpg")), "https://api.pjf.example/uploads/a.jpg");
    }
}
