// src/web/flash.rs
// Mensagens de uma só leitura entre um redirecionamento e a página seguinte.
use tower_cookies::{Cookie, Cookies, Key};

const FLASH_COOKIE: &str = "flash";

pub fn set(cookies: &Cookies, key: &Key, mensagem: &str) {
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(mensagem).into_owned()))
        .path("/")
        .http_only(true)
        .build();
    cookies.signed(key).add(cookie);
}

/// Lê e apaga a mensagem. Cookies adulterados são ignorados.
pub fn take(cookies: &Cookies, key: &Key) -> Option<String> {
    let signed = cookies.signed(key);
    let cookie = signed.get(FLASH_COOKIE)?;
    signed.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    urlencoding::decode(cookie.value())
        .ok()
        .map(|m| m.into_owned())
        .filter(|m| !m.is_empty())
}
