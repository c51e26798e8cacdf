// src/web/guard.rs
use crate::models::sessao::AuthSession;

/// Resultado da verificação de acesso a uma página.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Permitir,
    RedirecionarLogin,
    RedirecionarInicio,
}

/// Sem sessão → `/login`; página de admin sem `isAdmin` → `/`.
pub fn avaliar(sessao: Option<&AuthSession>, admin_only: bool) -> GuardOutcome {
    match sessao {
        None => GuardOutcome::RedirecionarLogin,
        Some(s) if admin_only && !s.is_admin() => GuardOutcome::RedirecionarInicio,
        Some(_) => GuardOutcome::Permitir,
    }
}
