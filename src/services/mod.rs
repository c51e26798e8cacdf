// src/services/mod.rs
pub mod auth_service;
pub mod dashboard;
pub mod datas;
pub mod imagens;
pub mod listing;
pub mod noticias_service;
pub mod sessao_service;
pub mod token_claims;
pub mod usuarios_service;
