// src/web/mod.rs
pub mod auth_handlers;
pub mod departamento_handlers;
pub mod espaco_handlers;
pub mod mw_auth;
pub mod mw_gestor;
pub mod reserva_handlers;
pub mod routes;
pub mod usuario_handlers;

use crate::error::{AppError, AppResult};

/// Extrai um campo obrigatório de um payload, respondendo 400 quando ausente.
pub(crate) fn obrigatorio<T>(valor: Option<T>, campo: &'static str) -> AppResult<T> {
    valor.ok_or_else(|| {
        AppError::ArgumentoInvalido(format!("Campo obrigatório em falta: {campo}"))
    })
}

/// Igual a `obrigatorio`, mas rejeita também strings vazias/brancas.
pub(crate) fn texto_obrigatorio(valor: Option<String>, campo: &'static str) -> AppResult<String> {
    match valor {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::ArgumentoInvalido(format!(
            "Campo obrigatório em falta: {campo}"
        ))),
    }
}
