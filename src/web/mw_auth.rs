// src/web/mw_auth.rs
use crate::{
    error::AppError,
    models::usuario::TipoUsuario,
    services::auth_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Nome do header que transporta o token opaco, herdado da API original.
pub const HEADER_TOKEN: &str = "x-access-token";

/// Identidade extraída do token e posta nas extensões da requisição para os
/// handlers protegidos.
#[derive(Clone, Debug)]
pub struct UsuarioAtual {
    pub usuario_id: i64,
    pub tipo: TipoUsuario,
}

impl UsuarioAtual {
    pub fn eh_gestor(&self) -> bool {
        self.tipo == TipoUsuario::Gestor
    }
}

/// Middleware que exige um token válido. Ausência, token desconhecido e token
/// expirado respondem todos 401, sem distinção.
pub async fn exigir_autenticacao(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(HEADER_TOKEN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or(AppError::TokenInvalido)?;

    let (usuario_id, tipo) = auth_service::verificar_token(&state.db_pool, &token)
        .await?
        .ok_or(AppError::TokenInvalido)?;

    tracing::debug!("Autenticação MW: usuário {} ({:?})", usuario_id, tipo);
    request
        .extensions_mut()
        .insert(UsuarioAtual { usuario_id, tipo });

    Ok(next.run(request).await)
}
