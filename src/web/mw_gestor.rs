// src/web/mw_gestor.rs
use crate::{error::AppError, web::mw_auth::UsuarioAtual};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Middleware que exige perfil de gestor. Deve ser executado *depois* de
/// `exigir_autenticacao`, que põe o UsuarioAtual nas extensões.
pub async fn exigir_gestor(
    Extension(atual): Extension<UsuarioAtual>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !atual.eh_gestor() {
        tracing::warn!(
            "Gestor MW: acesso negado para usuário {} ({:?})",
            atual.usuario_id,
            atual.tipo
        );
        return Err(AppError::AcessoNegado("Permissão negada para esta ação"));
    }
    Ok(next.run(request).await)
}
