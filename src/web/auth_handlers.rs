// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::CredenciaisLogin,
    services::{auth_service, usuario_service},
    state::AppState,
    web::{mw_auth::UsuarioAtual, texto_obrigatorio},
};
use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
};
use serde_json::json;

/// POST /api/login — emite um token opaco para credenciais válidas.
pub async fn login(
    State(state): State<AppState>,
    Json(credenciais): Json<CredenciaisLogin>,
) -> AppResult<impl IntoResponse> {
    let email = texto_obrigatorio(credenciais.email, "email")?;
    let senha = texto_obrigatorio(credenciais.senha, "senha")?;

    let token = auth_service::autenticar(&state.db_pool, &email, &senha).await?;
    Ok(Json(json!({ "token": token })))
}

/// GET /api/me — registo do próprio usuário autenticado, sem o hash de senha.
pub async fn me(
    State(state): State<AppState>,
    Extension(atual): Extension<UsuarioAtual>,
) -> AppResult<impl IntoResponse> {
    let usuario = usuario_service::buscar_publico_por_id(&state.db_pool, atual.usuario_id)
        .await?
        .ok_or_else(|| {
            // Token válido para um usuário entretanto removido
            tracing::error!(
                "Usuário autenticado {} não existe mais na base",
                atual.usuario_id
            );
            AppError::TokenInvalido
        })?;

    Ok(Json(usuario))
}
