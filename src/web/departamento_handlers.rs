// src/web/departamento_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::departamento::DadosDepartamento,
    services::departamento_service,
    state::AppState,
    web::texto_obrigatorio,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

pub async fn listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let departamentos = departamento_service::listar(&state.db_pool).await?;
    Ok(Json(departamentos))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(departamento_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let departamento = departamento_service::buscar_por_id(&state.db_pool, departamento_id)
        .await?
        .ok_or(AppError::NaoEncontrado("departamento"))?;
    Ok(Json(departamento))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<DadosDepartamento>,
) -> AppResult<impl IntoResponse> {
    let nome = texto_obrigatorio(dados.nome, "nome")?;
    let departamento = departamento_service::criar(&state.db_pool, &nome).await?;
    Ok((StatusCode::CREATED, Json(departamento)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(departamento_id): Path<i64>,
    Json(dados): Json<DadosDepartamento>,
) -> AppResult<impl IntoResponse> {
    let nome = texto_obrigatorio(dados.nome, "nome")?;
    let departamento =
        departamento_service::atualizar(&state.db_pool, departamento_id, &nome).await?;
    Ok(Json(departamento))
}

pub async fn apagar(
    State(state): State<AppState>,
    Path(departamento_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    departamento_service::apagar(&state.db_pool, departamento_id).await?;
    Ok(Json(json!({ "mensagem": "Departamento removido" })))
}
