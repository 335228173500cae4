// src/web/espaco_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::espaco::{DadosEspaco, TipoEspaco},
    services::espaco_service,
    state::AppState,
    web::{obrigatorio, texto_obrigatorio},
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

pub async fn listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let espacos = espaco_service::listar(&state.db_pool).await?;
    Ok(Json(espacos))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(espaco_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let espaco = espaco_service::buscar_por_id(&state.db_pool, espaco_id)
        .await?
        .ok_or(AppError::NaoEncontrado("espaço"))?;
    Ok(Json(espaco))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<DadosEspaco>,
) -> AppResult<impl IntoResponse> {
    let (nome, tipo, gestor_id) = validar_dados(dados.nome, dados.tipo, dados.gestor_responsavel_id)?;

    let espaco =
        espaco_service::criar(&state.db_pool, &nome, tipo, dados.capacidade, gestor_id).await?;
    Ok((StatusCode::CREATED, Json(espaco)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(espaco_id): Path<i64>,
    Json(dados): Json<DadosEspaco>,
) -> AppResult<impl IntoResponse> {
    let (nome, tipo, gestor_id) = validar_dados(dados.nome, dados.tipo, dados.gestor_responsavel_id)?;

    let espaco = espaco_service::atualizar(
        &state.db_pool,
        espaco_id,
        &nome,
        tipo,
        dados.capacidade,
        gestor_id,
    )
    .await?;
    Ok(Json(espaco))
}

pub async fn apagar(
    State(state): State<AppState>,
    Path(espaco_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    espaco_service::apagar(&state.db_pool, espaco_id).await?;
    Ok(Json(json!({ "mensagem": "Espaço removido" })))
}

fn validar_dados(
    nome: Option<String>,
    tipo: Option<String>,
    gestor_responsavel_id: Option<i64>,
) -> AppResult<(String, TipoEspaco, i64)> {
    let nome = texto_obrigatorio(nome, "nome")?;
    let tipo_str = texto_obrigatorio(tipo, "tipo")?;
    let tipo = TipoEspaco::parse(&tipo_str).ok_or_else(|| {
        AppError::ArgumentoInvalido(format!(
            "Tipo de espaço inválido: '{tipo_str}'. Valores aceites: sala_de_aula, laboratorio, sala_de_estudo, auditorio"
        ))
    })?;
    let gestor_id = obrigatorio(gestor_responsavel_id, "gestor_responsavel_id")?;
    Ok((nome, tipo, gestor_id))
}
