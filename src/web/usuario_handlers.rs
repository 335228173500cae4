// src/web/usuario_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{DadosUsuario, TipoUsuario},
    services::usuario_service,
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
    let usuarios = usuario_service::listar(&state.db_pool).await?;
    Ok(Json(usuarios))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let usuario = usuario_service::buscar_publico_por_id(&state.db_pool, usuario_id)
        .await?
        .ok_or(AppError::NaoEncontrado("usuário"))?;
    Ok(Json(usuario))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<DadosUsuario>,
) -> AppResult<impl IntoResponse> {
    let nome = texto_obrigatorio(dados.nome, "nome")?;
    let email = texto_obrigatorio(dados.email, "email")?;
    let senha = texto_obrigatorio(dados.senha, "senha")?;
    let tipo = parse_tipo(dados.tipo)?;

    let usuario = usuario_service::criar(
        &state.db_pool,
        &nome,
        &email,
        &senha,
        tipo,
        dados.departamento_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
    Json(dados): Json<DadosUsuario>,
) -> AppResult<impl IntoResponse> {
    let nome = texto_obrigatorio(dados.nome, "nome")?;
    let email = texto_obrigatorio(dados.email, "email")?;
    let tipo = parse_tipo(dados.tipo)?;

    // Senha em branco mantém a atual (contrato do formulário de edição)
    let usuario = usuario_service::atualizar(
        &state.db_pool,
        usuario_id,
        &nome,
        &email,
        dados.senha.as_deref(),
        tipo,
        dados.departamento_id,
    )
    .await?;
    Ok(Json(usuario))
}

pub async fn apagar(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    usuario_service::apagar(&state.db_pool, usuario_id).await?;
    Ok(Json(json!({ "mensagem": "Usuário removido" })))
}

fn parse_tipo(tipo: Option<String>) -> AppResult<TipoUsuario> {
    let tipo_str = texto_obrigatorio(tipo, "tipo")?;
    TipoUsuario::parse(&tipo_str).ok_or_else(|| {
        AppError::ArgumentoInvalido(format!(
            "Tipo de usuário inválido: '{tipo_str}'. Valores aceites: aluno, professor, gestor"
        ))
    })
}
