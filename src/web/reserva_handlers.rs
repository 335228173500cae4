// src/web/reserva_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::reserva::{
        AtualizaStatusPayload, FiltroReservas, FiltroReservasQuery, NovaReserva,
        NovaReservaPayload, StatusReserva,
    },
    services::reserva_service,
    state::AppState,
    web::{mw_auth::UsuarioAtual, obrigatorio, texto_obrigatorio},
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

/// POST /api/reservas — o solicitante é sempre o dono do token.
pub async fn criar(
    State(state): State<AppState>,
    Extension(atual): Extension<UsuarioAtual>,
    Json(payload): Json<NovaReservaPayload>,
) -> AppResult<impl IntoResponse> {
    let nova = NovaReserva {
        espaco_id: obrigatorio(payload.espaco_id, "espaco_id")?,
        solicitante_id: atual.usuario_id,
        data_hora_inicio: obrigatorio(payload.data_hora_inicio, "data_hora_inicio")?,
        data_hora_fim: obrigatorio(payload.data_hora_fim, "data_hora_fim")?,
        num_participantes: obrigatorio(payload.num_participantes, "num_participantes")?,
        finalidade: payload.finalidade,
    };

    let reserva = reserva_service::criar_reserva(&state.db_pool, nova).await?;
    Ok((StatusCode::CREATED, Json(reserva)))
}

/// GET /api/reservas — filtros opcionais; `status` aceita lista separada por
/// vírgulas.
pub async fn listar(
    State(state): State<AppState>,
    Query(params): Query<FiltroReservasQuery>,
) -> AppResult<impl IntoResponse> {
    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(lista) => {
            let mut parsed = Vec::new();
            for parte in lista.split(',') {
                let parte = parte.trim();
                let s = StatusReserva::parse(parte).ok_or_else(|| {
                    AppError::ArgumentoInvalido(format!("Status inválido no filtro: '{parte}'"))
                })?;
                parsed.push(s);
            }
            Some(parsed)
        }
    };

    let filtro = FiltroReservas {
        espaco_id: params.espaco_id,
        solicitante_id: params.solicitante_id,
        status,
    };

    let reservas = reserva_service::listar(&state.db_pool, &filtro).await?;
    Ok(Json(reservas))
}

/// PUT /api/reservas/{id}/status — só gestores chegam aqui (mw_gestor); o
/// aprovador registado é o próprio gestor autenticado.
pub async fn atualizar_status(
    State(state): State<AppState>,
    Extension(atual): Extension<UsuarioAtual>,
    Path(reserva_id): Path<i64>,
    Json(payload): Json<AtualizaStatusPayload>,
) -> AppResult<impl IntoResponse> {
    let status = texto_obrigatorio(payload.status, "status")?;
    let reserva =
        reserva_service::atualizar_status(&state.db_pool, reserva_id, &status, atual.usuario_id)
            .await?;
    Ok(Json(reserva))
}

/// DELETE /api/reservas/{id} — cancelamento pelo próprio solicitante.
pub async fn cancelar(
    State(state): State<AppState>,
    Extension(atual): Extension<UsuarioAtual>,
    Path(reserva_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    reserva_service::cancelar(&state.db_pool, reserva_id, atual.usuario_id).await?;
    Ok(Json(json!({ "mensagem": "Reserva cancelada" })))
}
