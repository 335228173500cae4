// src/models/reserva.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StatusReserva {
    Pendente,
    Confirmada,
    Cancelada,
    Recusada,
}

impl StatusReserva {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendente" => Some(StatusReserva::Pendente),
            "confirmada" => Some(StatusReserva::Confirmada),
            "cancelada" => Some(StatusReserva::Cancelada),
            "recusada" => Some(StatusReserva::Recusada),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusReserva::Pendente => "pendente",
            StatusReserva::Confirmada => "confirmada",
            StatusReserva::Cancelada => "cancelada",
            StatusReserva::Recusada => "recusada",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reserva {
    pub reserva_id: i64,
    pub espaco_id: i64,
    pub solicitante_id: i64,
    pub data_hora_inicio: NaiveDateTime,
    pub data_hora_fim: NaiveDateTime,
    pub finalidade: Option<String>,
    pub num_participantes: i64,
    pub status: StatusReserva,
    pub aprovado_por: Option<i64>,
}

/// Linha enriquecida para listagens (join com espaços e usuários).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReservaDetalhada {
    pub reserva_id: i64,
    pub espaco_id: i64,
    pub espaco_nome: String,
    pub solicitante_id: i64,
    pub solicitante_nome: String,
    pub data_hora_inicio: NaiveDateTime,
    pub data_hora_fim: NaiveDateTime,
    pub finalidade: Option<String>,
    pub num_participantes: i64,
    pub status: StatusReserva,
    pub aprovado_por: Option<i64>,
}

/// Payload bruto de POST /api/reservas. O solicitante vem sempre do token,
/// nunca do corpo da requisição.
#[derive(Debug, Deserialize)]
pub struct NovaReservaPayload {
    pub espaco_id: Option<i64>,
    pub data_hora_inicio: Option<NaiveDateTime>,
    pub data_hora_fim: Option<NaiveDateTime>,
    pub num_participantes: Option<i64>,
    pub finalidade: Option<String>,
}

/// Pedido de reserva já com os campos obrigatórios garantidos.
#[derive(Debug, Clone)]
pub struct NovaReserva {
    pub espaco_id: i64,
    pub solicitante_id: i64,
    pub data_hora_inicio: NaiveDateTime,
    pub data_hora_fim: NaiveDateTime,
    pub num_participantes: i64,
    pub finalidade: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtualizaStatusPayload {
    pub status: Option<String>,
}

/// Filtros de GET /api/reservas, combinados com AND. Cada campo vira uma
/// condição parametrizada; valores nunca são concatenados no SQL.
#[derive(Debug, Default)]
pub struct FiltroReservas {
    pub espaco_id: Option<i64>,
    pub solicitante_id: Option<i64>,
    pub status: Option<Vec<StatusReserva>>,
}

/// Query string crua de GET /api/reservas. `status` aceita uma lista separada
/// por vírgulas (ex.: "pendente,confirmada").
#[derive(Debug, Deserialize)]
pub struct FiltroReservasQuery {
    pub espaco_id: Option<i64>,
    pub solicitante_id: Option<i64>,
    pub status: Option<String>,
}
