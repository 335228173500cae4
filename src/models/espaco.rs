// src/models/espaco.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tipos de espaço reserváveis. Laboratórios são restritos a professores;
/// salas de aula e de estudo entram na classe de aprovação automática.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TipoEspaco {
    SalaDeAula,
    Laboratorio,
    SalaDeEstudo,
    Auditorio,
}

impl TipoEspaco {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sala_de_aula" => Some(TipoEspaco::SalaDeAula),
            "laboratorio" => Some(TipoEspaco::Laboratorio),
            "sala_de_estudo" => Some(TipoEspaco::SalaDeEstudo),
            "auditorio" => Some(TipoEspaco::Auditorio),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEspaco::SalaDeAula => "sala_de_aula",
            TipoEspaco::Laboratorio => "laboratorio",
            TipoEspaco::SalaDeEstudo => "sala_de_estudo",
            TipoEspaco::Auditorio => "auditorio",
        }
    }

    /// Reservas nestes tipos nascem já confirmadas, sem aprovação manual.
    pub fn aprovacao_automatica(&self) -> bool {
        matches!(self, TipoEspaco::SalaDeAula | TipoEspaco::SalaDeEstudo)
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Espaco {
    pub espaco_id: i64,
    pub nome: String,
    pub tipo: TipoEspaco,
    pub capacidade: Option<i64>,
    pub gestor_responsavel_id: i64,
}

/// Payload de criação/atualização. Todos os campos opcionais na deserialização;
/// a obrigatoriedade é verificada no handler para responder 400 (e não 422).
#[derive(Debug, Deserialize)]
pub struct DadosEspaco {
    pub nome: Option<String>,
    pub tipo: Option<String>,
    pub capacidade: Option<i64>,
    pub gestor_responsavel_id: Option<i64>,
}
