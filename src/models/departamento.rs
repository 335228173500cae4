// src/models/departamento.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Departamento {
    pub departamento_id: i64,
    pub nome: String,
}

#[derive(Debug, Deserialize)]
pub struct DadosDepartamento {
    pub nome: Option<String>,
}
