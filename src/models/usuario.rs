// src/models/usuario.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TipoUsuario {
    Aluno,
    Professor,
    Gestor,
}

impl TipoUsuario {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aluno" => Some(TipoUsuario::Aluno),
            "professor" => Some(TipoUsuario::Professor),
            "gestor" => Some(TipoUsuario::Gestor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoUsuario::Aluno => "aluno",
            TipoUsuario::Professor => "professor",
            TipoUsuario::Gestor => "gestor",
        }
    }
}

// Representa um usuário lido da tabela 'usuarios'. Nunca sai para o cliente
// por causa do senha_hash; as respostas usam UsuarioPublico.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub usuario_id: i64,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub tipo: TipoUsuario,
    pub departamento_id: Option<i64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsuarioPublico {
    pub usuario_id: i64,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    pub departamento_id: Option<i64>,
    pub departamento_nome: Option<String>,
}

/// Payload de criação/atualização de usuário. `senha` vazia ou ausente numa
/// atualização mantém o hash atual.
#[derive(Debug, Deserialize)]
pub struct DadosUsuario {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub tipo: Option<String>,
    pub departamento_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CredenciaisLogin {
    pub email: Option<String>,
    pub senha: Option<String>,
}
