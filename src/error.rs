// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    Migracao(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    VariavelAmbiente(#[from] std::env::VarError),

    #[error("Erro ao processar senha")]
    HashDeSenha,

    #[error("Email ou senha inválidos")]
    CredenciaisInvalidas,

    #[error("Token ausente, inválido ou expirado")]
    TokenInvalido,

    // Entidade ausente: "espaço", "usuário", "reserva", "departamento"
    #[error("{0} não encontrado(a)")]
    NaoEncontrado(&'static str),

    #[error("{0}")]
    ArgumentoInvalido(String),

    // Violação de regra de reserva (capacidade, tipo de espaço restrito)
    #[error("{0}")]
    RegraDeNegocio(String),

    #[error("Reservas só podem ser canceladas com mais de 12 horas de antecedência")]
    JanelaDeCancelamento,

    #[error("{0}")]
    AcessoNegado(&'static str),

    // Sobreposição de horário, email duplicado, remoção bloqueada por referências
    #[error("{0}")]
    Conflito(String),

    #[error("Erro interno inesperado")]
    Interno,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // O detalhe fica no log do servidor; o cliente recebe só a categoria.
        tracing::error!("Erro processado: {:?}", self);

        let (status, mensagem) = match &self {
            AppError::Sqlx(_) | AppError::Migracao(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao aceder aos dados.".to_string(),
            ),
            AppError::VariavelAmbiente(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de configuração.".to_string(),
            ),
            AppError::HashDeSenha => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.".to_string(),
            ),
            AppError::CredenciaisInvalidas | AppError::TokenInvalido => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::NaoEncontrado(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::ArgumentoInvalido(_) | AppError::RegraDeNegocio(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::JanelaDeCancelamento | AppError::AcessoNegado(_) => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::Conflito(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Interno => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ocorreu um erro inesperado.".to_string(),
            ),
        };

        (status, Json(json!({ "erro": mensagem }))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
