// tests/common/mod.rs
#![allow(dead_code)]

use chrono::NaiveDateTime;
use reservas_api::{
    models::{espaco::TipoEspaco, reserva::NovaReserva, usuario::TipoUsuario},
    services::{espaco_service, usuario_service},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub const SENHA_DE_TESTE: &str = "senha123";

/// Pool em memória com o esquema aplicado. Uma única conexão chega para a
/// maioria dos testes.
pub async fn pool_de_teste() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// Pool em memória com cache partilhada, para testes que precisam de várias
/// conexões simultâneas sobre a mesma base. O nome tem de ser único por teste.
pub async fn pool_compartilhada(nome: &str) -> SqlitePool {
    let url = format!("sqlite:file:{nome}?mode=memory&cache=shared");
    let options = SqliteConnectOptions::from_str(&url)
        .unwrap()
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .min_connections(2)
        .max_connections(4)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub async fn cria_usuario(
    pool: &SqlitePool,
    nome: &str,
    email: &str,
    tipo: TipoUsuario,
) -> i64 {
    usuario_service::criar(pool, nome, email, SENHA_DE_TESTE, tipo, None)
        .await
        .unwrap()
        .usuario_id
}

pub async fn cria_espaco(
    pool: &SqlitePool,
    nome: &str,
    tipo: TipoEspaco,
    capacidade: Option<i64>,
    gestor_id: i64,
) -> i64 {
    espaco_service::criar(pool, nome, tipo, capacidade, gestor_id)
        .await
        .unwrap()
        .espaco_id
}

/// Atalho para datas fixas nos testes ("2030-05-10T10:00:00").
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub fn pedido(
    espaco_id: i64,
    solicitante_id: i64,
    inicio: &str,
    fim: &str,
    num_participantes: i64,
) -> NovaReserva {
    NovaReserva {
        espaco_id,
        solicitante_id,
        data_hora_inicio: dt(inicio),
        data_hora_fim: dt(fim),
        num_participantes,
        finalidade: None,
    }
}
