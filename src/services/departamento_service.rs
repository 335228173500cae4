// src/services/departamento_service.rs
use crate::{
    error::{AppError, AppResult},
    models::departamento::Departamento,
};
use sqlx::SqlitePool;

pub async fn listar(pool: &SqlitePool) -> AppResult<Vec<Departamento>> {
    let departamentos = sqlx::query_as::<_, Departamento>(
        "SELECT departamento_id, nome FROM departamentos ORDER BY nome ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(departamentos)
}

pub async fn buscar_por_id(
    pool: &SqlitePool,
    departamento_id: i64,
) -> AppResult<Option<Departamento>> {
    let departamento = sqlx::query_as::<_, Departamento>(
        "SELECT departamento_id, nome FROM departamentos WHERE departamento_id = ?",
    )
    .bind(departamento_id)
    .fetch_optional(pool)
    .await?;
    Ok(departamento)
}

pub async fn criar(pool: &SqlitePool, nome: &str) -> AppResult<Departamento> {
    let resultado = sqlx::query("INSERT INTO departamentos (nome) VALUES (?)")
        .bind(nome)
        .execute(pool)
        .await?;

    let departamento_id = resultado.last_insert_rowid();
    buscar_por_id(pool, departamento_id)
        .await?
        .ok_or(AppError::Interno)
}

pub async fn atualizar(
    pool: &SqlitePool,
    departamento_id: i64,
    nome: &str,
) -> AppResult<Departamento> {
    let alteradas = sqlx::query("UPDATE departamentos SET nome = ? WHERE departamento_id = ?")
        .bind(nome)
        .bind(departamento_id)
        .execute(pool)
        .await?
        .rows_affected();

    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("departamento"));
    }

    buscar_por_id(pool, departamento_id)
        .await?
        .ok_or(AppError::Interno)
}

/// Remoção bloqueada enquanto houver usuários ligados ao departamento.
pub async fn apagar(pool: &SqlitePool, departamento_id: i64) -> AppResult<()> {
    let removidas = sqlx::query(
        r#"
        DELETE FROM departamentos
        WHERE departamento_id = ?1
          AND NOT EXISTS (SELECT 1 FROM usuarios WHERE departamento_id = ?1)
        "#,
    )
    .bind(departamento_id)
    .execute(pool)
    .await?
    .rows_affected();

    if removidas == 0 {
        if buscar_por_id(pool, departamento_id).await?.is_some() {
            return Err(AppError::Conflito(
                "O departamento está em uso por usuários e não pode ser removido".to_string(),
            ));
        }
        return Err(AppError::NaoEncontrado("departamento"));
    }

    Ok(())
}
