// src/services/espaco_service.rs
use crate::{
    error::{AppError, AppResult},
    models::espaco::{Espaco, TipoEspaco},
};
use sqlx::SqlitePool;

pub async fn listar(pool: &SqlitePool) -> AppResult<Vec<Espaco>> {
    let espacos = sqlx::query_as::<_, Espaco>(
        "SELECT espaco_id, nome, tipo, capacidade, gestor_responsavel_id
         FROM espacos ORDER BY nome ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(espacos)
}

pub async fn buscar_por_id(pool: &SqlitePool, espaco_id: i64) -> AppResult<Option<Espaco>> {
    let espaco = sqlx::query_as::<_, Espaco>(
        "SELECT espaco_id, nome, tipo, capacidade, gestor_responsavel_id
         FROM espacos WHERE espaco_id = ?",
    )
    .bind(espaco_id)
    .fetch_optional(pool)
    .await?;
    Ok(espaco)
}

pub async fn criar(
    pool: &SqlitePool,
    nome: &str,
    tipo: TipoEspaco,
    capacidade: Option<i64>,
    gestor_responsavel_id: i64,
) -> AppResult<Espaco> {
    validar_capacidade(capacidade)?;

    let resultado = sqlx::query(
        "INSERT INTO espacos (nome, tipo, capacidade, gestor_responsavel_id)
         VALUES (?, ?, ?, ?)",
    )
    .bind(nome)
    .bind(tipo)
    .bind(capacidade)
    .bind(gestor_responsavel_id)
    .execute(pool)
    .await;

    let resultado = match resultado {
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::ArgumentoInvalido(
                "gestor_responsavel_id não corresponde a um usuário existente".to_string(),
            ));
        }
        outro => outro?,
    };

    let espaco_id = resultado.last_insert_rowid();
    tracing::info!("Espaço {} ('{}') criado", espaco_id, nome);

    buscar_por_id(pool, espaco_id).await?.ok_or(AppError::Interno)
}

pub async fn atualizar(
    pool: &SqlitePool,
    espaco_id: i64,
    nome: &str,
    tipo: TipoEspaco,
    capacidade: Option<i64>,
    gestor_responsavel_id: i64,
) -> AppResult<Espaco> {
    validar_capacidade(capacidade)?;

    let resultado = sqlx::query(
        "UPDATE espacos
         SET nome = ?, tipo = ?, capacidade = ?, gestor_responsavel_id = ?
         WHERE espaco_id = ?",
    )
    .bind(nome)
    .bind(tipo)
    .bind(capacidade)
    .bind(gestor_responsavel_id)
    .bind(espaco_id)
    .execute(pool)
    .await;

    let resultado = match resultado {
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::ArgumentoInvalido(
                "gestor_responsavel_id não corresponde a um usuário existente".to_string(),
            ));
        }
        outro => outro?,
    };

    if resultado.rows_affected() == 0 {
        return Err(AppError::NaoEncontrado("espaço"));
    }

    buscar_por_id(pool, espaco_id).await?.ok_or(AppError::Interno)
}

/// Remoção bloqueada enquanto houver reservas pendentes ou confirmadas.
/// Reservas canceladas/recusadas não bloqueiam, mas referenciam o espaço
/// (FK); o histórico inativo sai junto, na mesma transação. Os DELETEs
/// carregam a guarda para não abrir janela entre verificação e remoção.
pub async fn apagar(pool: &SqlitePool, espaco_id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM reservas
        WHERE espaco_id = ?1
          AND NOT EXISTS (
              SELECT 1 FROM reservas
              WHERE espaco_id = ?1 AND status IN ('pendente', 'confirmada')
          )
        "#,
    )
    .bind(espaco_id)
    .execute(&mut *tx)
    .await?;

    let removidas = sqlx::query(
        r#"
        DELETE FROM espacos
        WHERE espaco_id = ?1
          AND NOT EXISTS (
              SELECT 1 FROM reservas
              WHERE espaco_id = ?1 AND status IN ('pendente', 'confirmada')
          )
        "#,
    )
    .bind(espaco_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if removidas == 0 {
        // Distingue "não existe" de "existe mas está referenciado". O drop
        // da transação desfaz qualquer DELETE do histórico.
        let existe: Option<i64> =
            sqlx::query_scalar("SELECT espaco_id FROM espacos WHERE espaco_id = ?")
                .bind(espaco_id)
                .fetch_optional(&mut *tx)
                .await?;
        if existe.is_some() {
            return Err(AppError::Conflito(
                "O espaço possui reservas pendentes ou confirmadas e não pode ser removido"
                    .to_string(),
            ));
        }
        return Err(AppError::NaoEncontrado("espaço"));
    }

    tx.commit().await?;
    tracing::info!("Espaço {} removido", espaco_id);
    Ok(())
}

fn validar_capacidade(capacidade: Option<i64>) -> AppResult<()> {
    if let Some(c) = capacidade {
        if c <= 0 {
            return Err(AppError::ArgumentoInvalido(
                "capacidade deve ser um inteiro positivo".to_string(),
            ));
        }
    }
    Ok(())
}
