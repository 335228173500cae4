// src/services/usuario_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{TipoUsuario, Usuario, UsuarioPublico},
    services::auth_service,
};
use sqlx::SqlitePool;

const COLUNAS_PUBLICAS: &str = r#"
    u.usuario_id, u.nome, u.email, u.tipo, u.departamento_id, d.nome AS departamento_nome
    FROM usuarios u
    LEFT JOIN departamentos d ON d.departamento_id = u.departamento_id
"#;

pub async fn listar(pool: &SqlitePool) -> AppResult<Vec<UsuarioPublico>> {
    let sql = format!("SELECT {COLUNAS_PUBLICAS} ORDER BY u.nome ASC");
    let usuarios = sqlx::query_as::<_, UsuarioPublico>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(usuarios)
}

pub async fn buscar_publico_por_id(
    pool: &SqlitePool,
    usuario_id: i64,
) -> AppResult<Option<UsuarioPublico>> {
    let sql = format!("SELECT {COLUNAS_PUBLICAS} WHERE u.usuario_id = ?");
    let usuario = sqlx::query_as::<_, UsuarioPublico>(&sql)
        .bind(usuario_id)
        .fetch_optional(pool)
        .await?;
    Ok(usuario)
}

/// Busca o registo completo (com senha_hash). Uso interno apenas.
pub async fn buscar_por_email(pool: &SqlitePool, email: &str) -> AppResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(
        "SELECT usuario_id, nome, email, senha_hash, tipo, departamento_id
         FROM usuarios WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(usuario)
}

pub async fn criar(
    pool: &SqlitePool,
    nome: &str,
    email: &str,
    senha: &str,
    tipo: TipoUsuario,
    departamento_id: Option<i64>,
) -> AppResult<UsuarioPublico> {
    let senha_hash = auth_service::hash_senha(senha).await?;

    let resultado = sqlx::query(
        "INSERT INTO usuarios (nome, email, senha_hash, tipo, departamento_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(nome)
    .bind(email)
    .bind(&senha_hash)
    .bind(tipo)
    .bind(departamento_id)
    .execute(pool)
    .await;

    let resultado = match resultado {
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Falha ao criar usuário: email '{}' já cadastrado", email);
            return Err(AppError::Conflito(
                "Já existe um usuário com este email".to_string(),
            ));
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::ArgumentoInvalido(
                "departamento_id não corresponde a um departamento existente".to_string(),
            ));
        }
        outro => outro?,
    };

    let usuario_id = resultado.last_insert_rowid();
    tracing::info!("Usuário {} ('{}') criado", usuario_id, email);

    buscar_publico_por_id(pool, usuario_id)
        .await?
        .ok_or(AppError::Interno)
}

/// Atualização de cadastro. Senha só é trocada quando `senha` vem preenchida;
/// o hash atual nunca é devolvido nem sobrescrito em branco.
pub async fn atualizar(
    pool: &SqlitePool,
    usuario_id: i64,
    nome: &str,
    email: &str,
    senha: Option<&str>,
    tipo: TipoUsuario,
    departamento_id: Option<i64>,
) -> AppResult<UsuarioPublico> {
    let novo_hash = match senha {
        Some(s) if !s.is_empty() => Some(auth_service::hash_senha(s).await?),
        _ => None,
    };

    let resultado = sqlx::query(
        "UPDATE usuarios
         SET nome = ?, email = ?, tipo = ?, departamento_id = ?,
             senha_hash = COALESCE(?, senha_hash)
         WHERE usuario_id = ?",
    )
    .bind(nome)
    .bind(email)
    .bind(tipo)
    .bind(departamento_id)
    .bind(novo_hash)
    .bind(usuario_id)
    .execute(pool)
    .await;

    let resultado = match resultado {
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Conflito(
                "Já existe um usuário com este email".to_string(),
            ));
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            return Err(AppError::ArgumentoInvalido(
                "departamento_id não corresponde a um departamento existente".to_string(),
            ));
        }
        outro => outro?,
    };

    if resultado.rows_affected() == 0 {
        return Err(AppError::NaoEncontrado("usuário"));
    }

    buscar_publico_por_id(pool, usuario_id)
        .await?
        .ok_or(AppError::Interno)
}

/// Remove a conta. Os tokens de login saem junto (referenciam o usuário);
/// reservas e espaços que apontam para ele bloqueiam a remoção.
pub async fn apagar(pool: &SqlitePool, usuario_id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tokens WHERE usuario_id = ?")
        .bind(usuario_id)
        .execute(&mut *tx)
        .await?;

    let resultado = sqlx::query("DELETE FROM usuarios WHERE usuario_id = ?")
        .bind(usuario_id)
        .execute(&mut *tx)
        .await;

    let removidas = match resultado {
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            // Rollback implícito: os tokens ficam intactos
            return Err(AppError::Conflito(
                "O usuário é referenciado por reservas ou espaços e não pode ser removido"
                    .to_string(),
            ));
        }
        outro => outro?.rows_affected(),
    };

    if removidas == 0 {
        return Err(AppError::NaoEncontrado("usuário"));
    }

    tx.commit().await?;
    tracing::info!("Usuário {} removido", usuario_id);
    Ok(())
}

/// Cria a primeira conta de gestor quando a tabela está vazia e as variáveis
/// GESTOR_INICIAL_EMAIL / GESTOR_INICIAL_SENHA estão definidas. Sem elas o
/// arranque segue normalmente.
pub async fn garantir_gestor_inicial(pool: &SqlitePool) -> AppResult<()> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
        .fetch_one(pool)
        .await?;
    if total > 0 {
        return Ok(());
    }

    let (email, senha) = match (
        std::env::var("GESTOR_INICIAL_EMAIL"),
        std::env::var("GESTOR_INICIAL_SENHA"),
    ) {
        (Ok(e), Ok(s)) => (e, s),
        _ => {
            tracing::warn!(
                "Nenhum usuário cadastrado e GESTOR_INICIAL_EMAIL/SENHA não definidas; \
                 a área de gestão ficará inacessível até criar um gestor manualmente"
            );
            return Ok(());
        }
    };

    criar(pool, "Gestor Inicial", &email, &senha, TipoUsuario::Gestor, None).await?;
    tracing::info!("✅ Conta de gestor inicial criada ({})", email);
    Ok(())
}
