// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::TipoUsuario,
    services::usuario_service,
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Validade de um token de acesso emitido no login.
const VALIDADE_TOKEN_HORAS: i64 = 24;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verificar_senha(senha: &str, hash_guardado: &str) -> AppResult<bool> {
    let senha = senha.to_string();
    let hash_guardado = hash_guardado.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&senha, &hash_guardado))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (verificar_senha): {:?}", e);
            AppError::Interno
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::HashDeSenha
        })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_senha(senha: &str) -> AppResult<String> {
    let senha = senha.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (hash_senha): {:?}", e);
            AppError::Interno
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::HashDeSenha
        })
}

/// Autentica por email + senha e emite um token opaco com validade de 24h.
/// A mensagem de erro é a mesma para email desconhecido e senha errada.
pub async fn autenticar(pool: &SqlitePool, email: &str, senha: &str) -> AppResult<String> {
    let usuario = usuario_service::buscar_por_email(pool, email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login falhou: email desconhecido");
            AppError::CredenciaisInvalidas
        })?;

    if !verificar_senha(senha, &usuario.senha_hash).await? {
        tracing::warn!("Login falhou: senha incorreta para '{}'", usuario.email);
        return Err(AppError::CredenciaisInvalidas);
    }

    let token = Uuid::new_v4().to_string();
    let expira_em = Utc::now().naive_utc() + Duration::hours(VALIDADE_TOKEN_HORAS);

    sqlx::query("INSERT INTO tokens (token, usuario_id, expira_em) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(usuario.usuario_id)
        .bind(expira_em)
        .execute(pool)
        .await?;

    tracing::info!("Login bem-sucedido para usuário {}", usuario.usuario_id);
    Ok(token)
}

/// Resolve um token para a identidade (id + tipo) do usuário, se ainda válido.
pub async fn verificar_token(
    pool: &SqlitePool,
    token: &str,
) -> AppResult<Option<(i64, TipoUsuario)>> {
    let agora = Utc::now().naive_utc();
    let identidade = sqlx::query_as::<_, (i64, TipoUsuario)>(
        r#"
        SELECT t.usuario_id, u.tipo
        FROM tokens t
        JOIN usuarios u ON u.usuario_id = t.usuario_id
        WHERE t.token = ? AND t.expira_em > ?
        "#,
    )
    .bind(token)
    .bind(agora)
    .fetch_optional(pool)
    .await?;

    Ok(identidade)
}

/// Remove tokens expirados. Chamada periodicamente pela task de limpeza.
pub async fn remover_tokens_expirados(pool: &SqlitePool) -> AppResult<u64> {
    let agora = Utc::now().naive_utc();
    let removidos = sqlx::query("DELETE FROM tokens WHERE expira_em <= ?")
        .bind(agora)
        .execute(pool)
        .await?
        .rows_affected();

    if removidos > 0 {
        tracing::debug!("Limpeza de tokens: {} removidos", removidos);
    }
    Ok(removidos)
}
