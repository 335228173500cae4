// src/services/reserva_service.rs
//
// Motor de reservas: toda a validação de pedido (capacidade, tipo de espaço,
// sobreposição de horário) e as transições de status vivem aqui.
use crate::{
    error::{AppError, AppResult},
    models::{
        espaco::TipoEspaco,
        reserva::{FiltroReservas, NovaReserva, Reserva, ReservaDetalhada, StatusReserva},
        usuario::TipoUsuario,
    },
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

/// Antecedência mínima para o solicitante cancelar a própria reserva.
const ANTECEDENCIA_CANCELAMENTO_HORAS: i64 = 12;

const COLUNAS_RESERVA: &str = "reserva_id, espaco_id, solicitante_id, data_hora_inicio, \
     data_hora_fim, finalidade, num_participantes, status, aprovado_por";

/// Valida e persiste um pedido de reserva. A ordem das regras importa: a
/// primeira que falhar define a resposta.
///
/// A verificação de sobreposição e o INSERT são um único statement guardado
/// (`INSERT ... SELECT ... WHERE NOT EXISTS`), executado atomicamente pelo
/// SQLite. Dois pedidos simultâneos para o mesmo horário nunca passam os dois:
/// o perdedor vê zero linhas inseridas e recebe o conflito.
pub async fn criar_reserva(pool: &SqlitePool, nova: NovaReserva) -> AppResult<Reserva> {
    if nova.data_hora_fim <= nova.data_hora_inicio {
        return Err(AppError::ArgumentoInvalido(
            "data_hora_fim deve ser posterior a data_hora_inicio".to_string(),
        ));
    }
    if nova.num_participantes < 1 {
        return Err(AppError::ArgumentoInvalido(
            "num_participantes deve ser um inteiro positivo".to_string(),
        ));
    }

    // 1. O espaço existe?
    let espaco = sqlx::query_as::<_, (TipoEspaco, Option<i64>)>(
        "SELECT tipo, capacidade FROM espacos WHERE espaco_id = ?",
    )
    .bind(nova.espaco_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NaoEncontrado("espaço"))?;
    let (tipo_espaco, capacidade) = espaco;

    // 2. O solicitante existe?
    let tipo_solicitante = sqlx::query_as::<_, (TipoUsuario,)>(
        "SELECT tipo FROM usuarios WHERE usuario_id = ?",
    )
    .bind(nova.solicitante_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NaoEncontrado("usuário"))?
    .0;

    // 3. Capacidade do espaço
    if let Some(capacidade) = capacidade {
        if nova.num_participantes > capacidade {
            return Err(AppError::RegraDeNegocio(format!(
                "O espaço comporta no máximo {} participantes",
                capacidade
            )));
        }
    }

    // 4. Laboratórios só aceitam reservas de professores
    if tipo_espaco == TipoEspaco::Laboratorio && tipo_solicitante != TipoUsuario::Professor {
        return Err(AppError::RegraDeNegocio(
            "Apenas professores podem reservar laboratórios".to_string(),
        ));
    }

    let status = if tipo_espaco.aprovacao_automatica() {
        StatusReserva::Confirmada
    } else {
        StatusReserva::Pendente
    };

    // 5. Sobreposição + INSERT, atomicamente. Teste de intervalo meio-aberto:
    // reservas encostadas (fim == início) não conflitam.
    let resultado = sqlx::query(
        r#"
        INSERT INTO reservas
            (espaco_id, solicitante_id, data_hora_inicio, data_hora_fim,
             finalidade, num_participantes, status)
        SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
        WHERE NOT EXISTS (
            SELECT 1 FROM reservas
            WHERE espaco_id = ?1
              AND status IN ('pendente', 'confirmada')
              AND data_hora_inicio < ?4
              AND data_hora_fim > ?3
        )
        "#,
    )
    .bind(nova.espaco_id)
    .bind(nova.solicitante_id)
    .bind(nova.data_hora_inicio)
    .bind(nova.data_hora_fim)
    .bind(&nova.finalidade)
    .bind(nova.num_participantes)
    .bind(status)
    .execute(pool)
    .await?;

    if resultado.rows_affected() == 0 {
        tracing::debug!(
            "Conflito de horário no espaço {} ({} a {})",
            nova.espaco_id,
            nova.data_hora_inicio,
            nova.data_hora_fim
        );
        return Err(AppError::Conflito(
            "O espaço já possui reserva no horário solicitado".to_string(),
        ));
    }

    let reserva_id = resultado.last_insert_rowid();
    tracing::info!(
        "Reserva {} criada no espaço {} com status '{}'",
        reserva_id,
        nova.espaco_id,
        status.as_str()
    );

    buscar_por_id(pool, reserva_id).await?.ok_or(AppError::Interno)
}

pub async fn buscar_por_id(pool: &SqlitePool, reserva_id: i64) -> AppResult<Option<Reserva>> {
    let sql = format!("SELECT {COLUNAS_RESERVA} FROM reservas WHERE reserva_id = ?");
    let reserva = sqlx::query_as::<_, Reserva>(&sql)
        .bind(reserva_id)
        .fetch_optional(pool)
        .await?;
    Ok(reserva)
}

/// Transição de status feita por um gestor. Só `confirmada`, `cancelada` e
/// `recusada` são destinos válidos; qualquer outro valor é rejeitado antes de
/// tocar na base. Não há revalidação de capacidade/sobreposição na transição.
pub async fn atualizar_status(
    pool: &SqlitePool,
    reserva_id: i64,
    novo_status: &str,
    aprovador_id: i64,
) -> AppResult<Reserva> {
    let status = StatusReserva::parse(novo_status)
        .filter(|s| {
            matches!(
                s,
                StatusReserva::Confirmada | StatusReserva::Cancelada | StatusReserva::Recusada
            )
        })
        .ok_or_else(|| {
            AppError::ArgumentoInvalido(format!(
                "Status inválido: '{}'. Valores aceites: confirmada, cancelada, recusada",
                novo_status
            ))
        })?;

    let alteradas = sqlx::query(
        "UPDATE reservas SET status = ?, aprovado_por = ? WHERE reserva_id = ?",
    )
    .bind(status)
    .bind(aprovador_id)
    .bind(reserva_id)
    .execute(pool)
    .await?
    .rows_affected();

    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("reserva"));
    }

    tracing::info!(
        "Reserva {} passou a '{}' (gestor {})",
        reserva_id,
        status.as_str(),
        aprovador_id
    );

    buscar_por_id(pool, reserva_id).await?.ok_or(AppError::Interno)
}

/// Cancelamento pelo próprio solicitante: exige mais de 12 horas de
/// antecedência e remove o registo definitivamente.
pub async fn cancelar(pool: &SqlitePool, reserva_id: i64, solicitante_id: i64) -> AppResult<()> {
    let reserva = sqlx::query_as::<_, (i64, chrono::NaiveDateTime)>(
        "SELECT solicitante_id, data_hora_inicio FROM reservas WHERE reserva_id = ?",
    )
    .bind(reserva_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NaoEncontrado("reserva"))?;
    let (dono_id, data_hora_inicio) = reserva;

    if dono_id != solicitante_id {
        return Err(AppError::AcessoNegado(
            "Apenas o solicitante pode cancelar a própria reserva",
        ));
    }

    let agora = Utc::now().naive_utc();
    if agora + Duration::hours(ANTECEDENCIA_CANCELAMENTO_HORAS) >= data_hora_inicio {
        return Err(AppError::JanelaDeCancelamento);
    }

    sqlx::query("DELETE FROM reservas WHERE reserva_id = ?")
        .bind(reserva_id)
        .execute(pool)
        .await?;

    tracing::info!("Reserva {} cancelada pelo solicitante {}", reserva_id, solicitante_id);
    Ok(())
}

/// Listagem com filtros opcionais combinados por AND e ordenada da reserva
/// mais recente para a mais antiga. As condições usam sempre placeholders.
pub async fn listar(
    pool: &SqlitePool,
    filtro: &FiltroReservas,
) -> AppResult<Vec<ReservaDetalhada>> {
    let mut sql = String::from(
        "SELECT r.reserva_id, r.espaco_id, e.nome AS espaco_nome, \
         r.solicitante_id, u.nome AS solicitante_nome, \
         r.data_hora_inicio, r.data_hora_fim, r.finalidade, \
         r.num_participantes, r.status, r.aprovado_por \
         FROM reservas r \
         JOIN espacos e ON e.espaco_id = r.espaco_id \
         JOIN usuarios u ON u.usuario_id = r.solicitante_id",
    );

    let mut condicoes: Vec<String> = Vec::new();
    if filtro.espaco_id.is_some() {
        condicoes.push("r.espaco_id = ?".to_string());
    }
    if filtro.solicitante_id.is_some() {
        condicoes.push("r.solicitante_id = ?".to_string());
    }
    if let Some(status) = &filtro.status {
        if !status.is_empty() {
            let marcadores = vec!["?"; status.len()].join(", ");
            condicoes.push(format!("r.status IN ({marcadores})"));
        }
    }

    if !condicoes.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&condicoes.join(" AND "));
    }
    sql.push_str(" ORDER BY r.data_hora_inicio DESC");

    let mut query = sqlx::query_as::<_, ReservaDetalhada>(&sql);
    if let Some(espaco_id) = filtro.espaco_id {
        query = query.bind(espaco_id);
    }
    if let Some(solicitante_id) = filtro.solicitante_id {
        query = query.bind(solicitante_id);
    }
    if let Some(status) = &filtro.status {
        for s in status {
            query = query.bind(*s);
        }
    }

    let reservas = query.fetch_all(pool).await?;
    Ok(reservas)
}
