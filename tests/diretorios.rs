// tests/diretorios.rs
//
// CRUD de espaços, usuários e departamentos: round-trips, unicidade de email,
// tratamento de senha e políticas de remoção.
mod common;

use common::{cria_espaco, cria_usuario, pedido, pool_de_teste, SENHA_DE_TESTE};
use reservas_api::{
    error::AppError,
    models::{espaco::TipoEspaco, usuario::TipoUsuario},
    services::{
        auth_service, departamento_service, espaco_service, reserva_service, usuario_service,
    },
};

#[tokio::test]
async fn espaco_criado_e_lido_com_os_mesmos_campos() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;

    let criado = espaco_service::criar(
        &pool,
        "Lab Física",
        TipoEspaco::Laboratorio,
        Some(24),
        gestor,
    )
    .await
    .unwrap();

    let lido = espaco_service::buscar_por_id(&pool, criado.espaco_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lido.nome, "Lab Física");
    assert_eq!(lido.tipo, TipoEspaco::Laboratorio);
    assert_eq!(lido.capacidade, Some(24));
    assert_eq!(lido.gestor_responsavel_id, gestor);

    assert!(espaco_service::buscar_por_id(&pool, 9999)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn espaco_rejeita_capacidade_nao_positiva() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;

    for capacidade in [0, -5] {
        let erro = espaco_service::criar(
            &pool,
            "Sala",
            TipoEspaco::SalaDeAula,
            Some(capacidade),
            gestor,
        )
        .await
        .unwrap_err();
        assert!(matches!(erro, AppError::ArgumentoInvalido(_)));
    }
}

#[tokio::test]
async fn espaco_atualizado_e_removido() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;
    let sala = cria_espaco(&pool, "Sala 101", TipoEspaco::SalaDeAula, Some(30), gestor).await;

    let atualizado = espaco_service::atualizar(
        &pool,
        sala,
        "Sala 101-B",
        TipoEspaco::SalaDeEstudo,
        Some(20),
        gestor,
    )
    .await
    .unwrap();
    assert_eq!(atualizado.nome, "Sala 101-B");
    assert_eq!(atualizado.capacidade, Some(20));

    let erro = espaco_service::atualizar(&pool, 9999, "X", TipoEspaco::SalaDeAula, None, gestor)
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado("espaço")));

    espaco_service::apagar(&pool, sala).await.unwrap();
    assert!(espaco_service::buscar_por_id(&pool, sala)
        .await
        .unwrap()
        .is_none());

    let erro = espaco_service::apagar(&pool, sala).await.unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado("espaço")));
}

#[tokio::test]
async fn espaco_com_reservas_ativas_nao_pode_ser_removido() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;
    let aluno = cria_usuario(&pool, "Aluno", "aluno@uni.br", TipoUsuario::Aluno).await;
    let sala = cria_espaco(&pool, "Sala 101", TipoEspaco::SalaDeAula, None, gestor).await;

    let reserva = reserva_service::criar_reserva(
        &pool,
        pedido(sala, aluno, "2030-05-10T10:00:00", "2030-05-10T12:00:00", 3),
    )
    .await
    .unwrap();

    let erro = espaco_service::apagar(&pool, sala).await.unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // Depois de recusada, a remoção passa e leva o histórico inativo junto
    reserva_service::atualizar_status(&pool, reserva.reserva_id, "recusada", gestor)
        .await
        .unwrap();
    espaco_service::apagar(&pool, sala).await.unwrap();

    assert!(espaco_service::buscar_por_id(&pool, sala)
        .await
        .unwrap()
        .is_none());
    assert!(reserva_service::buscar_por_id(&pool, reserva.reserva_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn remocao_bloqueada_nao_apaga_o_historico_inativo() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;
    let aluno = cria_usuario(&pool, "Aluno", "aluno@uni.br", TipoUsuario::Aluno).await;
    let sala = cria_espaco(&pool, "Sala 101", TipoEspaco::SalaDeAula, None, gestor).await;

    let recusada = reserva_service::criar_reserva(
        &pool,
        pedido(sala, aluno, "2030-05-10T08:00:00", "2030-05-10T09:00:00", 3),
    )
    .await
    .unwrap();
    reserva_service::atualizar_status(&pool, recusada.reserva_id, "recusada", gestor)
        .await
        .unwrap();

    let ativa = reserva_service::criar_reserva(
        &pool,
        pedido(sala, aluno, "2030-05-10T10:00:00", "2030-05-10T12:00:00", 3),
    )
    .await
    .unwrap();

    let erro = espaco_service::apagar(&pool, sala).await.unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // A reserva ativa bloqueou; a recusada continua na base
    assert!(reserva_service::buscar_por_id(&pool, recusada.reserva_id)
        .await
        .unwrap()
        .is_some());
    assert!(reserva_service::buscar_por_id(&pool, ativa.reserva_id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn email_de_usuario_e_unico() {
    let pool = pool_de_teste().await;
    cria_usuario(&pool, "Ana", "ana@uni.br", TipoUsuario::Aluno).await;

    let erro = usuario_service::criar(
        &pool,
        "Outra Ana",
        "ana@uni.br",
        SENHA_DE_TESTE,
        TipoUsuario::Professor,
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));
}

#[tokio::test]
async fn leitura_de_usuario_nao_expoe_senha_e_resolve_departamento() {
    let pool = pool_de_teste().await;
    let depto = departamento_service::criar(&pool, "Engenharia").await.unwrap();

    let criado = usuario_service::criar(
        &pool,
        "Ana",
        "ana@uni.br",
        SENHA_DE_TESTE,
        TipoUsuario::Professor,
        Some(depto.departamento_id),
    )
    .await
    .unwrap();

    // O tipo público não tem campo de senha; confere o join do departamento
    assert_eq!(criado.departamento_nome.as_deref(), Some("Engenharia"));

    let json = serde_json::to_value(&criado).unwrap();
    assert!(json.get("senha_hash").is_none());
    assert!(json.get("senha").is_none());
}

#[tokio::test]
async fn atualizacao_sem_senha_mantem_a_credencial() {
    let pool = pool_de_teste().await;
    let ana = cria_usuario(&pool, "Ana", "ana@uni.br", TipoUsuario::Aluno).await;

    usuario_service::atualizar(
        &pool,
        ana,
        "Ana Maria",
        "ana@uni.br",
        None,
        TipoUsuario::Professor,
        None,
    )
    .await
    .unwrap();

    // A senha antiga continua válida
    auth_service::autenticar(&pool, "ana@uni.br", SENHA_DE_TESTE)
        .await
        .unwrap();

    // Com senha preenchida, a credencial troca
    usuario_service::atualizar(
        &pool,
        ana,
        "Ana Maria",
        "ana@uni.br",
        Some("nova-senha"),
        TipoUsuario::Professor,
        None,
    )
    .await
    .unwrap();

    let erro = auth_service::autenticar(&pool, "ana@uni.br", SENHA_DE_TESTE)
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::CredenciaisInvalidas));
    auth_service::autenticar(&pool, "ana@uni.br", "nova-senha")
        .await
        .unwrap();
}

#[tokio::test]
async fn usuario_que_ja_logou_pode_ser_removido() {
    let pool = pool_de_teste().await;
    let ana = cria_usuario(&pool, "Ana", "ana@uni.br", TipoUsuario::Aluno).await;

    // Os tokens emitidos no login referenciam a conta; saem junto com ela
    let token = auth_service::autenticar(&pool, "ana@uni.br", SENHA_DE_TESTE)
        .await
        .unwrap();

    usuario_service::apagar(&pool, ana).await.unwrap();

    assert!(usuario_service::buscar_publico_por_id(&pool, ana)
        .await
        .unwrap()
        .is_none());
    assert!(auth_service::verificar_token(&pool, &token)
        .await
        .unwrap()
        .is_none());

    let erro = usuario_service::apagar(&pool, ana).await.unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado("usuário")));
}

#[tokio::test]
async fn usuario_referenciado_nao_pode_ser_removido() {
    let pool = pool_de_teste().await;
    let gestor = cria_usuario(&pool, "Gestora", "gestora@uni.br", TipoUsuario::Gestor).await;
    let aluno = cria_usuario(&pool, "Aluno", "aluno@uni.br", TipoUsuario::Aluno).await;
    let sala = cria_espaco(&pool, "Sala 101", TipoEspaco::SalaDeAula, None, gestor).await;

    reserva_service::criar_reserva(
        &pool,
        pedido(sala, aluno, "2030-05-10T10:00:00", "2030-05-10T12:00:00", 3),
    )
    .await
    .unwrap();

    // Solicitante de reserva e gestor responsável por espaço bloqueiam
    let erro = usuario_service::apagar(&pool, aluno).await.unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    let erro = usuario_service::apagar(&pool, gestor).await.unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // Ambos continuam na base
    assert!(usuario_service::buscar_publico_por_id(&pool, aluno)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn departamento_em_uso_nao_pode_ser_removido() {
    let pool = pool_de_teste().await;
    let depto = departamento_service::criar(&pool, "Engenharia").await.unwrap();

    usuario_service::criar(
        &pool,
        "Ana",
        "ana@uni.br",
        SENHA_DE_TESTE,
        TipoUsuario::Aluno,
        Some(depto.departamento_id),
    )
    .await
    .unwrap();

    let erro = departamento_service::apagar(&pool, depto.departamento_id)
        .await
        .unwrap_err();
    assert!(matches!(erro, AppError::Conflito(_)));

    // Vazio, remove normalmente
    let outro = departamento_service::criar(&pool, "Letras").await.unwrap();
    departamento_service::apagar(&pool, outro.departamento_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn criar_usuario_com_departamento_inexistente_falha() {
    let pool = pool_de_teste().await;

    let erro = usuario_service::criar(
        &pool,
        "Ana",
        "ana@uni.br",
        SENHA_DE_TESTE,
        TipoUsuario::Aluno,
        Some(9999),
    )
    .await
    .unwrap_err();
    assert!(matches!(erro, AppError::ArgumentoInvalido(_)));
}
