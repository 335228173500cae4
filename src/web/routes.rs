// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, departamento_handlers, espaco_handlers, mw_auth, mw_gestor,
        reserva_handlers, usuario_handlers,
    },
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas públicas ---
    // A consulta de espaços e departamentos é aberta; tudo o resto exige token.
    let rotas_publicas = Router::new()
        .route("/api/login", post(auth_handlers::login))
        .route("/api/espacos", get(espaco_handlers::listar))
        .route("/api/espacos/{id}", get(espaco_handlers::buscar))
        .route("/api/departamentos", get(departamento_handlers::listar))
        .route("/api/departamentos/{id}", get(departamento_handlers::buscar));

    // --- Rotas de gestor ---
    // Exigem login E perfil gestor (mw_auth é aplicado no router pai)
    let rotas_gestor = Router::new()
        .route("/api/espacos", post(espaco_handlers::criar))
        .route(
            "/api/espacos/{id}",
            put(espaco_handlers::atualizar).delete(espaco_handlers::apagar),
        )
        .route(
            "/api/usuarios",
            get(usuario_handlers::listar).post(usuario_handlers::criar),
        )
        .route(
            "/api/usuarios/{id}",
            get(usuario_handlers::buscar)
                .put(usuario_handlers::atualizar)
                .delete(usuario_handlers::apagar),
        )
        .route("/api/departamentos", post(departamento_handlers::criar))
        .route(
            "/api/departamentos/{id}",
            put(departamento_handlers::atualizar).delete(departamento_handlers::apagar),
        )
        .route(
            "/api/reservas/{id}/status",
            put(reserva_handlers::atualizar_status),
        )
        .route_layer(middleware::from_fn(mw_gestor::exigir_gestor));

    // --- Rotas autenticadas ---
    let rotas_autenticadas = Router::new()
        .route("/api/me", get(auth_handlers::me))
        .route(
            "/api/reservas",
            get(reserva_handlers::listar).post(reserva_handlers::criar),
        )
        .route("/api/reservas/{id}", delete(reserva_handlers::cancelar))
        .merge(rotas_gestor)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::exigir_autenticacao,
        ));

    Router::new()
        .merge(rotas_publicas)
        .merge(rotas_autenticadas)
        .with_state(app_state)
}
