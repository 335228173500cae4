// src/services/mod.rs
pub mod auth_service;
pub mod departamento_service;
pub mod espaco_service;
pub mod reserva_service;
pub mod usuario_service;
