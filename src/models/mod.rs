// src/models/mod.rs
pub mod departamento;
pub mod espaco;
pub mod reserva;
pub mod usuario;
