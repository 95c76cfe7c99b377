//! Domain layer: models and ports, no I/O.

pub mod models;
pub mod ports;
