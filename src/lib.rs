//! varmap
//!
//! Librería de fachada sobre `varmap-core`:
//! - Re-exporta el inserter, las restricciones y los sinks.
//! - Expone `config` (modo de inserción desde entorno / .env).
//! - Expone `errors` y el comando `cli`.

pub mod cli;
pub mod config;
pub mod errors;

pub use varmap_core::*;

/// Crea un `PairInserter` con el modo de inserción configurado en `CONFIG`.
pub fn inserter<KC: Constraint, VC: Constraint>(key: KC, value: VC) -> PairInserter<KC, VC> {
    inserter_with(&config::CONFIG, key, value)
}

/// Igual que `inserter` pero con una configuración explícita.
pub fn inserter_with<KC: Constraint, VC: Constraint>(config: &config::AppConfig, key: KC, value: VC) -> PairInserter<KC, VC> {
    PairInserter::new(key, value).mode(config.insert_mode)
}
