//! Errores de la aplicación (capa sobre `varmap-core`).

pub mod app_error;

pub use app_error::AppError;
