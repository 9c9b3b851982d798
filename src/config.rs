//! Configuración central.
//! Carga variables de entorno (.env) y expone una instancia perezosa (`CONFIG`).
//!
//! Variables:
//! - `VARMAP_INSERT_MODE`: `forward` (por defecto) o `atomic`.

use std::env;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use varmap_core::InsertMode;

use crate::errors::AppError;

pub const INSERT_MODE_VAR: &str = "VARMAP_INSERT_MODE";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Política de reenvío usada por `crate::inserter`.
    pub insert_mode: InsertMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construye la configuración a partir de una función de lookup
    /// (permite testear sin tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let insert_mode = match lookup(INSERT_MODE_VAR) {
            Some(raw) => raw.parse::<InsertMode>().map_err(|e| AppError::Config(format!("{INSERT_MODE_VAR}: {e}")))?,
            None => InsertMode::default(),
        };
        Ok(Self { insert_mode })
    }

    /// Como `from_lookup`, pero ante un valor inválido avisa y usa los defaults.
    pub fn from_lookup_or_default<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(lookup).unwrap_or_else(|e| {
            warn!("{e}; falling back to default configuration");
            Self::default()
        })
    }
}

/// Instancia global perezosa; ante una configuración inválida usa los defaults.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    Lazy::force(&DOTENV_LOADED);
    AppConfig::from_lookup_or_default(|name| env::var(name).ok())
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
