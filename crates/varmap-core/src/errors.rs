//! Errores del inserter y de los sinks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraint::ValueKind;

/// Rechazo de un par por parte de un `PairSink`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum SinkError {
    #[error("property is finalized and can no longer be modified")] Finalized,
    #[error("sink rejected pair: {0}")] Rejected(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PairError {
    /// La entrada no es una secuencia indexable (escalar, objeto, ...).
    #[error("expecting a sequence of alternating keys and values, but got: {found}")]
    InvalidShape { found: ValueKind },
    #[error("expected an even number of arguments, but got {len}; vararg map puts must be given keys each followed by their value")]
    UnbalancedPairs { len: usize },
    #[error("key at position {position} is not {expected} (found {found})")]
    KeyTypeMismatch { position: usize, expected: String, found: ValueKind },
    #[error("value at position {position} is not {expected} (found {found})")]
    ValueTypeMismatch { position: usize, expected: String, found: ValueKind },
    /// `position` es la posición de la clave del par rechazado.
    #[error("sink rejected pair at position {position}: {source}")]
    Sink {
        position: usize,
        #[source]
        source: SinkError,
    },
}

impl PairError {
    /// Posición ofensiva dentro de la secuencia, si aplica.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::KeyTypeMismatch { position, .. }
            | Self::ValueTypeMismatch { position, .. }
            | Self::Sink { position, .. } => Some(*position),
            Self::InvalidShape { .. } | Self::UnbalancedPairs { .. } => None,
        }
    }
}
