//! `PairInserter`: valida una secuencia plana `k1, v1, k2, v2, ...` y reenvía
//! los pares tipados a un `PairSink`, en orden.
//!
//! Orden de validación:
//! 1. la entrada debe ser una secuencia (`InvalidShape`);
//! 2. la longitud debe ser par (`UnbalancedPairs`), antes de reenviar nada;
//! 3. por cada par: clave (`KeyTypeMismatch`), luego valor (`ValueTypeMismatch`).
//!
//! En modo `Forward` los pares ya reenviados antes de un error quedan en el
//! sink (no hay rollback). En modo `Atomic` se valida todo antes de reenviar.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constraint::{Constraint, ValueKind};
use crate::errors::PairError;
use crate::sink::PairSink;

/// Política de reenvío al sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertMode {
    /// Valida y reenvía par a par.
    #[default]
    Forward,
    /// Valida la secuencia completa y sólo entonces reenvía.
    Atomic,
}

impl fmt::Display for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Atomic => f.write_str("atomic"),
        }
    }
}

impl FromStr for InsertMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "atomic" => Ok(Self::Atomic),
            other => Err(format!("unknown insert mode '{other}' (expected 'forward' or 'atomic')")),
        }
    }
}

/// Inserter reutilizable con restricciones de clave/valor fijas.
#[derive(Debug, Clone)]
pub struct PairInserter<KC, VC> {
    key: KC,
    value: VC,
    mode: InsertMode,
}

impl<KC: Constraint, VC: Constraint> PairInserter<KC, VC> {
    pub fn new(key: KC, value: VC) -> Self {
        Self { key, value, mode: InsertMode::default() }
    }

    pub fn mode(mut self, mode: InsertMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn insert_mode(&self) -> InsertMode {
        self.mode
    }

    /// Inserta desde un valor sin tipo; debe ser un array.
    pub fn insert<S>(&self, sink: &mut S, raw: &Value) -> Result<(), PairError>
    where
        S: PairSink<KC::Output, VC::Output> + ?Sized,
    {
        match raw {
            Value::Array(items) => self.insert_slice(sink, items),
            other => {
                let err = PairError::InvalidShape { found: ValueKind::of(other) };
                debug!("vararg pairs rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn insert_slice<S>(&self, sink: &mut S, items: &[Value]) -> Result<(), PairError>
    where
        S: PairSink<KC::Output, VC::Output> + ?Sized,
    {
        debug!(
            "inserting {} vararg elements (key: {}, value: {}, mode: {})",
            items.len(),
            self.key.describe(),
            self.value.describe(),
            self.mode
        );
        let result = self.run(sink, items);
        match &result {
            Ok(()) => debug!("forwarded {} pairs", items.len() / 2),
            Err(err) => debug!("vararg pairs rejected: {err}"),
        }
        result
    }

    fn run<S>(&self, sink: &mut S, items: &[Value]) -> Result<(), PairError>
    where
        S: PairSink<KC::Output, VC::Output> + ?Sized,
    {
        if items.len() % 2 != 0 {
            return Err(PairError::UnbalancedPairs { len: items.len() });
        }
        match self.mode {
            InsertMode::Forward => {
                for position in (0..items.len()).step_by(2) {
                    let (key, value) = self.check_pair(items, position)?;
                    forward(sink, position, key, value)?;
                }
            }
            InsertMode::Atomic => {
                let pairs = (0..items.len())
                    .step_by(2)
                    .map(|position| self.check_pair(items, position).map(|pair| (position, pair)))
                    .collect::<Result<Vec<_>, _>>()?;
                for (position, (key, value)) in pairs {
                    forward(sink, position, key, value)?;
                }
            }
        }
        Ok(())
    }

    /// Valida el par que empieza en `position` (par, con `position + 1` en rango).
    fn check_pair(&self, items: &[Value], position: usize) -> Result<(KC::Output, VC::Output), PairError> {
        let raw_key = &items[position];
        let key = self.key.extract(raw_key).ok_or_else(|| PairError::KeyTypeMismatch {
            position,
            expected: self.key.describe(),
            found: ValueKind::of(raw_key),
        })?;
        let raw_value = &items[position + 1];
        let value = self.value.extract(raw_value).ok_or_else(|| PairError::ValueTypeMismatch {
            position: position + 1,
            expected: self.value.describe(),
            found: ValueKind::of(raw_value),
        })?;
        Ok((key, value))
    }
}

fn forward<K, V, S>(sink: &mut S, position: usize, key: K, value: V) -> Result<(), PairError>
where
    S: PairSink<K, V> + ?Sized,
{
    sink.accept(key, value).map_err(|source| PairError::Sink { position, source })?;
    trace!("forwarded pair at position {position}");
    Ok(())
}

/// `insertPairs`: valida `raw` y reenvía cada par a `sink` (modo `Forward`).
pub fn put_pairs<KC, VC, S>(key: KC, value: VC, sink: &mut S, raw: &Value) -> Result<(), PairError>
where
    KC: Constraint,
    VC: Constraint,
    S: PairSink<KC::Output, VC::Output> + ?Sized,
{
    PairInserter::new(key, value).insert(sink, raw)
}

/// Igual que `put_pairs` pero sobre una secuencia ya tipada como slice.
pub fn put_slice<KC, VC, S>(key: KC, value: VC, sink: &mut S, items: &[Value]) -> Result<(), PairError>
where
    KC: Constraint,
    VC: Constraint,
    S: PairSink<KC::Output, VC::Output> + ?Sized,
{
    PairInserter::new(key, value).insert_slice(sink, items)
}
