//! Contrato para destinos de pares clave/valor.
//!
//! Mapa plano, mapa diferido (`MapProperty`) o closure: todos son un
//! `PairSink`, así la validación vive en un solo lugar (`inserter`).

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::errors::SinkError;

/// Destino que acepta un par por llamada.
pub trait PairSink<K, V> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError>;
}

impl<K, V, T: PairSink<K, V> + ?Sized> PairSink<K, V> for &mut T {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        (**self).accept(key, value)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> PairSink<K, V> for HashMap<K, V, S> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.insert(key, value);
        Ok(())
    }
}

impl<K: Ord, V> PairSink<K, V> for BTreeMap<K, V> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.insert(key, value);
        Ok(())
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> PairSink<K, V> for IndexMap<K, V, S> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.insert(key, value);
        Ok(())
    }
}

impl PairSink<String, Value> for Map<String, Value> {
    fn accept(&mut self, key: String, value: Value) -> Result<(), SinkError> {
        self.insert(key, value);
        Ok(())
    }
}

/// Conserva todos los pares (incluidas claves repetidas) en orden de llegada.
impl<K, V> PairSink<K, V> for Vec<(K, V)> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.push((key, value));
        Ok(())
    }
}

/// Adaptador para closures infalibles, ver `from_fn`.
#[derive(Debug, Clone)]
pub struct FnSink<F>(F);

pub fn from_fn<F>(f: F) -> FnSink<F> {
    FnSink(f)
}

impl<K, V, F: FnMut(K, V)> PairSink<K, V> for FnSink<F> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        (self.0)(key, value);
        Ok(())
    }
}

/// Adaptador para closures que pueden rechazar un par, ver `try_from_fn`.
#[derive(Debug, Clone)]
pub struct TryFnSink<F>(F);

pub fn try_from_fn<F>(f: F) -> TryFnSink<F> {
    TryFnSink(f)
}

impl<K, V, F: FnMut(K, V) -> Result<(), SinkError>> PairSink<K, V> for TryFnSink<F> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        (self.0)(key, value)
    }
}
