//! `MapProperty`: mapa diferido y finalizable.
//!
//! Modela el sink "envuelto en una propiedad" de las capas de configuración de
//! build: las entradas pueden ser valores fijos o providers que se evalúan al
//! leer. Una vez finalizada, la propiedad congela sus valores y rechaza nuevas
//! escrituras con `SinkError::Finalized`.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;

use crate::errors::SinkError;
use crate::sink::PairSink;

enum Entry<V> {
    Fixed(V),
    Deferred(Box<dyn Fn() -> V>),
}

impl<V: Clone> Entry<V> {
    fn resolve(&self) -> V {
        match self {
            Entry::Fixed(v) => v.clone(),
            Entry::Deferred(provider) => provider(),
        }
    }
}

pub struct MapProperty<K, V> {
    entries: IndexMap<K, Entry<V>>,
    finalized: bool,
}

impl<K: Eq + Hash, V: Clone> MapProperty<K, V> {
    pub fn new() -> Self {
        Self { entries: IndexMap::new(), finalized: false }
    }

    pub fn put(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.ensure_mutable()?;
        self.entries.insert(key, Entry::Fixed(value));
        Ok(())
    }

    /// Registra un valor calculado perezosamente en cada lectura (hasta finalizar).
    pub fn put_provider<F>(&mut self, key: K, provider: F) -> Result<(), SinkError>
    where
        F: Fn() -> V + 'static,
    {
        self.ensure_mutable()?;
        self.entries.insert(key, Entry::Deferred(Box::new(provider)));
        Ok(())
    }

    /// Snapshot resuelto, en orden de primera inserción.
    pub fn get(&self) -> IndexMap<K, V>
    where
        K: Clone,
    {
        self.entries.iter().map(|(k, e)| (k.clone(), e.resolve())).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Resuelve todos los providers una única vez y congela la propiedad.
    /// Idempotente.
    pub fn finalize_value(&mut self) {
        if self.finalized {
            return;
        }
        for entry in self.entries.values_mut() {
            if let Entry::Deferred(provider) = entry {
                let value = provider();
                *entry = Entry::Fixed(value);
            }
        }
        self.finalized = true;
        debug!("map property finalized with {} entries", self.entries.len());
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn ensure_mutable(&self) -> Result<(), SinkError> {
        if self.finalized {
            return Err(SinkError::Finalized);
        }
        Ok(())
    }
}

impl<K: Eq + Hash, V: Clone> Default for MapProperty<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MapProperty<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, e) in &self.entries {
            match e {
                Entry::Fixed(v) => map.entry(k, v),
                Entry::Deferred(_) => map.entry(k, &format_args!("<deferred>")),
            };
        }
        map.finish()?;
        if self.finalized {
            f.write_str(" (finalized)")?;
        }
        Ok(())
    }
}

impl<K: Eq + Hash, V: Clone> PairSink<K, V> for MapProperty<K, V> {
    fn accept(&mut self, key: K, value: V) -> Result<(), SinkError> {
        self.put(key, value)
    }
}
