//! varmap-core: inserción validada de pares clave/valor.
//!
//! Recibe una secuencia plana de argumentos (`k1, v1, k2, v2, ...`) tal como
//! llega de una llamada variádica dinámica, valida aridad y tipos, y reenvía
//! cada par a un `PairSink` provisto por el caller.

pub mod constraint;
pub mod errors;
pub mod inserter;
pub mod property;
pub mod sink;

pub use constraint::{matching, Any, Boolean, Constraint, Integer, Matching, Number, Text, Typed, ValueKind};
pub use errors::{PairError, SinkError};
pub use inserter::{put_pairs, put_slice, InsertMode, PairInserter};
pub use property::MapProperty;
pub use sink::{from_fn, try_from_fn, FnSink, PairSink, TryFnSink};
