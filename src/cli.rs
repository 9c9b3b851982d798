//! Comando `varmap`: ejecuta una inserción de pares sobre un array JSON y
//! devuelve el mapa resultante como JSON.
//!
//! ```text
//! varmap <key-kind> <value-kind> '<json-array>'
//! varmap <key-kind> <value-kind> -        # lee el array de stdin
//! ```

use std::io::Read;

use serde_json::{Map, Value};
use varmap_core::ValueKind;

use crate::config::{AppConfig, CONFIG};
use crate::errors::AppError;

pub const USAGE: &str = "varmap <key-kind> <value-kind> <json-array | ->";

/// Ejecuta el comando con `args` (sin el nombre del binario) y la
/// configuración global. `stdin` sólo se lee cuando el tercer argumento es `-`.
pub fn run<R: Read>(args: &[String], stdin: R) -> Result<String, AppError> {
    run_with(&CONFIG, args, stdin)
}

/// Como `run`, con configuración explícita. En modo forward, si falla tras
/// aplicar algún par, el error incluye los pares ya aplicados.
pub fn run_with<R: Read>(config: &AppConfig, args: &[String], mut stdin: R) -> Result<String, AppError> {
    let [key, value, raw] = args else {
        return Err(AppError::Usage(USAGE.to_string()));
    };
    let key_kind: ValueKind = key.parse().map_err(AppError::Usage)?;
    let value_kind: ValueKind = value.parse().map_err(AppError::Usage)?;

    let raw: Value = if raw == "-" {
        let mut buf = String::new();
        stdin.read_to_string(&mut buf)?;
        serde_json::from_str(&buf)?
    } else {
        serde_json::from_str(raw)?
    };

    let mut pairs: Vec<(Value, Value)> = Vec::new();
    match crate::inserter_with(config, key_kind, value_kind).insert(&mut pairs, &raw) {
        Ok(()) => Ok(serde_json::to_string_pretty(&to_json(pairs))?),
        Err(source) if pairs.is_empty() => Err(AppError::Pairs(source)),
        Err(source) => Err(AppError::PartiallyApplied {
            count: pairs.len(),
            applied: serde_json::to_string(&to_json(pairs))?,
            source,
        }),
    }
}

/// Objeto JSON si todas las claves son texto; si no, lista de `[clave, valor]`.
fn to_json(pairs: Vec<(Value, Value)>) -> Value {
    if pairs.iter().all(|(k, _)| k.is_string()) {
        let mut map = Map::new();
        for (k, v) in pairs {
            if let Value::String(k) = k {
                map.insert(k, v);
            }
        }
        Value::Object(map)
    } else {
        Value::Array(pairs.into_iter().map(|(k, v)| Value::Array(vec![k, v])).collect())
    }
}
