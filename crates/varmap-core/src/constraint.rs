//! Restricciones de tipo aplicadas a cada elemento de la secuencia.
//!
//! Una `Constraint` decide si un valor sin tipo (`serde_json::Value`) es
//! aceptable como clave o valor y, si lo es, extrae su forma tipada. El caller
//! elige la restricción: puede ser fija en tiempo de compilación (`Text`,
//! `Typed<T>`, ...) o elegida en runtime (`ValueKind`).

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clasificación de un valor sin tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    /// Número representable como `i64`.
    Integer,
    Number,
    Text,
    List,
    Object,
    /// Sólo tiene sentido como restricción: acepta cualquier valor.
    Any,
}

impl ValueKind {
    /// Kind concreto de `value` (nunca devuelve `Any`; los enteros son `Integer`).
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::Text,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Object,
        }
    }

    /// `Number` acepta también enteros.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Number => value.is_number(),
            kind => Self::of(value) == *kind,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Text => "text",
            Self::List => "list",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "boolean" | "bool" => Ok(Self::Boolean),
            "integer" | "int" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "text" | "string" => Ok(Self::Text),
            "list" | "array" => Ok(Self::List),
            "object" | "map" => Ok(Self::Object),
            "any" => Ok(Self::Any),
            other => Err(format!("unknown value kind '{other}'")),
        }
    }
}

/// Restricción sobre un elemento de la secuencia.
pub trait Constraint {
    /// Tipo que recibe el sink cuando el valor es aceptado.
    type Output;

    /// Descripción legible usada en los mensajes de error.
    fn describe(&self) -> String;

    /// `None` cuando `value` no satisface la restricción.
    fn extract(&self, value: &Value) -> Option<Self::Output>;
}

impl<C: Constraint + ?Sized> Constraint for &C {
    type Output = C::Output;

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn extract(&self, value: &Value) -> Option<Self::Output> {
        (**self).extract(value)
    }
}

impl Constraint for ValueKind {
    type Output = Value;

    fn describe(&self) -> String {
        self.as_str().to_string()
    }

    fn extract(&self, value: &Value) -> Option<Value> {
        self.accepts(value).then(|| value.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Constraint for Text {
    type Output = String;

    fn describe(&self) -> String {
        ValueKind::Text.describe()
    }

    fn extract(&self, value: &Value) -> Option<String> {
        value.as_str().map(str::to_owned)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Constraint for Integer {
    type Output = i64;

    fn describe(&self) -> String {
        ValueKind::Integer.describe()
    }

    fn extract(&self, value: &Value) -> Option<i64> {
        value.as_i64()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl Constraint for Number {
    type Output = f64;

    fn describe(&self) -> String {
        ValueKind::Number.describe()
    }

    fn extract(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Constraint for Boolean {
    type Output = bool;

    fn describe(&self) -> String {
        ValueKind::Boolean.describe()
    }

    fn extract(&self, value: &Value) -> Option<bool> {
        value.as_bool()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Constraint for Any {
    type Output = Value;

    fn describe(&self) -> String {
        ValueKind::Any.describe()
    }

    fn extract(&self, value: &Value) -> Option<Value> {
        Some(value.clone())
    }
}

/// El tipo estático es la restricción: acepta todo valor que deserialice a `T`.
pub struct Typed<T>(PhantomData<fn() -> T>);

impl<T> Typed<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Typed<T> {}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Constraint for Typed<T> {
    type Output = T;

    fn describe(&self) -> String {
        std::any::type_name::<T>().to_string()
    }

    fn extract(&self, value: &Value) -> Option<T> {
        T::deserialize(value).ok()
    }
}

/// Restricción ad-hoc basada en un predicado con nombre.
pub struct Matching<F> {
    name: String,
    predicate: F,
}

/// Crea una restricción `Matching` con la descripción `name`.
pub fn matching<F>(name: impl Into<String>, predicate: F) -> Matching<F>
where
    F: Fn(&Value) -> bool,
{
    Matching { name: name.into(), predicate }
}

impl<F> fmt::Debug for Matching<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matching").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F: Fn(&Value) -> bool> Constraint for Matching<F> {
    type Output = Value;

    fn describe(&self) -> String {
        self.name.clone()
    }

    fn extract(&self, value: &Value) -> Option<Value> {
        (self.predicate)(value).then(|| value.clone())
    }
}
