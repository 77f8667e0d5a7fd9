//! Whole-tree resolution and typed projection
//!
//! [`Projector::resolve_tree`] rewrites every node of a profile into a new
//! tree: tokens are substituted, every string leaf is re-typed from its
//! resolved text and whole floats become integers. [`Projector::project`] then hands that tree to serde_yaml to
//! build a caller-defined type.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::interpolation::{self, Environment};
use crate::value::Value;

/// Resolves whole profile trees against an environment
#[derive(Clone, Copy)]
pub struct Projector<'a> {
    env: &'a dyn Environment,
}

impl<'a> Projector<'a> {
    /// Create a projector that looks variables up in `env`
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    /// Build a fully resolved copy of `value`
    pub fn resolve_tree(&self, value: &Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut resolved = IndexMap::with_capacity(map.len());
                for (key, val) in map {
                    resolved.insert(key.clone(), self.resolve_tree(val));
                }
                Value::Mapping(resolved)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.iter().map(|item| self.resolve_tree(item)).collect())
            }
            Value::String(s) => {
                interpolation::infer_scalar(&interpolation::resolve_str(s, self.env))
            }
            Value::Float(f) => interpolation::normalize_float(*f),
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Unsigned(_) => value.clone(),
        }
    }

    /// Resolve `value` and bind it to `T`
    pub fn project<T: DeserializeOwned>(&self, value: &Value) -> Result<T> {
        let resolved = self.resolve_tree(value);
        bind(&resolved)
    }
}

/// Serialize a resolved tree to YAML and deserialize it into `T`.
///
/// Going through YAML text lets string fields accept numeric and boolean
/// scalars, the same way they would when reading a file directly.
pub fn bind<T: DeserializeOwned>(resolved: &Value) -> Result<T> {
    let yaml = serde_yaml::to_string(resolved).map_err(|e| Error::marshal(e.to_string()))?;
    serde_yaml::from_str(&yaml).map_err(|e| Error::unmarshal(e.to_string()))
}
