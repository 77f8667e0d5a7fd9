//! Environment interpolation
//!
//! A string scalar is an interpolation token when the whole scalar has the form:
//! - `${NAME}` - value of the environment variable, or empty
//! - `${NAME:default}` - value of the environment variable, or `default`
//!
//! The token must start at offset 0 and its first `}` must be the last
//! character. `prefix-${NAME}` and `${A}-${B}` are plain strings.
//! A variable that is set but empty counts as unset.

use std::collections::HashMap;

use crate::value::Value;

/// Source of environment variables
pub trait Environment: Send + Sync {
    /// Look up a variable. `None` when the variable is not set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are decoded lossily, so a set variable
/// never silently falls back to a token's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

/// A fixed set of variables, independent of the process environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// A parsed `${NAME}` or `${NAME:default}` token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Environment variable name
    pub name: &'a str,
    /// Text after the first `:`, if there was one
    pub default: Option<&'a str>,
}

impl Token<'_> {
    /// Resolve against `env`: the variable if set and non-empty, else the default
    pub fn resolve(&self, env: &dyn Environment) -> String {
        match env.lookup(self.name) {
            Some(value) if !value.is_empty() => {
                log::trace!("Resolved ${{{}}} from the environment", self.name);
                value
            }
            _ => {
                log::trace!("${{{}}} is unset, using default", self.name);
                self.default.unwrap_or_default().to_string()
            }
        }
    }
}

/// Parse `s` as a full-span interpolation token
pub fn parse_token(s: &str) -> Option<Token<'_>> {
    let inner = s.strip_prefix("${")?;
    // The first closing brace must be the final character
    let close = inner.find('}')?;
    if close != inner.len() - 1 {
        return None;
    }
    let inner = &inner[..close];

    Some(match inner.split_once(':') {
        Some((name, default)) => Token {
            name,
            default: Some(default),
        },
        None => Token {
            name: inner,
            default: None,
        },
    })
}

/// Check whether a string is an interpolation token
pub fn is_token(s: &str) -> bool {
    parse_token(s).is_some()
}

/// Resolve a string: tokens are substituted, anything else is returned unchanged
pub fn resolve_str(s: &str, env: &dyn Environment) -> String {
    match parse_token(s) {
        Some(token) => token.resolve(env),
        None => s.to_string(),
    }
}

/// Resolve a scalar to its string form.
///
/// Strings go through [`resolve_str`], other scalars are rendered canonically.
/// Returns `None` for mappings and sequences.
pub fn resolve_scalar(value: &Value, env: &dyn Environment) -> Option<String> {
    match value {
        Value::String(s) => Some(resolve_str(s, env)),
        other => other.to_scalar_string(),
    }
}

/// Infer a typed value from resolved text.
///
/// Priority: integer, float (whole floats narrow to integer), boolean
/// (case-insensitive), string. Integers above `i64::MAX` stay exact.
pub fn infer_scalar(s: &str) -> Value {
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(u) = s.parse::<u64>() {
        return Value::Unsigned(u);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return normalize_float(f);
        }
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(s.to_string())
}

/// Narrow a whole float to an integer when it fits in `i64`
pub fn normalize_float(f: f64) -> Value {
    // 2^63 is exactly representable; anything at or above it overflows i64
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        Value::Integer(f as i64)
    } else {
        Value::Float(f)
    }
}
