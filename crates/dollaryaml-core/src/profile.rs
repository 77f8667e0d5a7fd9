//! Main Profile type for dollaryaml
//!
//! A Profile owns one parsed YAML tree and answers path lookups and
//! projections against it, resolving `${NAME:default}` tokens on the way out.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::interpolation::{Environment, ProcessEnv};
use crate::projection::Projector;
use crate::resolver::PathResolver;
use crate::value::Value;

/// Options for building a profile
#[derive(Clone)]
pub struct ProfileOptions {
    /// Log the parsed structure on load and the resolved tree on projection
    pub debug: bool,
    /// Where `${NAME}` tokens are looked up
    pub env: Arc<dyn Environment>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            debug: false,
            env: Arc::new(ProcessEnv),
        }
    }
}

impl fmt::Debug for ProfileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileOptions")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// A loaded profile
#[derive(Debug, Clone)]
pub struct Profile {
    /// The raw (unresolved) tree; always a mapping
    raw: Value,
    options: ProfileOptions,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    /// Create an empty profile reading the process environment
    pub fn new() -> Self {
        Self::with_options(ProfileOptions::default())
    }

    /// Create an empty profile with custom options
    pub fn with_options(options: ProfileOptions) -> Self {
        Self {
            raw: Value::empty_mapping(),
            options,
        }
    }

    /// Replace the environment tokens are resolved against
    pub fn with_env(mut self, env: Arc<dyn Environment>) -> Self {
        self.options.env = env;
        self
    }

    /// Load a profile from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut profile = Self::new();
        profile.read(yaml.as_bytes())?;
        Ok(profile)
    }

    /// Load a profile from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut profile = Self::new();
        profile.read_from_path(path)?;
        Ok(profile)
    }

    /// Replace the tree with the YAML document in `data`
    pub fn read(&mut self, data: &[u8]) -> Result<()> {
        self.raw = parse_document(data)?;
        if self.options.debug {
            log::debug!("Parsed profile structure: {:?}", self.raw);
        }
        Ok(())
    }

    /// Replace the tree with the YAML document stored at `path`
    pub fn read_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::io(path.display().to_string(), &e))?;
        self.read(&data)
            .map_err(|e| e.with_path(path.display().to_string()))?;
        log::debug!("Loaded profile from {}", path.display());
        Ok(())
    }

    /// The raw (unresolved) tree
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Get the resolved string at `path`, or an empty string on any error
    pub fn get(&self, path: &str) -> String {
        self.get_error(path).unwrap_or_default()
    }

    /// Get the resolved string at `path`
    pub fn get_error(&self, path: &str) -> Result<String> {
        PathResolver::new(&self.raw, self.options.env.as_ref()).resolve(path)
    }

    /// Resolve the whole tree, retyping substituted values
    pub fn resolved(&self) -> Value {
        let resolved = Projector::new(self.options.env.as_ref()).resolve_tree(&self.raw);
        if self.options.debug {
            log::debug!("Resolved profile: {:?}", resolved);
        }
        resolved
    }

    /// Resolve the whole tree and bind it to `T`
    pub fn project<T: DeserializeOwned>(&self) -> Result<T> {
        crate::projection::bind(&self.resolved())
    }

    /// Resolve the whole tree and store it in `target`.
    ///
    /// `target` is left untouched when projection fails.
    pub fn project_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<()> {
        *target = self.project()?;
        Ok(())
    }

    /// Export the resolved tree as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.resolved()).map_err(|e| Error::marshal(e.to_string()))
    }

    /// Export the resolved tree as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.resolved()).map_err(|e| Error::marshal(e.to_string()))
    }
}

/// Parse a YAML document whose root must be a mapping.
///
/// An empty document is an empty mapping.
fn parse_document(data: &[u8]) -> Result<Value> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::empty_mapping());
    }
    let yaml: serde_yaml::Value =
        serde_yaml::from_slice(data).map_err(|e| Error::parse(e.to_string()))?;
    match Value::from_yaml(yaml)? {
        Value::Null => Ok(Value::empty_mapping()),
        root if root.is_mapping() => Ok(root),
        other => Err(Error::parse(format!(
            "Profile root must be a mapping, found {}",
            other.type_name()
        ))),
    }
}
