//! Dotted-path lookup
//!
//! Walks a profile tree one segment at a time. The depth of the path must
//! match the depth of the tree: a path that continues past a scalar is a
//! level mismatch, and a path that stops on a mapping or sequence is not
//! found.

use crate::error::{Error, Result};
use crate::interpolation::{self, Environment};
use crate::value::Value;

/// Path delimiter
pub const DELIMITER: char = '.';

/// Resolves dotted paths against a profile tree
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    root: &'a Value,
    env: &'a dyn Environment,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over `root`, looking variables up in `env`
    pub fn new(root: &'a Value, env: &'a dyn Environment) -> Self {
        Self { root, env }
    }

    /// Resolve `path` to the string form of its leaf, with interpolation applied
    pub fn resolve(&self, path: &str) -> Result<String> {
        let leaf = self.lookup(path)?;
        interpolation::resolve_scalar(leaf, self.env)
            .ok_or_else(|| Error::not_found(last_segment(path), path))
    }

    /// Find the raw leaf at `path` without interpolating it
    pub fn lookup(&self, path: &str) -> Result<&'a Value> {
        if path.is_empty() {
            return Err(Error::not_found("", path));
        }

        let segments: Vec<&str> = path.split(DELIMITER).collect();
        let last = segments.len() - 1;
        let mut current = self.root;

        for (i, segment) in segments.iter().enumerate() {
            let map = match current {
                Value::Mapping(map) => map,
                _ if i == 0 => return Err(Error::not_found(*segment, path)),
                _ => return Err(Error::level_mismatch(path, segments[i - 1])),
            };

            let next = map
                .get(*segment)
                .ok_or_else(|| Error::not_found(*segment, path))?;

            if i == last {
                if next.is_container() {
                    log::trace!("'{}' ends on a {}", path, next.type_name());
                    return Err(Error::not_found(*segment, path)
                        .with_help("Path must end on a scalar value, not a mapping or sequence"));
                }
                return Ok(next);
            }

            current = next;
        }

        // Split always yields at least one segment
        Err(Error::not_found("", path))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit(DELIMITER).next().unwrap_or(path)
}
