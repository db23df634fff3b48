/// Constraint registry: template name → constraint behaviour
///
/// The router owns one `ConstraintMap` and resolves every `[param:name]` in a
/// template through it when the route is registered.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::{ConstraintError, ParameterConstraint, PatternConstraint, RouteConstraint};

/// Shared handle to a registered constraint
pub type ConstraintRef = Arc<dyn RouteConstraint>;

/// Named route constraints
///
/// `ConstraintMap::default()` registers the built-in catalogue (`int`,
/// `integer`, `uint`, `alpha`, `alphanum`, `slug`, `uuid`, `file`, `nonfile`).
///
/// # Examples
///
/// ```
/// use fileroute_constraints::{ConstraintMap, RouteDirection, RouteValues};
///
/// let mut map = ConstraintMap::default();
/// map.insert_pattern("year", "[0-9]{4}").unwrap();
/// map.insert_alias("asset", "file").unwrap();
///
/// let asset = map.resolve("asset").unwrap();
/// let values = RouteValues::new().with("name", "logo.svg");
/// assert_eq!(asset.matches(None, "name", &values, RouteDirection::IncomingRequest), Ok(true));
///
/// assert!(map.resolve("year").unwrap().matches_literal("y", "2024"));
/// assert!(map.resolve("unknown").is_err());
/// ```
#[derive(Clone)]
pub struct ConstraintMap {
    constraints: BTreeMap<String, ConstraintRef>,
}

impl ConstraintMap {
    /// Creates a map with no constraints at all
    pub fn empty() -> Self {
        Self {
            constraints: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) a constraint under `name`
    pub fn insert(&mut self, name: impl Into<String>, constraint: impl RouteConstraint + 'static) {
        let name = name.into();
        debug!(constraint = %name, "registering route constraint");
        self.constraints.insert(name, Arc::new(constraint));
    }

    /// Builder form of [`ConstraintMap::insert`]
    pub fn with_constraint(
        mut self,
        name: impl Into<String>,
        constraint: impl RouteConstraint + 'static,
    ) -> Self {
        self.insert(name, constraint);
        self
    }

    /// Registers an anchored regex constraint
    pub fn insert_pattern(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<(), ConstraintError> {
        let name = name.into();
        let constraint =
            PatternConstraint::new(pattern).map_err(|err| ConstraintError::InvalidPattern {
                name: name.clone(),
                message: err.to_string(),
            })?;
        self.insert(name, constraint);
        Ok(())
    }

    /// Makes `alias` resolve to whatever `target` currently resolves to
    pub fn insert_alias(
        &mut self,
        alias: impl Into<String>,
        target: &str,
    ) -> Result<(), ConstraintError> {
        let constraint = self.resolve(target)?;
        let alias = alias.into();
        debug!(constraint = %alias, aliased = %target, "registering route constraint alias");
        self.constraints.insert(alias, constraint);
        Ok(())
    }

    /// Looks up a constraint by template name
    pub fn resolve(&self, name: &str) -> Result<ConstraintRef, ConstraintError> {
        self.constraints
            .get(name)
            .cloned()
            .ok_or_else(|| ConstraintError::UnknownConstraint(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constraints.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl Default for ConstraintMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for constraint in ParameterConstraint::ALL {
            map.insert(constraint.name(), constraint);
        }
        map.insert("integer", ParameterConstraint::Int);
        map
    }
}

impl fmt::Debug for ConstraintMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RouteDirection, RouteValues};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_names() {
        let map = ConstraintMap::default();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(
            names,
            vec!["alpha", "alphanum", "file", "int", "integer", "nonfile", "slug", "uint", "uuid"]
        );
    }

    #[test]
    fn test_unknown_constraint() {
        let map = ConstraintMap::default();
        assert_eq!(
            map.resolve("nope").unwrap_err(),
            ConstraintError::UnknownConstraint("nope".to_string())
        );
    }

    #[test]
    fn test_empty_map() {
        let map = ConstraintMap::empty();
        assert!(map.is_empty());
        assert!(!map.contains("file"));
    }

    #[test]
    fn test_alias_requires_target() {
        let mut map = ConstraintMap::default();
        assert!(map.insert_alias("doc", "missing").is_err());
        assert!(!map.contains("doc"));

        map.insert_alias("doc", "file").unwrap();
        assert!(map.resolve("doc").unwrap().matches_literal("p", "guide.md"));
    }

    #[test]
    fn test_invalid_pattern_names_constraint() {
        let mut map = ConstraintMap::default();
        let err = map.insert_pattern("broken", "(").unwrap_err();
        assert!(matches!(err, ConstraintError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_replace_builtin() {
        let map = ConstraintMap::default().with_constraint("file", ParameterConstraint::Alpha);
        let values = RouteValues::new().with("p", "readme");
        let file = map.resolve("file").unwrap();
        assert_eq!(
            file.matches(None, "p", &values, RouteDirection::IncomingRequest),
            Ok(true)
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let map = Arc::new(ConstraintMap::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let map = Arc::clone(&map);
                std::thread::spawn(move || {
                    let value = format!("file{}.txt", i);
                    map.resolve("file").unwrap().matches_literal("p", &value)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
