// File: src/config.rs
// Purpose: Configuration parsing from fileroute.toml

use anyhow::{bail, Context, Result};
use fileroute_constraints::ConstraintMap;
use fileroute_router::{Route, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Extra constraints, by the name templates use
    #[serde(default)]
    pub constraints: BTreeMap<String, ConstraintSpec>,

    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Whether literal segments ignore ASCII case (default: false)
    #[serde(default = "default_false")]
    pub case_insensitive: bool,

    /// Directory static routes serve from unless they set `root` (default: "public")
    #[serde(default = "default_static_root")]
    pub static_root: String,
}

/// A constraint defined in the config file
///
/// A bare string aliases an already registered constraint; a table with
/// `pattern` defines an anchored regex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintSpec {
    Alias(String),
    Pattern { pattern: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKindConfig {
    /// Files on disk
    Static,
    /// Application handler
    #[default]
    Page,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub template: String,

    #[serde(default)]
    pub kind: RouteKindConfig,

    /// Overrides `routing.static_root` for static routes
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

// Default values
fn default_false() -> bool {
    false
}

fn default_static_root() -> String {
    "public".to_string()
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            template: "/[...path:file]".to_string(),
            kind: RouteKindConfig::Static,
            root: None,
            name: Some("static".to_string()),
            defaults: BTreeMap::new(),
        },
        RouteConfig {
            template: "/[[...path:nonfile]]".to_string(),
            kind: RouteKindConfig::Page,
            root: None,
            name: Some("app".to_string()),
            defaults: BTreeMap::new(),
        },
    ]
}

// Default implementations
impl Default for Config {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            constraints: BTreeMap::new(),
            routes: default_routes(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            static_root: default_static_root(),
        }
    }
}

impl RouteConfig {
    /// Builds the router's route, using `static_root` when no root is set
    pub fn to_route(&self, static_root: &str) -> Result<Route> {
        let route = match self.kind {
            RouteKindConfig::Static => {
                let root = self.root.as_deref().unwrap_or(static_root);
                Route::static_files(&self.template, root)?
            }
            RouteKindConfig::Page => Route::parse(&self.template)?,
        };

        let route = self
            .defaults
            .iter()
            .fold(route, |route, (parameter, value)| {
                route.with_default(parameter.as_str(), value.as_str())
            });

        Ok(match &self.name {
            Some(name) => route.with_name(name.as_str()),
            None => route,
        })
    }
}

impl Config {
    /// Load configuration from fileroute.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!(
            path = %path.display(),
            constraints = config.constraints.len(),
            routes = config.routes.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Load configuration from default path (./fileroute.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("fileroute.toml")
    }

    /// Built-in constraints plus the ones declared under `[constraints]`
    ///
    /// Patterns are registered first; aliases may then point at built-ins,
    /// patterns, or other aliases.
    pub fn constraint_map(&self) -> Result<ConstraintMap> {
        let mut map = ConstraintMap::default();
        let mut aliases = Vec::new();

        for (name, spec) in &self.constraints {
            match spec {
                ConstraintSpec::Pattern { pattern } => map
                    .insert_pattern(name.as_str(), pattern)
                    .with_context(|| format!("Invalid constraint `{}`", name))?,
                ConstraintSpec::Alias(target) => aliases.push((name, target)),
            }
        }

        while let Some(&(name, target)) = aliases.first() {
            let (ready, pending): (Vec<_>, Vec<_>) = aliases
                .into_iter()
                .partition(|(_, target)| map.contains(target));

            if ready.is_empty() {
                bail!("Constraint `{}` aliases unknown constraint `{}`", name, target);
            }

            for (alias, target) in ready {
                map.insert_alias(alias.as_str(), target)?;
            }
            aliases = pending;
        }

        Ok(map)
    }

    /// Router with every configured route registered
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::with_constraints(self.constraint_map()?)
            .with_case_sensitivity(self.routing.case_insensitive);

        for route in &self.routes {
            let built = route
                .to_route(&self.routing.static_root)
                .with_context(|| format!("Invalid route template `{}`", route.template))?;
            router
                .add_route(built)
                .with_context(|| format!("Cannot register route `{}`", route.template))?;
        }

        Ok(router)
    }
}
