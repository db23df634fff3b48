//! # fileroute router
//!
//! A template router that decides, per request, whether a path names a static
//! file or should go to a dynamic handler:
//! - Static segments (`/robots.txt`)
//! - Parameters (`/users/[id:int]`)
//! - Optional parameters (`/docs/[lang:alpha?]`)
//! - Catch-all routes (`/assets/[...path:file]`)
//! - Optional catch-all routes (`/[[...path:nonfile]]`)
//!
//! Constraints are referenced by name and resolved against the router's
//! [`ConstraintMap`] when a route is added. The `file` and `nonfile`
//! constraints are what make the static/dynamic split work.
//!
//! ## Path Normalization
//!
//! Incoming paths are normalized before matching:
//! - Trailing slashes: `/path/` → `/path`
//! - Double slashes: `/path//to` → `/path/to`
//! - Backslashes: `\path\to` → `/path/to`
//!
//! Segment values are otherwise passed to constraints untouched.
//!
//! ## Example
//!
//! ```
//! use fileroute_router::{Dispatch, Route, Router};
//!
//! let router = Router::new()
//!     .with_route(Route::static_files("/[...path:file]", "public").unwrap())
//!     .unwrap()
//!     .with_route(Route::parse("/[[...path:nonfile]]").unwrap().with_name("app"))
//!     .unwrap();
//!
//! assert!(matches!(router.resolve("/css/site.css"), Dispatch::StaticFile { .. }));
//! assert!(matches!(router.resolve("/dashboard/settings"), Dispatch::Handler(_)));
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use fileroute_constraints::{
    ConstraintMap, ConstraintRef, RequestContext, RouteDirection, RouteValues,
};
use tracing::{debug, trace, warn};

// ============================================================================
// Module Declarations
// ============================================================================

mod analysis;
mod error;
pub mod path;
pub mod route;

pub use analysis::{RouteDiagnostic, Severity};
pub use error::RouterError;
pub use fileroute_constraints as constraints;
pub use path::{is_valid_path, normalize_path};
pub use route::pattern::{classify_segment, parse_param_with_constraint, PatternSegmentType};

// ============================================================================
// Core Types
// ============================================================================

/// What a matched route leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A dynamic handler owned by the application
    Handler,
    /// Files under `root`, addressed by the route's last parameter
    StaticFiles { root: PathBuf },
}

/// A single route with its template, parameters, and metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Template as written, e.g. "/assets/[...path:file]"
    pub template: String,
    /// Canonical pattern, e.g. "/assets/*path"
    pub pattern: String,
    /// Typed segments in template order
    pub segments: Vec<PatternSegmentType>,
    /// Parameter names in template order
    pub params: Vec<String>,
    /// Optional parameter names
    pub optional_params: Vec<String>,
    /// Priority for matching (lower = higher priority)
    pub priority: usize,
    /// Whether the template ends in a catch-all
    pub has_catch_all: bool,
    /// Parameter name → constraint name
    pub param_constraints: HashMap<String, String>,
    /// Values used when a parameter is not captured
    pub defaults: HashMap<String, String>,
    /// Optional name for URL generation
    pub name: Option<String>,
    /// Handler or static files
    pub kind: RouteKind,
}

/// Result of matching a route against a path
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The matched route
    pub route: Route,
    /// Captured parameters, plus defaults for parameters that were not captured
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    /// Gets a parameter value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// File system path for a static file match
    ///
    /// `None` for handler routes, for a missing or empty file value, and for
    /// values that could leave the root (`..` segments, absolute paths).
    pub fn static_file(&self) -> Option<PathBuf> {
        let RouteKind::StaticFiles { root } = &self.route.kind else {
            return None;
        };

        let value = self.route.file_value(&self.params)?;
        if path::escapes_root(value) {
            return None;
        }

        Some(root.join(value))
    }
}

/// Routing decision for a request path
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Serve `file` from disk
    StaticFile { route_match: RouteMatch, file: PathBuf },
    /// Hand the request to the application
    Handler(RouteMatch),
    /// Nothing matched, or a static file path was refused
    NotFound,
}

// ============================================================================
// Route Implementation
// ============================================================================

impl Route {
    /// Parses a handler route from a template
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::Route;
    ///
    /// let route = Route::parse("/files/[name:file]").unwrap();
    /// assert_eq!(route.pattern, "/files/:name");
    /// assert_eq!(route.params, vec!["name"]);
    /// assert_eq!(route.param_constraints.get("name").map(String::as_str), Some("file"));
    /// ```
    pub fn parse(template: &str) -> Result<Self, RouterError> {
        let parsed = route::parse_pattern(template)?;
        let priority = parsed.priority();

        Ok(Route {
            template: template.to_string(),
            pattern: parsed.pattern,
            segments: parsed.segments,
            params: parsed.params,
            optional_params: parsed.optional_params,
            priority,
            has_catch_all: parsed.has_catch_all,
            param_constraints: parsed.param_constraints,
            defaults: HashMap::new(),
            name: None,
            kind: RouteKind::Handler,
        })
    }

    /// Parses a static file route serving files under `root`
    ///
    /// The last parameter of the template names the file.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::Route;
    ///
    /// let route = Route::static_files("/assets/[...path:file]", "public").unwrap();
    /// assert_eq!(route.file_parameter(), Some("path"));
    ///
    /// assert!(Route::static_files("/assets", "public").is_err());
    /// ```
    pub fn static_files(template: &str, root: impl Into<PathBuf>) -> Result<Self, RouterError> {
        let mut route = Self::parse(template)?;

        if route.params.is_empty() {
            return Err(RouterError::MissingFileParameter(route.pattern));
        }

        route.kind = RouteKind::StaticFiles { root: root.into() };
        Ok(route)
    }

    // ========================================================================
    // Functional Builder Methods
    // ========================================================================

    /// Sets a name for this route (for URL generation)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the value a parameter takes when the path does not supply it
    ///
    /// Defaults are checked against the parameter's constraint by
    /// [`Router::analyze`].
    pub fn with_default(mut self, parameter: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(parameter.into(), value.into());
        self
    }

    pub fn is_static_files(&self) -> bool {
        matches!(self.kind, RouteKind::StaticFiles { .. })
    }

    /// Parameter that names the file for static file routes
    pub fn file_parameter(&self) -> Option<&str> {
        match self.kind {
            RouteKind::StaticFiles { .. } => self.params.last().map(String::as_str),
            RouteKind::Handler => None,
        }
    }

    /// Non-empty value of the file parameter in `params`
    pub fn file_value<'p>(&self, params: &'p HashMap<String, String>) -> Option<&'p str> {
        self.file_parameter()
            .and_then(|parameter| params.get(parameter))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Structurally matches a normalized path, without evaluating constraints
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::Route;
    ///
    /// let route = Route::parse("/assets/[...path]").unwrap();
    /// let params = route.captures("/assets/css/site.css", false).unwrap();
    /// assert_eq!(params.get("path").map(String::as_str), Some("css/site.css"));
    ///
    /// assert!(route.captures("/assets", false).is_none());
    /// ```
    pub fn captures(&self, path: &str, case_insensitive: bool) -> Option<HashMap<String, String>> {
        let path_segments: Vec<&str> = path::segments(path).collect();
        capture_segments(&self.segments, &path_segments, HashMap::new(), case_insensitive)
    }

    /// Overlays captured values on the route defaults
    pub fn params_with_defaults(&self, captured: HashMap<String, String>) -> HashMap<String, String> {
        let mut params = self.defaults.clone();
        params.extend(captured);
        params
    }

    /// Generates a URL by substituting parameters, falling back to defaults
    ///
    /// Returns `None` when a required parameter has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::Route;
    /// use std::collections::HashMap;
    ///
    /// let route = Route::parse("/files/[name:file]").unwrap();
    ///
    /// let mut params = HashMap::new();
    /// params.insert("name".to_string(), "report.pdf".to_string());
    ///
    /// assert_eq!(route.generate_url(&params), Some("/files/report.pdf".to_string()));
    /// assert_eq!(route.generate_url(&HashMap::new()), None);
    /// ```
    pub fn generate_url(&self, params: &HashMap<String, String>) -> Option<String> {
        let lookup = |name: &str| params.get(name).or_else(|| self.defaults.get(name)).cloned();

        let parts: Option<Vec<String>> = self
            .segments
            .iter()
            .map(|segment| match segment {
                PatternSegmentType::Static(text) => Some(text.clone()),
                PatternSegmentType::Required(name, _) | PatternSegmentType::CatchAll(name, _) => {
                    lookup(name)
                }
                PatternSegmentType::Optional(name, _)
                | PatternSegmentType::OptionalCatchAll(name, _) => {
                    Some(lookup(name).unwrap_or_default())
                }
            })
            .collect();

        parts.map(|parts| {
            let filtered: Vec<String> = parts.into_iter().filter(|s| !s.is_empty()).collect();

            if filtered.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", filtered.join("/"))
            }
        })
    }
}

fn segment_eq(pattern: &str, value: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        pattern.eq_ignore_ascii_case(value)
    } else {
        pattern == value
    }
}

/// Recursive segment matcher
///
/// Walks template and path segments together. Optional parameters first try
/// to consume a path segment and fall back to skipping it.
fn capture_segments(
    segments: &[PatternSegmentType],
    path: &[&str],
    mut params: HashMap<String, String>,
    case_insensitive: bool,
) -> Option<HashMap<String, String>> {
    let Some((segment, rest)) = segments.split_first() else {
        return path.is_empty().then_some(params);
    };

    match segment {
        PatternSegmentType::CatchAll(name, _) => {
            if path.is_empty() {
                return None;
            }
            params.insert(name.clone(), path.join("/"));
            Some(params)
        }
        PatternSegmentType::OptionalCatchAll(name, _) => {
            if !path.is_empty() {
                params.insert(name.clone(), path.join("/"));
            }
            Some(params)
        }
        PatternSegmentType::Optional(name, _) => {
            if let Some((first, remaining)) = path.split_first() {
                let should_consume = match rest.first() {
                    Some(PatternSegmentType::Static(next)) => {
                        !segment_eq(next, first, case_insensitive)
                    }
                    _ => true,
                };

                if should_consume {
                    let mut consumed = params.clone();
                    consumed.insert(name.clone(), first.to_string());
                    if let Some(found) =
                        capture_segments(rest, remaining, consumed, case_insensitive)
                    {
                        return Some(found);
                    }
                }
            }
            capture_segments(rest, path, params, case_insensitive)
        }
        PatternSegmentType::Required(name, _) => {
            let (first, remaining) = path.split_first()?;
            params.insert(name.clone(), first.to_string());
            capture_segments(rest, remaining, params, case_insensitive)
        }
        PatternSegmentType::Static(text) => {
            let (first, remaining) = path.split_first()?;
            if !segment_eq(text, first, case_insensitive) {
                return None;
            }
            capture_segments(rest, remaining, params, case_insensitive)
        }
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

/// A resolved constraint bound to one route parameter
#[derive(Debug, Clone)]
pub(crate) struct BoundConstraint {
    pub(crate) parameter: String,
    pub(crate) name: String,
    pub(crate) constraint: ConstraintRef,
}

/// A route together with its resolved constraints
#[derive(Debug, Clone)]
pub(crate) struct RegisteredRoute {
    pub(crate) route: Route,
    pub(crate) constraints: Vec<BoundConstraint>,
}

impl RegisteredRoute {
    pub(crate) fn constraint_for(&self, parameter: &str) -> Option<&BoundConstraint> {
        self.constraints
            .iter()
            .find(|bound| bound.parameter == parameter)
    }

    /// Runs every bound constraint; optional parameters without a value pass
    fn accepts(
        &self,
        request: Option<&RequestContext<'_>>,
        values: &RouteValues,
        direction: RouteDirection,
    ) -> bool {
        self.constraints.iter().all(|bound| {
            if self.route.optional_params.contains(&bound.parameter)
                && !values.contains_key(&bound.parameter)
            {
                return true;
            }

            match bound
                .constraint
                .matches(request, &bound.parameter, values, direction)
            {
                Ok(true) => true,
                Ok(false) => {
                    trace!(
                        pattern = %self.route.pattern,
                        parameter = %bound.parameter,
                        constraint = %bound.name,
                        "constraint rejected route"
                    );
                    false
                }
                Err(err) => {
                    warn!(
                        pattern = %self.route.pattern,
                        parameter = %bound.parameter,
                        constraint = %bound.name,
                        error = %err,
                        "constraint failed; treating route as unmatched"
                    );
                    false
                }
            }
        })
    }
}

/// Router that owns the routes and the constraint registry
///
/// Routes are kept sorted by priority: static < dynamic < catch-all <
/// optional catch-all. Among equal priorities, registration order wins.
#[derive(Debug, Clone)]
pub struct Router {
    pub(crate) routes: Vec<RegisteredRoute>,
    named_routes: HashMap<String, RegisteredRoute>,
    constraints: ConstraintMap,
    pub(crate) case_insensitive: bool,
}

impl Router {
    /// Creates a case-sensitive router with the built-in constraints
    pub fn new() -> Self {
        Self::with_constraints(ConstraintMap::default())
    }

    /// Creates a router that resolves constraint names through `constraints`
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::{constraints::ConstraintMap, Route, Router};
    ///
    /// let mut constraints = ConstraintMap::default();
    /// constraints.insert_pattern("year", "[0-9]{4}").unwrap();
    ///
    /// let router = Router::with_constraints(constraints)
    ///     .with_route(Route::parse("/archive/[year:year]").unwrap())
    ///     .unwrap();
    ///
    /// assert!(router.match_route("/archive/2024").is_some());
    /// assert!(router.match_route("/archive/24").is_none());
    /// ```
    pub fn with_constraints(constraints: ConstraintMap) -> Self {
        Self {
            routes: Vec::new(),
            named_routes: HashMap::new(),
            constraints,
            case_insensitive: false,
        }
    }

    // ========================================================================
    // Functional Builder Methods for Router Configuration
    // ========================================================================

    /// Configures case sensitivity of literal segments (functional builder)
    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Registers an anchored regex constraint (functional builder)
    ///
    /// Routes added afterwards may reference it by `name`.
    pub fn with_pattern_constraint(mut self, name: &str, pattern: &str) -> Result<Self, RouterError> {
        self.constraints.insert_pattern(name, pattern)?;
        Ok(self)
    }

    /// Adds a route (functional builder)
    pub fn with_route(mut self, route: Route) -> Result<Self, RouterError> {
        self.add_route(route)?;
        Ok(self)
    }

    /// Adds multiple routes at once (functional batch operation)
    pub fn with_routes<I>(mut self, routes: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = Route>,
    {
        for route in routes {
            self.add_route(route)?;
        }
        Ok(self)
    }

    /// Adds a route, resolving its constraint names
    ///
    /// # Errors
    ///
    /// - `RouterError::UnknownConstraint` when a constraint name is not registered
    /// - `RouterError::UnknownDefault` when a default names no parameter
    pub fn add_route(&mut self, route: Route) -> Result<(), RouterError> {
        if let Some(parameter) = route
            .defaults
            .keys()
            .find(|parameter| !route.params.contains(*parameter))
        {
            return Err(RouterError::UnknownDefault {
                pattern: route.pattern.clone(),
                parameter: parameter.clone(),
            });
        }

        let constraints = route
            .params
            .iter()
            .filter_map(|parameter| {
                route
                    .param_constraints
                    .get(parameter)
                    .map(|name| (parameter, name))
            })
            .map(|(parameter, name)| {
                self.constraints
                    .resolve(name)
                    .map(|constraint| BoundConstraint {
                        parameter: parameter.clone(),
                        name: name.clone(),
                        constraint,
                    })
                    .map_err(|_| RouterError::UnknownConstraint {
                        pattern: route.pattern.clone(),
                        parameter: parameter.clone(),
                        constraint: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let entry = RegisteredRoute { route, constraints };

        for diagnostic in analysis::default_diagnostics(&entry) {
            warn!(%diagnostic, "route default can never satisfy its constraint");
        }

        debug!(
            pattern = %entry.route.pattern,
            priority = entry.route.priority,
            constraints = entry.constraints.len(),
            "registered route"
        );

        if let Some(name) = &entry.route.name {
            self.named_routes.insert(name.clone(), entry.clone());
        }

        self.routes.push(entry);
        self.routes.sort_by_key(|entry| entry.route.priority);
        Ok(())
    }

    /// The registry used to resolve constraint names
    pub fn constraint_map(&self) -> &ConstraintMap {
        &self.constraints
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Routes in matching order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|entry| &entry.route)
    }

    // ========================================================================
    // Route Matching
    // ========================================================================

    /// Matches a path against all routes and returns the first match
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::{Route, Router};
    ///
    /// let router = Router::new()
    ///     .with_route(Route::parse("/files/[name:file]").unwrap())
    ///     .unwrap();
    ///
    /// let m = router.match_route("/files/report.pdf").unwrap();
    /// assert_eq!(m.get("name"), Some("report.pdf"));
    ///
    /// assert!(router.match_route("/files/report").is_none());
    /// ```
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        let normalized = normalize_path(path);
        self.match_context(&RequestContext::new(&normalized))
    }

    /// Like [`Router::match_route`], also telling constraints the HTTP method
    pub fn match_request(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let normalized = normalize_path(path);
        self.match_context(&RequestContext::new(&normalized).with_method(method))
    }

    fn match_context(&self, request: &RequestContext<'_>) -> Option<RouteMatch> {
        self.routes.iter().find_map(|entry| {
            let captured = entry.route.captures(request.path, self.case_insensitive)?;
            let params = entry.route.params_with_defaults(captured);

            // A static route with nothing to serve leaves the path to later routes
            if entry.route.is_static_files() && entry.route.file_value(&params).is_none() {
                trace!(pattern = %entry.route.pattern, "static route has no file value");
                return None;
            }

            let values = RouteValues::from(params.clone());

            entry
                .accepts(Some(request), &values, RouteDirection::IncomingRequest)
                .then(|| RouteMatch {
                    route: entry.route.clone(),
                    params,
                })
        })
    }

    /// Decides between a static file, a handler, or nothing
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::{Dispatch, Route, Router};
    /// use std::path::PathBuf;
    ///
    /// let router = Router::new()
    ///     .with_route(Route::static_files("/[...path:file]", "public").unwrap())
    ///     .unwrap();
    ///
    /// match router.resolve("/img/logo.png") {
    ///     Dispatch::StaticFile { file, .. } => assert_eq!(file, PathBuf::from("public/img/logo.png")),
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// assert_eq!(router.resolve("/img/logo"), Dispatch::NotFound);
    /// ```
    pub fn resolve(&self, path: &str) -> Dispatch {
        let Some(route_match) = self.match_route(path) else {
            return Dispatch::NotFound;
        };

        if !route_match.route.is_static_files() {
            return Dispatch::Handler(route_match);
        }

        match route_match.static_file() {
            Some(file) => Dispatch::StaticFile { route_match, file },
            None => {
                warn!(path, pattern = %route_match.route.pattern, "refusing static file path");
                Dispatch::NotFound
            }
        }
    }

    // ========================================================================
    // Named Route URL Generation
    // ========================================================================

    /// Generates a URL from a named route, checking its constraints first
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::{Route, Router};
    /// use std::collections::HashMap;
    ///
    /// let router = Router::new()
    ///     .with_route(Route::parse("/files/[name:file]").unwrap().with_name("file"))
    ///     .unwrap();
    ///
    /// let mut params = HashMap::new();
    /// params.insert("name".to_string(), "report.pdf".to_string());
    /// assert_eq!(router.url_for("file", &params), Some("/files/report.pdf".to_string()));
    ///
    /// params.insert("name".to_string(), "report".to_string());
    /// assert_eq!(router.url_for("file", &params), None);
    /// ```
    pub fn url_for(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        let entry = self.named_routes.get(name)?;
        let merged = entry.route.params_with_defaults(params.clone());
        let values = RouteValues::from(merged.clone());

        if !entry.accepts(None, &values, RouteDirection::UrlGeneration) {
            debug!(route = name, "url generation rejected by constraint");
            return None;
        }

        entry.route.generate_url(&merged)
    }

    /// Convenience form of [`Router::url_for`] taking parameter tuples
    pub fn url_for_params(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let param_map: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.url_for(name, &param_map)
    }

    /// Gets a route by its name
    pub fn get_route_by_name(&self, name: &str) -> Option<&Route> {
        self.named_routes.get(name).map(|entry| &entry.route)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
