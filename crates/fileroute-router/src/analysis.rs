/// Registration-time route analysis
///
/// Evaluates constraints against text known before any request arrives:
/// route defaults and the segments of fully-literal routes. Only the
/// literal-match side of a constraint is used here.

use std::fmt;

use serde::Serialize;

use crate::{segment_eq, PatternSegmentType, RegisteredRoute, Router};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A problem found by [`Router::analyze`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteDiagnostic {
    /// A default value its own constraint rejects
    DefaultRejected {
        pattern: String,
        parameter: String,
        constraint: String,
        default: String,
    },
    /// A literal route whose text a constrained parameter route also accepts
    LiteralOverlap {
        literal_pattern: String,
        parameter_pattern: String,
        parameter: String,
        constraint: String,
        literal: String,
    },
}

impl RouteDiagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            RouteDiagnostic::DefaultRejected { .. } => Severity::Error,
            RouteDiagnostic::LiteralOverlap { .. } => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for RouteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDiagnostic::DefaultRejected {
                pattern,
                parameter,
                constraint,
                default,
            } => write!(
                f,
                "{}: default `{}` for `{}` is rejected by constraint `{}`",
                pattern, default, parameter, constraint
            ),
            RouteDiagnostic::LiteralOverlap {
                literal_pattern,
                parameter_pattern,
                parameter,
                constraint,
                literal,
            } => write!(
                f,
                "{}: `{}` is also accepted by `{}` in {} (constraint `{}`)",
                literal_pattern, literal, parameter, parameter_pattern, constraint
            ),
        }
    }
}

impl Router {
    /// Checks registered routes for defaults that can never match and for
    /// literal routes shadowing constrained parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_router::{Route, RouteDiagnostic, Router};
    ///
    /// let router = Router::new()
    ///     .with_route(Route::parse("/favicon.ico").unwrap())
    ///     .unwrap()
    ///     .with_route(Route::parse("/[name:file]").unwrap())
    ///     .unwrap();
    ///
    /// let diagnostics = router.analyze();
    /// assert_eq!(diagnostics.len(), 1);
    /// assert!(matches!(diagnostics[0], RouteDiagnostic::LiteralOverlap { .. }));
    /// ```
    pub fn analyze(&self) -> Vec<RouteDiagnostic> {
        let defaults = self.routes.iter().flat_map(default_diagnostics);

        let overlaps = self.routes.iter().flat_map(|literal| {
            self.routes.iter().filter_map(move |candidate| {
                literal_overlap(literal, candidate, self.case_insensitive)
            })
        });

        defaults.chain(overlaps).collect()
    }
}

/// Defaults rejected by the constraint on their parameter, ordered by parameter
pub(crate) fn default_diagnostics(entry: &RegisteredRoute) -> Vec<RouteDiagnostic> {
    let mut defaults: Vec<(&String, &String)> = entry.route.defaults.iter().collect();
    defaults.sort();

    defaults
        .into_iter()
        .filter_map(|(parameter, default)| {
            let bound = entry.constraint_for(parameter)?;
            (!bound.constraint.matches_literal(parameter, default)).then(|| {
                RouteDiagnostic::DefaultRejected {
                    pattern: entry.route.pattern.clone(),
                    parameter: parameter.clone(),
                    constraint: bound.name.clone(),
                    default: default.clone(),
                }
            })
        })
        .collect()
}

/// Walks `candidate` over the segments of a fully-literal route
///
/// Reports the first constrained parameter that accepted literal text, provided
/// every other segment lines up too.
fn literal_overlap(
    literal: &RegisteredRoute,
    candidate: &RegisteredRoute,
    case_insensitive: bool,
) -> Option<RouteDiagnostic> {
    if candidate.constraints.is_empty() || !literal.route.segments.iter().all(|s| s.is_static()) {
        return None;
    }

    let texts: Vec<&str> = literal
        .route
        .segments
        .iter()
        .filter_map(|segment| match segment {
            PatternSegmentType::Static(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();

    let mut accepted: Option<(String, String, String)> = None;
    let mut position = 0;

    let mut check = |parameter: &str, text: &str| -> bool {
        match candidate.constraint_for(parameter) {
            Some(bound) if bound.constraint.matches_literal(parameter, text) => {
                accepted.get_or_insert_with(|| {
                    (parameter.to_string(), bound.name.clone(), text.to_string())
                });
                true
            }
            Some(_) => false,
            None => true,
        }
    };

    for segment in &candidate.route.segments {
        match segment {
            PatternSegmentType::Static(text) => {
                let literal_text = texts.get(position)?;
                if !segment_eq(text, literal_text, case_insensitive) {
                    return None;
                }
                position += 1;
            }
            PatternSegmentType::Required(name, _) => {
                let literal_text = texts.get(position)?;
                if !check(name, literal_text) {
                    return None;
                }
                position += 1;
            }
            PatternSegmentType::CatchAll(name, _) | PatternSegmentType::OptionalCatchAll(name, _) => {
                let rest = texts[position.min(texts.len())..].join("/");
                if rest.is_empty() {
                    if !segment.is_optional() {
                        return None;
                    }
                } else if !check(name, &rest) {
                    return None;
                }
                position = texts.len();
            }
            // Whether an optional segment consumes depends on the request
            PatternSegmentType::Optional(..) => return None,
        }
    }

    if position != texts.len() {
        return None;
    }

    let (parameter, constraint, literal_text) = accepted?;
    Some(RouteDiagnostic::LiteralOverlap {
        literal_pattern: literal.route.pattern.clone(),
        parameter_pattern: candidate.route.pattern.clone(),
        parameter,
        constraint,
        literal: literal_text,
    })
}
