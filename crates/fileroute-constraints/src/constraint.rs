/// Route constraint contracts and the built-in constraint catalogue
///
/// Every constraint exposes two entry points:
/// - [`RouteConstraint::matches`] runs during live routing against route values
/// - [`RouteConstraint::matches_literal`] runs while the router analyzes
///   templates at startup
///
/// Built-in constraints funnel both through one `validate` function so the two
/// entry points cannot disagree on the same text.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use uuid::Uuid;

use crate::file_name::is_file_name;
use crate::{ConstraintError, RouteValue, RouteValues};

/// Why the router is evaluating a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDirection {
    /// Matching an incoming request path
    IncomingRequest,
    /// Checking values before generating a URL
    UrlGeneration,
}

/// Request information available to constraints
///
/// The built-in constraints ignore it; custom constraints may look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    /// Normalized request path
    pub path: &'a str,
    /// HTTP method, when the caller knows it
    pub method: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { path, method: None }
    }

    pub fn with_method(mut self, method: &'a str) -> Self {
        self.method = Some(method);
        self
    }
}

/// A named check applied to a route parameter
///
/// Implementations must be pure: the router evaluates constraints many times
/// per request from any thread.
pub trait RouteConstraint: fmt::Debug + Send + Sync {
    /// Runtime match against the value stored under `parameter_name`
    ///
    /// A missing or null value is `Ok(false)`. `Err` is reserved for caller
    /// mistakes such as an empty parameter name.
    fn matches(
        &self,
        request: Option<&RequestContext<'_>>,
        parameter_name: &str,
        values: &RouteValues,
        direction: RouteDirection,
    ) -> Result<bool, ConstraintError>;

    /// Match against a literal template segment
    fn matches_literal(&self, parameter_name: &str, literal: &str) -> bool;
}

/// Resolves `parameter_name` in `values` and coerces it to text
///
/// Fails fast on an empty parameter name. Returns `Ok(None)` when the key is
/// missing or holds no value.
///
/// # Examples
///
/// ```
/// use fileroute_constraints::{value_text, ConstraintError, RouteValues};
///
/// let values = RouteValues::new().with("id", 7);
///
/// assert_eq!(value_text("id", &values).unwrap().as_deref(), Some("7"));
/// assert_eq!(value_text("name", &values).unwrap(), None);
/// assert_eq!(value_text("", &values), Err(ConstraintError::MissingParameterName));
/// ```
pub fn value_text<'v>(
    parameter_name: &str,
    values: &'v RouteValues,
) -> Result<Option<Cow<'v, str>>, ConstraintError> {
    if parameter_name.is_empty() {
        return Err(ConstraintError::MissingParameterName);
    }

    Ok(values.get(parameter_name).map(RouteValue::to_text))
}

// ============================================================================
// Built-in Constraints
// ============================================================================

/// Built-in parameter constraints, referenced by name in route templates
///
/// # Examples
///
/// ```
/// use fileroute_constraints::ParameterConstraint;
///
/// assert_eq!(ParameterConstraint::from_name("file"), Some(ParameterConstraint::File));
/// assert_eq!(ParameterConstraint::from_name("integer"), Some(ParameterConstraint::Int));
/// assert_eq!(ParameterConstraint::from_name("bogus"), None);
///
/// assert!(ParameterConstraint::File.validate("css/site.css"));
/// assert!(ParameterConstraint::NonFile.validate("dashboard/settings"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterConstraint {
    /// Signed 64-bit integer
    Int,
    /// Unsigned 64-bit integer
    UInt,
    /// ASCII letters only
    Alpha,
    /// ASCII letters and digits only
    AlphaNum,
    /// ASCII letters, digits, `-` and `_`
    Slug,
    /// UUID in any form the `uuid` crate parses
    Uuid,
    /// Last segment looks like a file name
    File,
    /// Last segment does not look like a file name
    NonFile,
}

impl ParameterConstraint {
    /// Every built-in constraint in registration order
    pub const ALL: [ParameterConstraint; 8] = [
        ParameterConstraint::Int,
        ParameterConstraint::UInt,
        ParameterConstraint::Alpha,
        ParameterConstraint::AlphaNum,
        ParameterConstraint::Slug,
        ParameterConstraint::Uuid,
        ParameterConstraint::File,
        ParameterConstraint::NonFile,
    ];

    /// Resolves a template name, including the `integer` alias
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" | "integer" => Some(ParameterConstraint::Int),
            "uint" => Some(ParameterConstraint::UInt),
            "alpha" => Some(ParameterConstraint::Alpha),
            "alphanum" => Some(ParameterConstraint::AlphaNum),
            "slug" => Some(ParameterConstraint::Slug),
            "uuid" => Some(ParameterConstraint::Uuid),
            "file" => Some(ParameterConstraint::File),
            "nonfile" => Some(ParameterConstraint::NonFile),
            _ => None,
        }
    }

    /// Canonical template name
    pub fn name(&self) -> &'static str {
        match self {
            ParameterConstraint::Int => "int",
            ParameterConstraint::UInt => "uint",
            ParameterConstraint::Alpha => "alpha",
            ParameterConstraint::AlphaNum => "alphanum",
            ParameterConstraint::Slug => "slug",
            ParameterConstraint::Uuid => "uuid",
            ParameterConstraint::File => "file",
            ParameterConstraint::NonFile => "nonfile",
        }
    }

    /// Checks a value's text form
    pub fn validate(&self, value: &str) -> bool {
        match self {
            ParameterConstraint::Int => value.parse::<i64>().is_ok(),
            ParameterConstraint::UInt => value.parse::<u64>().is_ok(),
            ParameterConstraint::Alpha => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
            }
            ParameterConstraint::AlphaNum => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
            }
            ParameterConstraint::Slug => {
                !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            }
            ParameterConstraint::Uuid => Uuid::parse_str(value).is_ok(),
            ParameterConstraint::File => is_file_name(value),
            ParameterConstraint::NonFile => !is_file_name(value),
        }
    }
}

impl fmt::Display for ParameterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RouteConstraint for ParameterConstraint {
    fn matches(
        &self,
        _request: Option<&RequestContext<'_>>,
        parameter_name: &str,
        values: &RouteValues,
        _direction: RouteDirection,
    ) -> Result<bool, ConstraintError> {
        Ok(value_text(parameter_name, values)?.is_some_and(|text| self.validate(&text)))
    }

    fn matches_literal(&self, _parameter_name: &str, literal: &str) -> bool {
        self.validate(literal)
    }
}

// ============================================================================
// Pattern Constraints
// ============================================================================

/// Regex constraint anchored to the whole value
///
/// # Examples
///
/// ```
/// use fileroute_constraints::PatternConstraint;
///
/// let year = PatternConstraint::new("[0-9]{4}").unwrap();
/// assert!(year.is_match("2024"));
/// assert!(!year.is_match("in 2024"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternConstraint {
    pattern: String,
    regex: Regex,
}

impl PatternConstraint {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without anchors
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl RouteConstraint for PatternConstraint {
    fn matches(
        &self,
        _request: Option<&RequestContext<'_>>,
        parameter_name: &str,
        values: &RouteValues,
        _direction: RouteDirection,
    ) -> Result<bool, ConstraintError> {
        Ok(value_text(parameter_name, values)?.is_some_and(|text| self.is_match(&text)))
    }

    fn matches_literal(&self, _parameter_name: &str, literal: &str) -> bool {
        self.is_match(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(constraint: &dyn RouteConstraint, value: &str) -> bool {
        let values = RouteValues::new().with("p", value);
        constraint
            .matches(None, "p", &values, RouteDirection::IncomingRequest)
            .unwrap()
    }

    #[test]
    fn test_int_and_uint() {
        assert!(ParameterConstraint::Int.validate("-456"));
        assert!(!ParameterConstraint::Int.validate("12.34"));
        assert!(ParameterConstraint::UInt.validate("0"));
        assert!(!ParameterConstraint::UInt.validate("-1"));
    }

    #[test]
    fn test_text_classes() {
        assert!(ParameterConstraint::Alpha.validate("Hello"));
        assert!(!ParameterConstraint::Alpha.validate("hello1"));
        assert!(!ParameterConstraint::Alpha.validate(""));
        assert!(ParameterConstraint::AlphaNum.validate("Test99"));
        assert!(!ParameterConstraint::AlphaNum.validate("test_99"));
        assert!(ParameterConstraint::Slug.validate("my_post-2"));
        assert!(!ParameterConstraint::Slug.validate("hello world"));
    }

    #[test]
    fn test_uuid() {
        assert!(ParameterConstraint::Uuid.validate("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!ParameterConstraint::Uuid.validate("123-456-789"));
    }

    #[test]
    fn test_file_and_nonfile_are_complements() {
        for value in ["a.txt", "a", "", "a/", "b.d/c", ".x", "x.."] {
            assert_ne!(
                ParameterConstraint::File.validate(value),
                ParameterConstraint::NonFile.validate(value),
                "{value}"
            );
        }
    }

    #[test]
    fn test_names_round_trip() {
        for constraint in ParameterConstraint::ALL {
            assert_eq!(ParameterConstraint::from_name(constraint.name()), Some(constraint));
        }
    }

    #[test]
    fn test_runtime_and_literal_agree() {
        for constraint in ParameterConstraint::ALL {
            for value in ["report.pdf", "images/", "42", "abc", "foo..bar", ""] {
                assert_eq!(
                    runtime(&constraint, value),
                    constraint.matches_literal("p", value),
                    "{constraint} on {value:?}"
                );
            }
        }
    }

    #[test]
    fn test_missing_value_is_no_match() {
        let values = RouteValues::new();
        for constraint in [ParameterConstraint::File, ParameterConstraint::NonFile] {
            let result = constraint.matches(None, "path", &values, RouteDirection::IncomingRequest);
            assert_eq!(result, Ok(false));
        }
    }

    #[test]
    fn test_empty_parameter_name_is_error() {
        let values = RouteValues::new().with("", "a.txt");
        let result = ParameterConstraint::File.matches(
            None,
            "",
            &values,
            RouteDirection::IncomingRequest,
        );
        assert_eq!(result, Err(ConstraintError::MissingParameterName));
    }

    #[test]
    fn test_typed_values_are_coerced() {
        let values = RouteValues::new().with("id", 42).with("ratio", 2.5);
        let int = ParameterConstraint::Int;
        let file = ParameterConstraint::File;

        assert_eq!(int.matches(None, "id", &values, RouteDirection::UrlGeneration), Ok(true));
        // "2.5" has a dot followed by a digit
        assert_eq!(file.matches(None, "ratio", &values, RouteDirection::IncomingRequest), Ok(true));
    }

    #[test]
    fn test_pattern_is_anchored() {
        let year = PatternConstraint::new("[0-9]{4}").unwrap();
        assert!(runtime(&year, "2024"));
        assert!(!runtime(&year, "20245"));
        assert!(!year.matches_literal("p", "x2024"));
        assert_eq!(year.pattern(), "[0-9]{4}");
    }

    #[test]
    fn test_pattern_alternation_is_grouped() {
        let lang = PatternConstraint::new("en|fr").unwrap();
        assert!(lang.is_match("en"));
        assert!(!lang.is_match("english"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternConstraint::new("[0-9").is_err());
    }
}
