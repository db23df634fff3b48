/// Pattern parsing for route template segments
///
/// Pure functional parsing of template segments into typed segments.
/// Constraints are kept as names here; the router resolves them against its
/// `ConstraintMap` when the route is registered.

/// Represents different types of route template segments
///
/// Each parameter variant carries the parameter name and optional
/// constraint name.
///
/// # Examples
///
/// ```
/// use fileroute_router::route::pattern::{classify_segment, PatternSegmentType};
///
/// let seg = classify_segment("assets");
/// assert!(matches!(seg, PatternSegmentType::Static(_)));
///
/// let seg = classify_segment("[name:file]");
/// assert_eq!(seg.constraint(), Some("file"));
///
/// let seg = classify_segment("[[...path:nonfile]]");
/// assert!(matches!(seg, PatternSegmentType::OptionalCatchAll(_, Some(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegmentType {
    /// Catch-all segment: [...path] or [...path:file]
    CatchAll(String, Option<String>),
    /// Optional catch-all segment: [[...path]] or [[...path:nonfile]]
    OptionalCatchAll(String, Option<String>),
    /// Optional parameter: [lang?] or [lang:alpha?]
    Optional(String, Option<String>),
    /// Required parameter: [id] or [id:int]
    Required(String, Option<String>),
    /// Literal text segment
    Static(String),
}

impl PatternSegmentType {
    /// Parameter name, or `None` for literal segments
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegmentType::CatchAll(name, _)
            | PatternSegmentType::OptionalCatchAll(name, _)
            | PatternSegmentType::Optional(name, _)
            | PatternSegmentType::Required(name, _) => Some(name),
            PatternSegmentType::Static(_) => None,
        }
    }

    /// Constraint name attached to a parameter segment
    pub fn constraint(&self) -> Option<&str> {
        match self {
            PatternSegmentType::CatchAll(_, constraint)
            | PatternSegmentType::OptionalCatchAll(_, constraint)
            | PatternSegmentType::Optional(_, constraint)
            | PatternSegmentType::Required(_, constraint) => constraint.as_deref(),
            PatternSegmentType::Static(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, PatternSegmentType::Static(_))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(
            self,
            PatternSegmentType::CatchAll(..) | PatternSegmentType::OptionalCatchAll(..)
        )
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            PatternSegmentType::Optional(..) | PatternSegmentType::OptionalCatchAll(..)
        )
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]` or `[[...name:constraint]]`
/// 2. **Catch-all**: `[...name]` or `[...name:constraint]`
/// 3. **Optional param**: `[name?]` or `[name:constraint?]`
/// 4. **Required param**: `[name]` or `[name:constraint]`
/// 5. **Static**: Any other text
///
/// # Examples
///
/// ```
/// use fileroute_router::route::pattern::{classify_segment, PatternSegmentType};
///
/// assert_eq!(
///     classify_segment("[id:int?]"),
///     PatternSegmentType::Optional("id".to_string(), Some("int".to_string()))
/// );
/// assert_eq!(
///     classify_segment("[...path]"),
///     PatternSegmentType::CatchAll("path".to_string(), None)
/// );
/// ```
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    if let Some(inner) = segment
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
    {
        if let Some(param_part) = inner.strip_prefix("...") {
            let (param_name, constraint) = parse_param_with_constraint(param_part);
            return PatternSegmentType::OptionalCatchAll(param_name, constraint);
        }
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            if let Some(param_part) = inner.strip_prefix("...") {
                let (param_name, constraint) = parse_param_with_constraint(param_part);
                return PatternSegmentType::CatchAll(param_name, constraint);
            }

            if let Some(param_part) = inner.strip_suffix('?') {
                let (param_name, constraint) = parse_param_with_constraint(param_part);
                return PatternSegmentType::Optional(param_name, constraint);
            }

            let (param_name, constraint) = parse_param_with_constraint(inner);
            PatternSegmentType::Required(param_name, constraint)
        }
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

/// Splits `name` or `name:constraint` (pure function)
///
/// Only the first `:` separates; the rest belongs to the constraint name.
///
/// # Examples
///
/// ```
/// use fileroute_router::route::pattern::parse_param_with_constraint;
///
/// assert_eq!(parse_param_with_constraint("path"), ("path".to_string(), None));
/// assert_eq!(
///     parse_param_with_constraint("path:file"),
///     ("path".to_string(), Some("file".to_string()))
/// );
/// ```
pub fn parse_param_with_constraint(param: &str) -> (String, Option<String>) {
    param
        .split_once(':')
        .map(|(name, constraint)| (name.to_string(), Some(constraint.to_string())))
        .unwrap_or_else(|| (param.to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    #[test]
    fn test_classify_static() {
        assert_eq!(
            classify_segment("favicon.ico"),
            PatternSegmentType::Static("favicon.ico".to_string())
        );
    }

    #[test]
    fn test_classify_required_with_constraint() {
        assert_eq!(
            classify_segment("[name:file]"),
            PatternSegmentType::Required("name".to_string(), some("file"))
        );
    }

    #[test]
    fn test_classify_optional() {
        assert_eq!(
            classify_segment("[lang?]"),
            PatternSegmentType::Optional("lang".to_string(), None)
        );
    }

    #[test]
    fn test_classify_catch_all_with_constraint() {
        assert_eq!(
            classify_segment("[...path:file]"),
            PatternSegmentType::CatchAll("path".to_string(), some("file"))
        );
    }

    #[test]
    fn test_classify_optional_catch_all_with_constraint() {
        assert_eq!(
            classify_segment("[[...path:nonfile]]"),
            PatternSegmentType::OptionalCatchAll("path".to_string(), some("nonfile"))
        );
    }

    #[test]
    fn test_unbalanced_brackets_are_static() {
        assert!(classify_segment("[id").is_static());
        assert!(classify_segment("id]").is_static());
    }

    #[test]
    fn test_accessors() {
        let seg = classify_segment("[[...rest:slug]]");
        assert_eq!(seg.param_name(), Some("rest"));
        assert_eq!(seg.constraint(), Some("slug"));
        assert!(seg.is_catch_all());
        assert!(seg.is_optional());

        let seg = classify_segment("docs");
        assert_eq!(seg.param_name(), None);
        assert_eq!(seg.constraint(), None);
    }

    #[test]
    fn test_parse_param_multiple_colons() {
        let (name, constraint) = parse_param_with_constraint("id:int:extra");
        assert_eq!(name, "id");
        assert_eq!(constraint.as_deref(), Some("int:extra"));
    }
}
