/// Template parsing and priority calculation for routes
///
/// Pure functional parsers that turn route templates into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use std::collections::HashMap;

use super::pattern::{classify_segment, PatternSegmentType};
use crate::RouterError;

/// Parsed form of a route template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPattern {
    /// Canonical pattern like "/assets/*path"
    pub pattern: String,
    /// Typed segments in template order
    pub segments: Vec<PatternSegmentType>,
    /// Parameter names in template order
    pub params: Vec<String>,
    /// Names of optional parameters (including optional catch-alls)
    pub optional_params: Vec<String>,
    /// Number of parameter segments
    pub dynamic_count: usize,
    /// Whether the template ends in a catch-all
    pub has_catch_all: bool,
    /// Whether that catch-all is optional
    pub optional_catch_all: bool,
    /// Parameter name → constraint name
    pub param_constraints: HashMap<String, String>,
}

impl ParsedPattern {
    /// Priority derived from the parsed shape (lower matches first)
    pub fn priority(&self) -> usize {
        calculate_priority(
            self.has_catch_all,
            self.optional_catch_all,
            self.dynamic_count,
            self.segments.len(),
            self.static_prefix_len(),
            !self.optional_params.is_empty(),
        )
    }

    /// Number of literal segments before the first parameter
    pub fn static_prefix_len(&self) -> usize {
        self.segments.iter().take_while(|s| s.is_static()).count()
    }

    fn push_static(mut self, text: &str) -> Self {
        self.pattern.push('/');
        self.pattern.push_str(text);
        self.segments.push(PatternSegmentType::Static(text.to_string()));
        self
    }

    fn push_param(mut self, segment: PatternSegmentType) -> Result<Self, String> {
        let name = segment.param_name().unwrap_or_default().to_string();

        if name.is_empty() {
            return Err("empty parameter name".to_string());
        }
        if self.params.contains(&name) {
            return Err(format!("duplicate parameter `{}`", name));
        }

        match &segment {
            PatternSegmentType::CatchAll(..) => {
                self.pattern.push_str("/*");
                self.pattern.push_str(&name);
                self.has_catch_all = true;
            }
            PatternSegmentType::OptionalCatchAll(..) => {
                self.pattern.push_str("/*");
                self.pattern.push_str(&name);
                self.pattern.push('?');
                self.has_catch_all = true;
                self.optional_catch_all = true;
            }
            PatternSegmentType::Optional(..) => {
                self.pattern.push_str("/:");
                self.pattern.push_str(&name);
                self.pattern.push('?');
            }
            _ => {
                self.pattern.push_str("/:");
                self.pattern.push_str(&name);
            }
        }

        match segment.constraint() {
            Some("") => return Err(format!("empty constraint name for `{}`", name)),
            Some(constraint) => {
                self.param_constraints
                    .insert(name.clone(), constraint.to_string());
            }
            None => {}
        }

        if segment.is_optional() {
            self.optional_params.push(name.clone());
        }
        self.params.push(name);
        self.dynamic_count += 1;
        self.segments.push(segment);
        Ok(self)
    }

    /// Processes a single template segment
    fn process_segment(self, raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Ok(self);
        }
        if self.has_catch_all {
            return Err("catch-all parameter must be the last segment".to_string());
        }

        match classify_segment(raw) {
            PatternSegmentType::Static(text) => Ok(self.push_static(&text)),
            param => self.push_param(param),
        }
    }

    fn finalize(mut self) -> Self {
        if self.pattern.is_empty() {
            self.pattern = "/".to_string();
        }
        self
    }
}

/// Parses a route template (pure function)
///
/// # Examples
///
/// ```
/// use fileroute_router::route::parser::parse_pattern;
///
/// let parsed = parse_pattern("/assets/[...path:file]").unwrap();
/// assert_eq!(parsed.pattern, "/assets/*path");
/// assert_eq!(parsed.params, vec!["path".to_string()]);
/// assert_eq!(parsed.param_constraints.get("path").map(String::as_str), Some("file"));
///
/// assert!(parse_pattern("/[...a]/b").is_err());
/// ```
///
/// # Errors
///
/// `RouterError::InvalidTemplate` for empty parameter or constraint names,
/// duplicate parameters, or a catch-all that is not the last segment.
pub fn parse_pattern(template: &str) -> Result<ParsedPattern, RouterError> {
    template
        .split('/')
        .try_fold(ParsedPattern::default(), ParsedPattern::process_segment)
        .map(ParsedPattern::finalize)
        .map_err(|reason| RouterError::InvalidTemplate {
            template: template.to_string(),
            reason,
        })
}

/// Longest literal prefix that still orders catch-alls within their tier
pub const MAX_STATIC_PREFIX: usize = 100;

/// Calculates route priority for matching order (pure function)
///
/// Lower number = higher priority (matched first).
///
/// # Priority Order
///
/// 1. **Static routes** → 0
/// 2. **Dynamic routes** → 1-999
/// 3. **Required catch-all** → 1000+
/// 4. **Optional catch-all** → 2000+
///
/// Within a catch-all tier, more leading literal segments match first, so
/// `/assets/[...path]` is tried before `/[...path]`.
///
/// # Examples
///
/// ```
/// use fileroute_router::route::parser::calculate_priority;
///
/// assert_eq!(calculate_priority(false, false, 0, 2, 2, false), 0);
/// assert_eq!(calculate_priority(false, false, 1, 2, 1, false), 4); // 1 + 2 + 1
/// assert_eq!(calculate_priority(true, false, 1, 2, 1, false), 1099);
/// assert_eq!(calculate_priority(true, false, 1, 1, 0, false), 1100);
/// assert_eq!(calculate_priority(true, true, 1, 2, 1, true), 2099);
/// ```
pub fn calculate_priority(
    has_catch_all: bool,
    optional_catch_all: bool,
    dynamic_count: usize,
    depth: usize,
    static_prefix: usize,
    has_optional: bool,
) -> usize {
    if has_catch_all {
        let specificity = MAX_STATIC_PREFIX - static_prefix.min(MAX_STATIC_PREFIX);
        if optional_catch_all {
            2000 + specificity
        } else {
            1000 + specificity
        }
    } else if dynamic_count > 0 {
        let optional_bonus = if has_optional { 0 } else { 1 };
        dynamic_count + depth + optional_bonus
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reason(template: &str) -> String {
        match parse_pattern(template) {
            Err(RouterError::InvalidTemplate { reason, .. }) => reason,
            other => panic!("expected InvalidTemplate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_static() {
        let parsed = parse_pattern("/robots.txt").unwrap();
        assert_eq!(parsed.pattern, "/robots.txt");
        assert!(parsed.params.is_empty());
        assert_eq!(parsed.priority(), 0);
    }

    #[test]
    fn test_parse_root() {
        let parsed = parse_pattern("/").unwrap();
        assert_eq!(parsed.pattern, "/");
        assert!(parsed.segments.is_empty());
    }

    #[test]
    fn test_parse_without_leading_slash() {
        let parsed = parse_pattern("files/[name:file]").unwrap();
        assert_eq!(parsed.pattern, "/files/:name");
    }

    #[test]
    fn test_parse_optional_param() {
        let parsed = parse_pattern("/docs/[lang:alpha?]").unwrap();
        assert_eq!(parsed.pattern, "/docs/:lang?");
        assert_eq!(parsed.optional_params, vec!["lang".to_string()]);
        assert_eq!(parsed.param_constraints.get("lang"), Some(&"alpha".to_string()));
    }

    #[test]
    fn test_parse_catch_all() {
        let parsed = parse_pattern("/assets/[...path:file]").unwrap();
        assert_eq!(parsed.pattern, "/assets/*path");
        assert!(parsed.has_catch_all);
        assert!(!parsed.optional_catch_all);
        assert_eq!(parsed.static_prefix_len(), 1);
        assert_eq!(parsed.priority(), 1099);
    }

    #[test]
    fn test_parse_optional_catch_all() {
        let parsed = parse_pattern("/[[...path:nonfile]]").unwrap();
        assert_eq!(parsed.pattern, "/*path?");
        assert!(parsed.optional_catch_all);
        assert_eq!(parsed.optional_params, vec!["path".to_string()]);
        assert_eq!(parsed.priority(), 2100);
    }

    #[test]
    fn test_parse_rejects_empty_names() {
        assert_eq!(reason("/[]"), "empty parameter name");
        assert_eq!(reason("/[:file]"), "empty parameter name");
        assert_eq!(reason("/[id:]"), "empty constraint name for `id`");
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        assert_eq!(reason("/[id]/[id]"), "duplicate parameter `id`");
    }

    #[test]
    fn test_parse_rejects_segments_after_catch_all() {
        assert_eq!(
            reason("/[...path]/edit"),
            "catch-all parameter must be the last segment"
        );
        assert_eq!(
            reason("/[...path]/[id]"),
            "catch-all parameter must be the last segment"
        );
    }

    #[test]
    fn test_calculate_priority_ordering() {
        let static_route = calculate_priority(false, false, 0, 2, 2, false);
        let dynamic = calculate_priority(false, false, 1, 2, 1, false);
        let catch_all = calculate_priority(true, false, 1, 2, 1, false);
        let optional_catch_all = calculate_priority(true, true, 1, 2, 1, true);

        assert!(static_route < dynamic);
        assert!(dynamic < catch_all);
        assert!(catch_all < optional_catch_all);
    }

    #[test]
    fn test_longer_literal_prefix_wins_among_catch_alls() {
        let root = parse_pattern("/[...path:file]").unwrap();
        let assets = parse_pattern("/assets/[...path:file]").unwrap();
        let nested = parse_pattern("/assets/img/[...path:file]").unwrap();
        let after_param = parse_pattern("/[site]/[...path]").unwrap();

        assert!(nested.priority() < assets.priority());
        assert!(assets.priority() < root.priority());
        assert_eq!(after_param.priority(), root.priority());

        let optional_root = parse_pattern("/[[...path]]").unwrap();
        let optional_app = parse_pattern("/app/[[...path]]").unwrap();
        assert!(optional_app.priority() < optional_root.priority());
        assert!(root.priority() < optional_app.priority());
    }
}
