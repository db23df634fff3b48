/// Route module for template-based routing
///
/// Contains pure functional components for template parsing:
/// - Pure functions (same input → same output)
/// - Pattern matching for control flow
/// - Constraint names only; resolution happens in the router

pub mod parser;
pub mod pattern;

pub use parser::{calculate_priority, parse_pattern, ParsedPattern};
pub use pattern::{classify_segment, parse_param_with_constraint, PatternSegmentType};
