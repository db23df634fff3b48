//! Integration tests for the `file` and `nonfile` constraints
//!
//! Covers the classifier table, the runtime (value lookup) entry point, the
//! literal entry point, and agreement between the two.

use fileroute_constraints::*;

const CASES: &[(&str, bool)] = &[
    ("/a/b/c.txt", true),
    ("/hello.world.txt", true),
    ("hello.world.txt", true),
    (".gitignore", true),
    ("/a/b/c", false),
    ("/a/b.d/c", false),
    ("/a/b.d/c/", false),
    ("", false),
    ("foo.", false),
    ("foo..", false),
    ("foo..bar", true),
];

fn file() -> ConstraintRef {
    ConstraintMap::default().resolve("file").unwrap()
}

fn runtime(constraint: &ConstraintRef, name: &str, values: &RouteValues) -> bool {
    constraint
        .matches(None, name, values, RouteDirection::IncomingRequest)
        .unwrap()
}

// ============================================================================
// Classifier
// ============================================================================

#[test]
fn test_classifier_table() {
    for &(input, expected) in CASES {
        assert_eq!(is_file_name(input), expected, "is_file_name({input:?})");
    }
}

#[test]
fn test_last_segment_decides() {
    // Dots before the final `/` never count.
    for prefix in ["", "/", "a.b/", "x/y.z/"] {
        assert!(!is_file_name(&format!("{prefix}plain")));
        assert!(is_file_name(&format!("{prefix}plain.md")));
    }
}

// ============================================================================
// Runtime entry point
// ============================================================================

#[test]
fn test_runtime_table() {
    let file = file();
    for &(input, expected) in CASES {
        let values = RouteValues::new().with("path", input);
        assert_eq!(runtime(&file, "path", &values), expected, "{input:?}");
    }
}

#[test]
fn test_runtime_report_pdf() {
    let values = RouteValues::new().with("file", "report.pdf");
    assert!(runtime(&file(), "file", &values));
}

#[test]
fn test_runtime_missing_key_is_false() {
    let values = RouteValues::new().with("other", "report.pdf");
    assert!(!runtime(&file(), "file", &values));
}

#[test]
fn test_runtime_null_value_is_false() {
    let mut values = RouteValues::new();
    values.insert_null("file");
    assert!(!runtime(&file(), "file", &values));
}

#[test]
fn test_runtime_missing_parameter_name_fails_fast() {
    let values = RouteValues::new().with("file", "report.pdf");
    let result = file().matches(None, "", &values, RouteDirection::IncomingRequest);
    assert_eq!(result, Err(ConstraintError::MissingParameterName));
}

#[test]
fn test_runtime_ignores_request_and_direction() {
    let values = RouteValues::new().with("file", "site.css");
    let request = RequestContext::new("/assets/site.css").with_method("GET");

    let file = file();
    for direction in [RouteDirection::IncomingRequest, RouteDirection::UrlGeneration] {
        assert_eq!(file.matches(Some(&request), "file", &values, direction), Ok(true));
        assert_eq!(file.matches(None, "file", &values, direction), Ok(true));
    }
}

#[test]
fn test_runtime_typed_values() {
    let values = RouteValues::new()
        .with("version", 3)
        .with("ratio", 0.5)
        .with("flag", true);

    let file = file();
    assert!(!runtime(&file, "version", &values));
    assert!(runtime(&file, "ratio", &values));
    assert!(!runtime(&file, "flag", &values));
}

#[test]
fn test_runtime_extreme_floats_use_exponent_text() {
    let values = RouteValues::new()
        .with("tiny", 1e-7)
        .with("huge", 1e21)
        .with("fraction", 1.5e-7);

    let file = file();
    assert!(!runtime(&file, "tiny", &values));
    assert!(!runtime(&file, "huge", &values));
    assert!(runtime(&file, "fraction", &values));
}

// ============================================================================
// Literal entry point
// ============================================================================

#[test]
fn test_literal_trailing_slash() {
    assert!(!file().matches_literal("file", "images/"));
}

#[test]
fn test_literal_ignores_parameter_name() {
    let file = file();
    assert!(file.matches_literal("", "a.txt"));
    assert!(file.matches_literal("anything", "a.txt"));
}

#[test]
fn test_literal_and_runtime_agree() {
    let map = ConstraintMap::default();
    for name in ["file", "nonfile"] {
        let constraint = map.resolve(name).unwrap();
        for &(input, _) in CASES {
            let values = RouteValues::new().with("p", input);
            assert_eq!(
                runtime(&constraint, "p", &values),
                constraint.matches_literal("p", input),
                "{name} on {input:?}"
            );
        }
    }
}

// ============================================================================
// nonfile
// ============================================================================

#[test]
fn test_nonfile_is_negation_for_present_values() {
    let nonfile = ConstraintMap::default().resolve("nonfile").unwrap();
    for &(input, expected) in CASES {
        assert_eq!(nonfile.matches_literal("p", input), !expected, "{input:?}");
    }
}

#[test]
fn test_nonfile_missing_value_is_false() {
    let nonfile = ConstraintMap::default().resolve("nonfile").unwrap();
    assert!(!runtime(&nonfile, "path", &RouteValues::new()));
}
