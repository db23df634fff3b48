/// Request path utilities
///
/// All functions are **pure**. Segment values are never decoded here:
/// `%2F` stays `%2F` and case is preserved.

use std::borrow::Cow;
use std::path::{Component, Path};

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use fileroute_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/assets/site.css"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("assets"));
/// assert!(!is_valid_path("/assets/"));
/// assert!(!is_valid_path("/assets//site.css"));
/// assert!(!is_valid_path("/assets\\site.css"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if !path.starts_with('/') || path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// - Trailing slashes: `/docs/` → `/docs`
/// - Repeated slashes: `/docs//guide` → `/docs/guide`
/// - Backslashes: `\docs\guide` → `/docs/guide`
///
/// # Examples
///
/// ```
/// use fileroute_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/assets/app.js"), Cow::Borrowed("/assets/app.js")));
/// assert_eq!(normalize_path("/assets//app.js/"), "/assets/app.js");
/// assert_eq!(normalize_path("\\assets\\app.js"), "/assets/app.js");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let unified = path.replace('\\', "/");
    let joined = segments(&unified).collect::<Vec<_>>().join("/");

    if joined.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", joined))
    }
}

/// Non-empty `/`-separated segments of a path
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Whether any segment is `.` or `..`
///
/// Static file values with such segments could escape their root directory.
///
/// # Examples
///
/// ```
/// use fileroute_router::path::has_relative_components;
///
/// assert!(has_relative_components("../secret.txt"));
/// assert!(has_relative_components("css/./site.css"));
/// assert!(!has_relative_components("css/site..min.css"));
/// ```
pub fn has_relative_components(value: &str) -> bool {
    value
        .split(['/', '\\'])
        .any(|segment| segment == "." || segment == "..")
}

/// Whether joining `value` onto a root directory could leave that root
///
/// True for `.`/`..` segments and for anything the platform treats as
/// absolute: a leading slash or backslash, a root directory, or a drive prefix.
///
/// # Examples
///
/// ```
/// use fileroute_router::path::escapes_root;
///
/// assert!(escapes_root("/etc/passwd.txt"));
/// assert!(escapes_root("\\windows\\win.ini"));
/// assert!(escapes_root("img/../../secret.txt"));
/// assert!(!escapes_root("img/logo.png"));
/// ```
pub fn escapes_root(value: &str) -> bool {
    value.starts_with(['/', '\\'])
        || has_relative_components(value)
        || Path::new(value).is_absolute()
        || Path::new(value)
            .components()
            .any(|component| matches!(component, Component::Prefix(_) | Component::RootDir))
}
