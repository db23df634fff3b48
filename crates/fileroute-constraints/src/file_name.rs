/// File-name classification for route values
///
/// Pure syntactic check used by the `file` and `nonfile` constraints.
/// Nothing here touches the file system or validates OS-legal characters.

/// Returns whether `value` looks like a file name
///
/// Only the last segment counts: the text after the final `/`, or the whole
/// value when there is none. That segment must contain a `.` followed,
/// somewhere after the first dot, by at least one character that is not a dot.
///
/// # Examples
///
/// ```
/// use fileroute_constraints::is_file_name;
///
/// assert!(is_file_name("/a/b/c.txt"));
/// assert!(is_file_name(".gitignore"));
/// assert!(is_file_name("foo..bar"));
///
/// assert!(!is_file_name(""));
/// assert!(!is_file_name("/a/b.d/c"));
/// assert!(!is_file_name("images/"));
/// assert!(!is_file_name("foo.."));
/// ```
///
/// # Performance
///
/// - O(n) where n is the value length
/// - No allocation, only borrowed slices
/// - Stops at the first non-dot character after the dot
pub fn is_file_name(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    // `/` and `.` are ASCII, so byte offsets are char boundaries.
    let last_segment = value
        .rfind('/')
        .map_or(value, |slash| &value[slash + 1..]);

    last_segment
        .find('.')
        .map(|dot| last_segment[dot + 1..].bytes().any(|b| b != b'.'))
        .unwrap_or(false)
}
