/// Route values handed to constraints
///
/// A route value is whatever the router extracted (or defaulted) for a
/// parameter. Values may be typed; constraints that inspect text coerce them
/// through [`RouteValue::to_text`], which never depends on the process locale.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A single typed route value
#[derive(Debug, Clone, PartialEq)]
pub enum RouteValue {
    /// Text captured from a path segment or configured as a default
    Text(String),
    /// Signed integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl RouteValue {
    /// Returns the invariant text form of this value
    ///
    /// Text is borrowed; other variants are formatted with `Display`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroute_constraints::RouteValue;
    ///
    /// assert_eq!(RouteValue::from("report.pdf").to_text(), "report.pdf");
    /// assert_eq!(RouteValue::from(1.5).to_text(), "1.5");
    /// assert_eq!(RouteValue::from(-42).to_text(), "-42");
    /// ```
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            RouteValue::Text(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Returns the text if this is a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RouteValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RouteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteValue::Text(text) => f.write_str(text),
            RouteValue::Int(n) => write!(f, "{}", n),
            RouteValue::Float(n) => format_float(*n, f),
            RouteValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Plain notation for decimal exponents in `-4..15`, otherwise `1.5E-07` style
fn format_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value == 0.0 || !value.is_finite() {
        return write!(f, "{}", value);
    }

    let scientific = format!("{:E}", value);
    let Some((mantissa, exponent)) = scientific.split_once('E') else {
        return f.write_str(&scientific);
    };
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

    if (-4..15).contains(&exponent) {
        write!(f, "{}", value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}E{}{:02}", mantissa, sign, exponent.unsigned_abs())
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::Text(value.to_string())
    }
}

impl From<String> for RouteValue {
    fn from(value: String) -> Self {
        RouteValue::Text(value)
    }
}

impl From<i64> for RouteValue {
    fn from(value: i64) -> Self {
        RouteValue::Int(value)
    }
}

impl From<i32> for RouteValue {
    fn from(value: i32) -> Self {
        RouteValue::Int(i64::from(value))
    }
}

impl From<u32> for RouteValue {
    fn from(value: u32) -> Self {
        RouteValue::Int(i64::from(value))
    }
}

impl From<f64> for RouteValue {
    fn from(value: f64) -> Self {
        RouteValue::Float(value)
    }
}

impl From<bool> for RouteValue {
    fn from(value: bool) -> Self {
        RouteValue::Bool(value)
    }
}

/// Parameter name → value mapping consulted by runtime constraints
///
/// A key can be missing, or present with no value (`insert_null`). Both read
/// back as `None` from [`RouteValues::get`]; constraints treat either as
/// "no match" rather than an error.
///
/// # Examples
///
/// ```
/// use fileroute_constraints::RouteValues;
///
/// let mut values = RouteValues::new();
/// values.insert("file", "report.pdf");
/// values.insert_null("lang");
///
/// assert_eq!(values.get("file").map(|v| v.to_text()).as_deref(), Some("report.pdf"));
/// assert!(values.get("lang").is_none());
/// assert!(values.contains_key("lang"));
/// assert!(values.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteValues {
    values: HashMap<String, Option<RouteValue>>,
}

impl RouteValues {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the previous value if any
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<RouteValue>,
    ) -> Option<RouteValue> {
        self.values
            .insert(name.into(), Some(value.into()))
            .flatten()
    }

    /// Records `name` as present but without a value
    pub fn insert_null(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), None);
    }

    /// Builder form of [`RouteValues::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a value; missing keys and null values both yield `None`
    pub fn get(&self, name: &str) -> Option<&RouteValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Whether the key is present, even with a null value
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes a key, returning its value if it had one
    pub fn remove(&mut self, name: &str) -> Option<RouteValue> {
        self.values.remove(name).flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all keys with their (possibly null) values
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&RouteValue>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<RouteValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(name, value)| (name.into(), Some(value.into())))
            .collect();
        Self { values }
    }
}

impl From<HashMap<String, String>> for RouteValues {
    fn from(params: HashMap<String, String>) -> Self {
        params.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_borrowed() {
        let value = RouteValue::from("a.txt");
        assert!(matches!(value.to_text(), Cow::Borrowed("a.txt")));
    }

    #[test]
    fn test_invariant_number_formatting() {
        assert_eq!(RouteValue::Float(1234.5).to_text(), "1234.5");
        assert_eq!(RouteValue::Float(0.25).to_text(), "0.25");
        assert_eq!(RouteValue::Int(1_000_000).to_text(), "1000000");
        assert_eq!(RouteValue::Float(0.0001).to_text(), "0.0001");
        assert_eq!(RouteValue::Float(123456789012345.0).to_text(), "123456789012345");
        assert_eq!(RouteValue::Bool(true).to_text(), "true");
    }

    #[test]
    fn test_null_and_missing_read_as_none() {
        let mut values = RouteValues::new();
        values.insert_null("a");

        assert!(values.get("a").is_none());
        assert!(values.get("b").is_none());
        assert!(values.contains_key("a"));
        assert!(!values.contains_key("b"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut values = RouteValues::new();
        assert_eq!(values.insert("id", 1), None);
        assert_eq!(values.insert("id", 2), Some(RouteValue::Int(1)));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_from_params_map() {
        let mut params = HashMap::new();
        params.insert("path".to_string(), "css/site.css".to_string());

        let values = RouteValues::from(params);
        assert_eq!(
            values.get("path"),
            Some(&RouteValue::Text("css/site.css".to_string()))
        );
    }

    #[test]
    fn test_collect_from_pairs() {
        let values: RouteValues = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("b").and_then(RouteValue::as_str), Some("2"));
    }

    #[test]
    fn test_extreme_floats_use_exponent_notation() {
        assert_eq!(RouteValue::Float(1e-7).to_text(), "1E-07");
        assert_eq!(RouteValue::Float(1.5e-7).to_text(), "1.5E-07");
        assert_eq!(RouteValue::Float(0.00001).to_text(), "1E-05");
        assert_eq!(RouteValue::Float(1e21).to_text(), "1E+21");
        assert_eq!(RouteValue::Float(-2.5e15).to_text(), "-2.5E+15");
        assert_eq!(RouteValue::Float(0.0).to_text(), "0");
    }
}
