//! Query string construction.
//!
//! Options maps may contain unset values; those entries are dropped entirely
//! before the remaining pairs are form-encoded.

use std::fmt::Display;
use url::form_urlencoded;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.pairs.push((key.into(), value.to_string()));
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: impl Into<String>, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.pairs.push((key.into(), map(value)));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Display,
    {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Chainable variant of [`QueryParams::push_opt`].
    #[must_use]
    pub fn with_opt<T>(mut self, key: impl Into<String>, value: Option<T>) -> Self
    where
        T: Display,
    {
        self.push_opt(key, value);
        self
    }

    /// Chainable variant of [`QueryParams::push`].
    #[must_use]
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Display,
    {
        self.push(key, value);
        self
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as `?k=v&...`, or an empty string when no parameters were added.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        build_query_string(
            self.pairs
                .iter()
                .map(|(key, value)| (key.as_str(), Some(value.as_str()))),
        )
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push_opt(key, value);
        }
        params
    }
}

/// Build a query string from an options map, dropping unset entries.
///
/// Pairs are encoded in iteration order. Returns an empty string when no
/// entry has a value, otherwise the encoded pairs prefixed with `?`.
#[must_use]
pub fn build_query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: Display,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key.as_ref(), &value.to_string());
            any = true;
        }
    }

    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{build_query_string, QueryParams};
    use std::collections::BTreeMap;

    #[test]
    fn build_query_string_skips_none() {
        let query = build_query_string([("a", Some("1")), ("b", None), ("c", Some("3"))]);
        assert_eq!(query, "?a=1&c=3");
    }

    #[test]
    fn build_query_string_all_none_is_empty() {
        let query = build_query_string([("a", Option::<&str>::None), ("b", None)]);
        assert_eq!(query, "");
    }

    #[test]
    fn build_query_string_empty_input() {
        let query = build_query_string(Vec::<(&str, Option<u32>)>::new());
        assert!(query.is_empty());
    }

    #[test]
    fn build_query_string_encodes_values() {
        let query = build_query_string([("since", Some("2024-01-01 10:00")), ("q", Some("a&b"))]);
        assert_eq!(query, "?since=2024-01-01+10%3A00&q=a%26b");
    }

    #[test]
    fn build_query_string_from_map() {
        let mut options = BTreeMap::new();
        options.insert("level", Some("error".to_string()));
        options.insert("lines", Some("100".to_string()));
        options.insert("since", None);
        assert_eq!(build_query_string(options), "?level=error&lines=100");
    }

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn push_opt_with_applies_mapper() {
        let mut params = QueryParams::new();
        params.push_opt_with("limit", Some(5u32), |v| format!("{v:02}"));
        assert_eq!(
            params.into_pairs(),
            vec![("limit".to_string(), "05".to_string())]
        );
    }

    #[test]
    fn chained_builder_renders_in_order() {
        let params = QueryParams::new()
            .with("lines", 50)
            .with_opt("level", Option::<&str>::None)
            .with_opt("follow", Some(false));
        assert_eq!(params.to_query_string(), "?lines=50&follow=false");
    }

    #[test]
    fn collect_from_options() {
        let params: QueryParams = vec![("a", Some(1)), ("b", None), ("c", Some(3))]
            .into_iter()
            .collect();
        assert_eq!(params.to_query_string(), "?a=1&c=3");
    }
}
