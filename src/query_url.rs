use crate::compat::{Box, String, ToString, Vec};
use crate::error::{Error, Result};
use crate::param_map::ParamMap;
use crate::query;
use crate::types::Secure;
use crate::url_parts::UrlParts;
use crate::value::Value;

/// Keys whose literal zero survives pruning unless configured otherwise.
pub const DEFAULT_NUMERIC_EXCEPTION_KEYS: &[&str] = &["distance"];

/// Source of the "current" URL used when a [`QueryUrl`] is built without one.
///
/// In a browser this is the page location; elsewhere it is whatever the host
/// application considers the current request URL.
pub trait CurrentUrl {
    fn current_url(&self) -> String;
}

impl CurrentUrl for &str {
    fn current_url(&self) -> String {
        (*self).to_string()
    }
}

impl CurrentUrl for String {
    fn current_url(&self) -> String {
        self.clone()
    }
}

/// A [`CurrentUrl`] backed by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

impl<F: Fn() -> String> CurrentUrl for FromFn<F> {
    fn current_url(&self) -> String {
        (self.0)()
    }
}

/// Wrap a closure as a [`CurrentUrl`] provider.
pub fn from_fn<F: Fn() -> String>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// A URL whose query string is exposed as a nested parameter tree.
///
/// Parameters are addressed with dot-notation keys (`"filter.price.min"`)
/// and written back with bracket nesting (`filter[price][min]=10`). Empty
/// values are pruned after every change.
///
/// # Examples
///
/// ```
/// use query_url::QueryUrl;
///
/// let mut url = QueryUrl::parse("https://example.org/search?q=bike").unwrap();
/// url.set_parameter("filter.price.max", 300).set_parameter("q", "");
/// assert_eq!(url.build_url(), "https://example.org/search?filter[price][max]=300");
/// ```
#[derive(Debug)]
pub struct QueryUrl {
    original_input: Option<String>,
    url: UrlParts,
    parameters: ParamMap,
    numeric_exception_keys: Vec<String>,
}

/// Builder for [`QueryUrl`].
#[must_use]
pub struct Builder<'a> {
    url: Option<&'a str>,
    parameters: Vec<(String, Value)>,
    secure: Secure,
    numeric_exception_keys: Vec<String>,
    current_url: Option<Box<dyn CurrentUrl + 'a>>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            url: None,
            parameters: Vec::new(),
            secure: Secure::Unchanged,
            numeric_exception_keys: DEFAULT_NUMERIC_EXCEPTION_KEYS
                .iter()
                .map(ToString::to_string)
                .collect(),
            current_url: None,
        }
    }
}

impl<'a> Builder<'a> {
    /// URL to parse. `None` or `""` falls back to the current URL.
    pub fn url(mut self, url: impl Into<Option<&'a str>>) -> Self {
        self.url = url.into();
        self
    }

    /// Parameters merged over the URL's own query (dot-notation keys allowed).
    pub fn parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.parameters.extend(
            parameters
                .into_iter()
                .map(|(key, value)| (key.as_ref().to_string(), value.into())),
        );
        self
    }

    pub fn secure(mut self, secure: impl Into<Secure>) -> Self {
        self.secure = secure.into();
        self
    }

    /// Replace the keys whose literal zero is kept by pruning.
    pub fn numeric_exception_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.numeric_exception_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn current_url(mut self, provider: impl CurrentUrl + 'a) -> Self {
        self.current_url = Some(Box::new(provider));
        self
    }

    /// Parse the URL and assemble the parameter tree.
    ///
    /// # Errors
    ///
    /// [`Error::NoCurrentUrl`] when no URL is given and no provider is set,
    /// [`Error::MalformedUrl`] when the working URL does not parse.
    pub fn build(self) -> Result<QueryUrl> {
        let original_input = self.url.filter(|url| !url.is_empty()).map(ToString::to_string);

        let working = match (&original_input, &self.current_url) {
            (Some(url), _) => url.clone(),
            (None, Some(provider)) => provider.current_url(),
            (None, None) => return Err(Error::NoCurrentUrl),
        };

        let mut url = UrlParts::parse(&working)?;
        if let Some(scheme) = self.secure.forced_scheme() {
            url.force_scheme(scheme);
        }

        let mut parameters = url
            .take_query()
            .map(|raw| query::decode(&raw))
            .unwrap_or_default();
        for (key, value) in self.parameters {
            parameters.set_path(&key, value);
        }

        let mut query_url = QueryUrl {
            original_input,
            url,
            parameters,
            numeric_exception_keys: self.numeric_exception_keys,
        };
        query_url.prune();

        log::debug!(
            "built query url {} ({} top-level parameters)",
            query_url.url,
            query_url.parameters.len()
        );
        Ok(query_url)
    }
}

impl QueryUrl {
    pub fn builder<'a>() -> Builder<'a> {
        Builder::default()
    }

    /// Parse an explicit URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUrl`] if `url` is empty or does not parse.
    pub fn parse(url: &str) -> Result<Self> {
        if url.is_empty() {
            return Err(Error::MalformedUrl(crate::ParseError::RelativeUrlWithoutBase));
        }
        Self::builder().url(url).build()
    }

    fn prune(&mut self) {
        let before = self.parameters.len();
        self.parameters.prune(&self.numeric_exception_keys);
        log::trace!(
            "pruned parameters: {before} -> {} top-level keys",
            self.parameters.len()
        );
    }

    /// Assign each `(key, value)`; keys may use dot-notation.
    pub fn set_parameters<I, K, V>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in parameters {
            self.parameters.set_path(key.as_ref(), value);
        }
        self.prune();
        self
    }

    pub fn set_parameter(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.set_parameters([(key, value)])
    }

    /// Remove a key or subtree. Unknown keys are ignored.
    pub fn remove_parameter(&mut self, key: &str) -> &mut Self {
        self.remove_parameters([key])
    }

    pub fn remove_parameters<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for key in keys {
            self.parameters.remove_path(key.as_ref());
        }
        self.prune();
        self
    }

    pub fn remove_all_parameters(&mut self) -> &mut Self {
        self.parameters.clear();
        self
    }

    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters.contains_path(key)
    }

    /// `true` when every key is present (vacuously `true` for no keys).
    pub fn has_parameters<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        keys.into_iter()
            .all(|key| self.parameters.contains_path(key.as_ref()))
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if `key` is absent.
    pub fn require_parameter(&self, key: &str) -> Result<&Value> {
        self.parameters
            .get_path(key)
            .ok_or_else(|| Error::MissingParameter(key.to_string()))
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get_path(key)
    }

    /// The present keys among `keys`, with their original nesting.
    pub fn select_parameters<I>(&self, keys: I) -> ParamMap
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.parameters.select(keys)
    }

    /// A deep copy of all parameters except `keys`.
    pub fn parameters_excluding<I>(&self, keys: I) -> ParamMap
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.parameters.without(keys)
    }

    pub fn parameters(&self) -> &ParamMap {
        &self.parameters
    }

    /// `scheme://host[:port]path[?query][#fragment]`
    pub fn build_url(&self) -> String {
        self.url.to_absolute(&query::encode(&self.parameters))
    }

    /// `path[?query][#fragment]`
    pub fn build_relative_url(&self) -> String {
        self.url.to_relative(&query::encode(&self.parameters))
    }

    /// `None` when asked to and the instance was created without a URL,
    /// otherwise [`build_url`](Self::build_url).
    pub fn to_optional_string(&self, allow_none_if_empty_url: bool) -> Option<String> {
        if allow_none_if_empty_url && self.original_input.is_none() {
            return None;
        }
        Some(self.build_url())
    }

    /// The URL passed at construction, `None` if it was absent or empty.
    pub fn original_input(&self) -> Option<&str> {
        self.original_input.as_deref()
    }

    pub fn numeric_exception_keys(&self) -> &[String] {
        &self.numeric_exception_keys
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.url.set_path(path);
        self
    }

    pub fn host(&self) -> &str {
        self.url.host()
    }

    /// Set the host, optionally as `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUrl`] for an invalid host or port; the URL is
    /// left unchanged.
    pub fn set_host(&mut self, host: &str) -> Result<&mut Self> {
        self.url.set_host(host)?;
        Ok(self)
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    pub fn set_port(&mut self, port: Option<u16>) -> &mut Self {
        self.url.set_port(port);
        self
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Force `https`/`http`; [`Secure::Unchanged`] is a no-op.
    pub fn set_secure(&mut self, secure: impl Into<Secure>) -> &mut Self {
        if let Some(scheme) = secure.into().forced_scheme() {
            self.url.force_scheme(scheme);
        }
        self
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        self.url.set_fragment(Some(fragment));
        self
    }

    pub fn remove_fragment(&mut self) -> &mut Self {
        self.url.set_fragment(None);
        self
    }

    fn reparse(&self) -> Result<Self> {
        Self::builder()
            .url(self.build_url().as_str())
            .numeric_exception_keys(self.numeric_exception_keys.iter().cloned())
            .build()
    }
}

impl Clone for QueryUrl {
    /// Rebuilds from this instance's absolute URL, so parameter values come
    /// back as decoded strings.
    fn clone(&self) -> Self {
        match self.reparse() {
            Ok(copy) => {
                log::debug!("cloned query url {}", copy.url);
                copy
            }
            Err(err) => {
                // A host accepted by set_host always re-parses; keep a
                // field-wise copy if that ever stops holding.
                log::warn!("re-parsing {} failed ({err}), copying fields", self.url);
                Self {
                    original_input: Some(self.build_url()),
                    url: self.url.clone(),
                    parameters: self.parameters.clone(),
                    numeric_exception_keys: self.numeric_exception_keys.clone(),
                }
            }
        }
    }
}

impl core::fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.build_url())
    }
}

impl core::str::FromStr for QueryUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_query() {
        let url = QueryUrl::parse("https://example.org/list?category[0]=cars&page=2").unwrap();
        assert_eq!(url.parameter("page"), Some(&Value::from("2")));
        assert_eq!(
            url.parameter("category"),
            Some(&["cars"].into_iter().collect::<Value>())
        );
        assert_eq!(url.original_input(), Some("https://example.org/list?category[0]=cars&page=2"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(QueryUrl::parse(""), Err(Error::MalformedUrl(_))));
    }

    #[test]
    fn test_builder_needs_url_or_provider() {
        assert_eq!(QueryUrl::builder().build().unwrap_err(), Error::NoCurrentUrl);
        assert_eq!(
            QueryUrl::builder().url("").build().unwrap_err(),
            Error::NoCurrentUrl
        );
    }

    #[test]
    fn test_builder_with_closure_provider() {
        let url = QueryUrl::builder()
            .current_url(from_fn(|| "https://example.org/page?x=1".to_string()))
            .build()
            .unwrap();
        assert_eq!(url.original_input(), None);
        assert_eq!(url.parameter("x"), Some(&Value::from("1")));
    }

    #[test]
    fn test_caller_parameters_win() {
        let url = QueryUrl::builder()
            .url("https://example.org/?a[b]=1&a[c]=2&keep=yes")
            .parameters([("a.b", "9")])
            .build()
            .unwrap();
        assert_eq!(url.parameter("a.b"), Some(&Value::from("9")));
        assert_eq!(url.parameter("a.c"), Some(&Value::from("2")));
        assert_eq!(url.build_url(), "https://example.org/?a[b]=9&a[c]=2&keep=yes");
    }

    #[test]
    fn test_custom_numeric_exception_keys() {
        let url = QueryUrl::builder()
            .url("https://example.org/?radius=0&distance=")
            .numeric_exception_keys(["radius"])
            .build()
            .unwrap();
        assert_eq!(url.parameter("radius"), Some(&Value::from("0")));
        assert!(!url.has_parameter("distance"));
        assert_eq!(url.numeric_exception_keys(), ["radius".to_string()]);
    }

    #[test]
    fn test_set_secure_and_port() {
        let mut url = QueryUrl::parse("https://example.org:8443/a").unwrap();
        url.set_secure(false).set_port(None);
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.build_url(), "http://example.org/a");
        url.set_secure(Secure::Unchanged);
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_from_str_and_display() {
        let url: QueryUrl = "http://example.org/?b=2&a=1".parse().unwrap();
        assert_eq!(url.to_string(), "http://example.org/?b=2&a=1");
    }
}
