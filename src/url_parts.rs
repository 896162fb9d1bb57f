use crate::checkers::{is_valid_scheme, parse_port};
use crate::compat::{String, ToString};
use crate::encoding::{FRAGMENT_SET, PATH_SET, USERINFO_SET, percent_encode_with_set};
use crate::error::{ParseError, ParseResult};
use crate::helpers::{authority_end, clean_tabs_and_newlines, prune_fragment, prune_query};
use crate::host::{normalize_host, split_host_port};
use crate::types::SchemeType;

/// Structured form of a hierarchical URL:
/// `scheme://[username[:password]@]host[:port]path[?query][#fragment]`
///
/// Components are stored already percent-encoded, so serialization is a
/// plain concatenation. The query is kept raw; fragment is stored without
/// its leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    scheme: String,
    scheme_type: SchemeType,
    username: String,
    password: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl UrlParts {
    /// Parse an absolute URL string.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first malformed component.
    pub fn parse(input: &str) -> ParseResult<Self> {
        let cleaned = clean_tabs_and_newlines(input);
        let input = cleaned.as_ref();

        if input.starts_with(['/', '?', '#', '.']) {
            return Err(ParseError::RelativeUrlWithoutBase);
        }
        let Some(colon) = memchr::memchr(b':', input.as_bytes()) else {
            return Err(ParseError::RelativeUrlWithoutBase);
        };

        let scheme = &input[..colon];
        if !is_valid_scheme(scheme) {
            return Err(ParseError::InvalidScheme);
        }
        let scheme = scheme.to_ascii_lowercase();
        let scheme_type = SchemeType::from_scheme(&scheme);

        let Some(rest) = input[colon + 1..].strip_prefix("//") else {
            return Err(ParseError::InvalidUrl);
        };
        let (rest, fragment) = prune_fragment(rest);
        let (rest, query) = prune_query(rest);
        let (authority, path) = rest.split_at(authority_end(rest));

        let (userinfo, host_port) = match authority.rfind('@') {
            Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
            None => (None, authority),
        };
        let (username, password) = match userinfo {
            Some(info) => match info.split_once(':') {
                Some((user, pass)) => (user, pass),
                None => (info, ""),
            },
            None => ("", ""),
        };

        let (hostname, port_text) = split_host_port(host_port);
        let port = match port_text {
            None | Some("") => None,
            Some(text) => Some(parse_port(text).ok_or(ParseError::InvalidPort)?),
        };
        let port = port.filter(|port| scheme_type.default_port() != Some(*port));
        let host = normalize_host(hostname)?;
        if host.is_empty() && !scheme_type.allows_empty_host() {
            return Err(ParseError::InvalidHost);
        }

        Ok(Self {
            scheme,
            scheme_type,
            username: percent_encode_with_set(username, USERINFO_SET).into_owned(),
            password: percent_encode_with_set(password, USERINFO_SET).into_owned(),
            host,
            port,
            path: percent_encode_with_set(path, PATH_SET).into_owned(),
            query: query.map(ToString::to_string),
            fragment: fragment
                .filter(|f| !f.is_empty())
                .map(|f| percent_encode_with_set(f, FRAGMENT_SET).into_owned()),
        })
    }

    /// Get the scheme without the trailing `:` (always lowercase)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Replace the scheme with a known-valid lowercase literal such as
    /// `"https"`. A port equal to the new scheme's default is dropped.
    pub fn force_scheme(&mut self, scheme: &'static str) {
        self.scheme_type = SchemeType::from_scheme(scheme);
        self.scheme = scheme.to_string();
        self.port = self.without_default(self.port);
    }

    fn without_default(&self, port: Option<u16>) -> Option<u16> {
        port.filter(|port| self.scheme_type.default_port() != Some(*port))
    }

    /// Get the hostname (without port)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Set the host, optionally with a `:port` suffix.
    ///
    /// The URL is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidPort`] for a bad port, or the host
    /// normalization error for a bad hostname.
    pub fn set_host(&mut self, host: &str) -> ParseResult<()> {
        let (hostname, port_text) = split_host_port(host);
        let port = match port_text {
            None | Some("") => None,
            Some(text) => Some(parse_port(text).ok_or(ParseError::InvalidPort)?),
        };
        let hostname = normalize_host(hostname)?;
        if hostname.is_empty() && !self.scheme_type.allows_empty_host() {
            return Err(ParseError::InvalidHost);
        }
        self.host = hostname;
        if port.is_some() {
            self.port = self.without_default(port);
        }
        Ok(())
    }

    /// Get the port, `None` when absent or equal to the scheme default
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn set_port(&mut self, port: Option<u16>) {
        self.port = self.without_default(port);
    }

    /// Get the path (percent-encoded)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set the path. A leading `/` is added to non-empty paths that lack one.
    pub fn set_path(&mut self, path: &str) {
        let encoded = percent_encode_with_set(path, PATH_SET);
        self.path = if encoded.is_empty() || encoded.starts_with('/') {
            encoded.into_owned()
        } else {
            let mut prefixed = String::with_capacity(encoded.len() + 1);
            prefixed.push('/');
            prefixed.push_str(&encoded);
            prefixed
        };
    }

    /// Get the raw query (without `?`)
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Take the raw query out of the URL, leaving none behind.
    pub fn take_query(&mut self) -> Option<String> {
        self.query.take()
    }

    /// Get the fragment (without `#`)
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Set the fragment; a leading `#` is ignored and an empty fragment clears it.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment
            .map(|f| f.strip_prefix('#').unwrap_or(f))
            .filter(|f| !f.is_empty())
            .map(|f| percent_encode_with_set(f, FRAGMENT_SET).into_owned());
    }

    /// Write `scheme://[userinfo@]host[:port]` into `buffer`.
    pub fn write_origin(&self, buffer: &mut String) {
        buffer.push_str(&self.scheme);
        buffer.push_str("://");
        if !self.username.is_empty() || !self.password.is_empty() {
            buffer.push_str(&self.username);
            if !self.password.is_empty() {
                buffer.push(':');
                buffer.push_str(&self.password);
            }
            buffer.push('@');
        }
        buffer.push_str(&self.host);
        if let Some(port) = self.port() {
            use core::fmt::Write;
            let _ = write!(buffer, ":{port}");
        }
    }

    /// Write `path[?query][#fragment]` into `buffer`, using `query` instead
    /// of the stored one. An empty query is omitted.
    pub fn write_relative(&self, buffer: &mut String, query: &str) {
        buffer.push_str(&self.path);
        if !query.is_empty() {
            buffer.push('?');
            buffer.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            buffer.push('#');
            buffer.push_str(fragment);
        }
    }

    /// Absolute URL with `query` substituted for the stored query.
    pub fn to_absolute(&self, query: &str) -> String {
        let mut buffer = String::with_capacity(self.host.len() + self.path.len() + query.len() + 16);
        self.write_origin(&mut buffer);
        self.write_relative(&mut buffer, query);
        buffer
    }

    /// Relative URL (path onwards) with `query` substituted for the stored query.
    pub fn to_relative(&self, query: &str) -> String {
        let mut buffer = String::with_capacity(self.path.len() + query.len() + 8);
        self.write_relative(&mut buffer, query);
        buffer
    }
}

impl core::fmt::Display for UrlParts {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_absolute(self.query().unwrap_or("")))
    }
}
