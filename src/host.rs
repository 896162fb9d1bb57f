use crate::compat::String;
use crate::error::{ParseError, ParseResult};

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if domain contains Punycode (xn-- prefix, case insensitive)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }
    if is_punycode_prefix(bytes) {
        return true;
    }
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Normalize a hostname for storage.
///
/// Bracketed IPv6 literals are kept verbatim. Plain ASCII hosts are
/// lowercased and checked against the hostname alphabet (letters, digits,
/// `.`, `-`, `_`). Anything else, including Punycode labels that need
/// validation, goes through IDNA `ToASCII`.
pub fn normalize_host(host: &str) -> ParseResult<String> {
    if host.starts_with('[') {
        if host.ends_with(']') && host.len() > 2 {
            return Ok(host.to_ascii_lowercase());
        }
        return Err(ParseError::InvalidIpv6);
    }

    if host.is_ascii() && !has_punycode(host) {
        let mut result = String::with_capacity(host.len());
        for b in host.bytes() {
            match b {
                b'A'..=b'Z' => result.push(b.to_ascii_lowercase() as char),
                b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' => result.push(b as char),
                _ => return Err(ParseError::InvalidDomainCharacter),
            }
        }
        return Ok(result);
    }

    idna::domain_to_ascii(host).map_err(|_| ParseError::IdnaError)
}

/// Split `host[:port]` into hostname and optional port text.
pub fn split_host_port(host: &str) -> (&str, Option<&str>) {
    if host.starts_with('[') {
        if let Some(bracket_end) = host.find(']') {
            let port = host[bracket_end + 1..].strip_prefix(':');
            return (&host[..=bracket_end], port);
        }
        return (host, None);
    }

    match host.rfind(':') {
        Some(colon_pos) => (&host[..colon_pos], Some(&host[colon_pos + 1..])),
        None => (host, None),
    }
}
