use crate::compat::String;

/// Errors that can occur while parsing a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid scheme format
    InvalidScheme,
    /// Invalid host format
    InvalidHost,
    /// Invalid port number
    InvalidPort,
    /// Invalid (unterminated) IPv6 address
    InvalidIpv6,
    /// Invalid character in domain
    InvalidDomainCharacter,
    /// IDNA processing error
    IdnaError,
    /// Invalid URL structure (no authority section)
    InvalidUrl,
    /// Relative URL without base
    RelativeUrlWithoutBase,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "Invalid scheme",
            Self::InvalidHost => "Invalid host",
            Self::InvalidPort => "Invalid port",
            Self::InvalidIpv6 => "Invalid IPv6 address",
            Self::InvalidDomainCharacter => "Invalid domain character",
            Self::IdnaError => "IDNA processing error",
            Self::InvalidUrl => "Invalid URL",
            Self::RelativeUrlWithoutBase => "Relative URL without base",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Errors returned by [`QueryUrl`](crate::QueryUrl) operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The URL could not be parsed
    MalformedUrl(ParseError),
    /// A required parameter is absent (after pruning)
    MissingParameter(String),
    /// No URL was given and no current-URL provider was configured
    NoCurrentUrl,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MalformedUrl(err) => write!(f, "Malformed URL: {err}"),
            Self::MissingParameter(key) => write!(f, "Missing required parameter: {key}"),
            Self::NoCurrentUrl => f.write_str("No URL given and no current URL available"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedUrl(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::MalformedUrl(err)
    }
}

/// Result type for URL parsing operations
pub type ParseResult<T> = core::result::Result<T, ParseError>;

/// Result type for query URL operations
pub type Result<T> = core::result::Result<T, Error>;
