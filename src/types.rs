/// URL scheme types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    #[default]
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    NotSpecial,
}

impl SchemeType {
    /// Classify a lowercase scheme string (without the trailing `:`).
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "http" => Self::Http,
            "https" => Self::Https,
            "ws" => Self::Ws,
            "wss" => Self::Wss,
            "ftp" => Self::Ftp,
            "file" => Self::File,
            _ => Self::NotSpecial,
        }
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::NotSpecial => None,
        }
    }

    /// Whether an empty host is allowed for this scheme
    pub fn allows_empty_host(self) -> bool {
        matches!(self, Self::File | Self::NotSpecial)
    }
}

/// Protocol forcing applied when a [`QueryUrl`](crate::QueryUrl) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Secure {
    /// Force the `https` scheme
    Https,
    /// Force the `http` scheme
    Http,
    /// Keep whatever scheme the URL has
    #[default]
    Unchanged,
}

impl Secure {
    /// The scheme this setting forces, if any.
    pub fn forced_scheme(self) -> Option<&'static str> {
        match self {
            Self::Https => Some("https"),
            Self::Http => Some("http"),
            Self::Unchanged => None,
        }
    }
}

impl From<bool> for Secure {
    fn from(secure: bool) -> Self {
        if secure { Self::Https } else { Self::Http }
    }
}

impl From<Option<bool>> for Secure {
    fn from(secure: Option<bool>) -> Self {
        secure.map_or(Self::Unchanged, Self::from)
    }
}
