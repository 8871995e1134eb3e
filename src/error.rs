use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// A non-default client key was requested but never configured
    UnknownClient(String),
    /// The DSN string for a configured client could not be parsed
    InvalidDsn {
        key: String,
        source: sentry_core::types::ParseDsnError,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownClient(_) => None,
            Self::InvalidDsn { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClient(key) => write!(f, "no client configured for key '{}'", key),
            Self::InvalidDsn { key, source } => {
                write!(f, "invalid dsn for client '{}': {}", key, source)
            }
        }
    }
}
