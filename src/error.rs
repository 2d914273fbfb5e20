use crate::parse;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(parse::Error),
    Network(reqwest::Error),
    Url(url::ParseError),
    Json(serde_json::Error),
    Io(std::io::Error),
    Config(String),
}

impl Error {
    /// Whether sending the same request again could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.status().is_some_and(|status| status.is_server_error())
            }
            _ => false,
        }
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Url(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Network(e) => write!(f, "Network error: {e}"),
            Error::Url(e) => write!(f, "Url error: {e}"),
            Error::Json(e) => write!(f, "Json error: {e}"),
            Error::Io(e) => write!(f, "Io error: {e}"),
            Error::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_retry() {
        let parse = Error::from(parse::Error::markup_shape_error("no top section"));
        assert!(!parse.is_retryable());
        assert_eq!(parse.to_string(), "Parse error: Markup Shape Error: no top section");
        assert!(!Error::Config("CONCURRENCY must be at least 1".into()).is_retryable());
    }
}
