use thiserror::Error;

/// Anything that can abort a poll cycle.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("review API is unreachable: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("review API returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("review API body is not valid JSON: {0}")]
    BadJson(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    BadShape(String),

    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),
}

/// Coarse classification used to gate notifications: the chat gets at most one
/// message per consecutive streak of same-kind failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connect,
    HttpStatus,
    BadJson,
    BadShape,
    UnknownStatus,
}

impl WatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WatchError::Connect(_) => ErrorKind::Connect,
            WatchError::HttpStatus { .. } => ErrorKind::HttpStatus,
            WatchError::BadJson(_) => ErrorKind::BadJson,
            WatchError::BadShape(_) => ErrorKind::BadShape,
            WatchError::UnknownStatus(_) => ErrorKind::UnknownStatus,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Connect => write!(f, "connect"),
            ErrorKind::HttpStatus => write!(f, "http_status"),
            ErrorKind::BadJson => write!(f, "bad_json"),
            ErrorKind::BadShape => write!(f, "bad_shape"),
            ErrorKind::UnknownStatus => write!(f, "unknown_status"),
        }
    }
}
