// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Crate-wide error type.
///
/// `Transport` and `Api` display only their inner message so the sync
/// controller can surface them verbatim as the user-visible error line
/// (a non-2xx body like "db unavailable" must appear exactly as sent).
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The request never completed (DNS, connect, timeout, ...).
    Transport(String),
    /// The server answered with a non-success status. The message is the
    /// response body text, or the status line when the body was empty.
    Api(String),
    /// The server answered 2xx but the JSON body could not be parsed.
    Decode(String),
    Config(String),
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "{}", msg),
            Error::Api(msg) => write!(f, "{}", msg),
            Error::Decode(msg) => write!(f, "Invalid response: {}", msg),
            Error::Config(msg) => write!(f, "Config Error: {}", msg),
            Error::Io(msg) => write!(f, "I/O Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
