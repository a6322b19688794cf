// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Network(NetworkError),
    Decode(String),
}

/// Failures talking to the trending-images API or downloading a rendition.
/// Kept coarse so they can be mapped to localized notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// No API key was configured, so no request was sent.
    MissingApiKey,

    /// The request did not complete within the configured timeout.
    Timeout,

    /// The server answered with a non-success status code.
    Status(u16),

    /// The response body could not be interpreted.
    MalformedResponse(String),

    /// Body exceeded the allowed download size.
    TooLarge { limit: u64 },

    /// Connection, TLS or any other transport failure.
    Transport(String),
}

impl NetworkError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            NetworkError::MissingApiKey => "notification-fetch-error-api-key",
            NetworkError::Timeout => "notification-fetch-error-timeout",
            NetworkError::Status(_) => "notification-fetch-error-status",
            NetworkError::MalformedResponse(_) => "notification-fetch-error-malformed",
            NetworkError::TooLarge { .. } => "notification-fetch-error-too-large",
            NetworkError::Transport(_) => "notification-fetch-error-transport",
        }
    }
}

impl Error {
    /// Returns the i18n message key used when this error is shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "notification-io-error",
            Error::Config(_) => "notification-config-load-error",
            Error::Network(e) => e.i18n_key(),
            Error::Decode(_) => "notification-decode-error",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::MissingApiKey => write!(f, "No API key configured"),
            NetworkError::Timeout => write!(f, "Request timed out"),
            NetworkError::Status(code) => write!(f, "HTTP status: {}", code),
            NetworkError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            NetworkError::TooLarge { limit } => {
                write!(f, "Response larger than {} bytes", limit)
            }
            NetworkError::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        Error::Network(err)
    }
}

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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Network(NetworkError::MalformedResponse(err.to_string()))
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Error::Network(NetworkError::Timeout);
        }
        if let Some(status) = err.status() {
            return Error::Network(NetworkError::Status(status.as_u16()));
        }
        if err.is_decode() {
            return Error::Network(NetworkError::MalformedResponse(err.to_string()));
        }
        Error::Network(NetworkError::Transport(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
