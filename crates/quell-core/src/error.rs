//! Error types for Quell

use thiserror::Error;

/// Result type alias for Quell operations
pub type QuellResult<T> = Result<T, QuellError>;

/// Main error type for Quell
#[derive(Error, Debug)]
pub enum QuellError {
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Programmer error: the name is not part of the setting enumeration.
    #[error("Invalid setting: {name}")]
    InvalidSetting { name: String },

    #[error("Setting {name} expects a {expected} value")]
    SettingType { name: String, expected: &'static str },

    #[error("Wizard step out of range: {0}")]
    InvalidStep(u8),

    #[error(transparent)]
    FilterFormat(#[from] FilterFormatError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuellError {
    /// Create a new invalid setting error
    pub fn invalid_setting(name: impl Into<String>) -> Self {
        Self::InvalidSetting { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from the message channel
    pub fn is_channel(&self) -> bool {
        matches!(self, Self::Channel(_))
    }
}

/// Failure of a request/response round trip to the background process.
///
/// Never retried at the channel layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed URL: {0}")]
    InvalidUrl(String),

    /// The background process answered with an error message.
    #[error("{0}")]
    Background(String),

    #[error("Background process disconnected")]
    Disconnected,

    #[error("Unexpected reply payload: {0}")]
    Protocol(String),
}

impl ChannelError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn background(msg: impl Into<String>) -> Self {
        Self::Background(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}

/// User-visible failure of custom filter ingestion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterFormatError {
    /// The background returned no metadata for the content.
    #[error("Filter format is broken")]
    Broken,

    /// Loading or parsing failed with the given cause.
    #[error("Filter format is broken, {0}")]
    Rejected(String),
}

impl FilterFormatError {
    pub fn rejected(cause: impl std::fmt::Display) -> Self {
        Self::Rejected(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_format_messages() {
        assert_eq!(FilterFormatError::Broken.to_string(), "Filter format is broken");
        assert_eq!(
            FilterFormatError::rejected("unexpected token").to_string(),
            "Filter format is broken, unexpected token"
        );
    }

    #[test]
    fn test_background_message_is_verbatim() {
        let err = ChannelError::background("list not found");
        assert_eq!(err.to_string(), "list not found");

        let err: QuellError = err.into();
        assert!(err.is_channel());
    }
}
