use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid webhook url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("webhook url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook rejected the message with status {0}")]
    Rejected(StatusCode),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no webhook url has been entered")]
    MissingEndpoint,
    #[error("a message is already being sent")]
    AlreadyInFlight,
}
