use thiserror::Error;

/// Errors that can occur while running an event stream.
#[derive(Error, Debug)]
pub enum SseError {
    /// HTTP request error (connect failure, TLS, non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SSE wire-format error (invalid UTF-8, malformed field lines)
    #[error("event stream protocol error: {0}")]
    Stream(String),

    /// URL parsing error (malformed endpoint URL)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Endpoint URL is not http/https
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Endpoint responded with something other than `text/event-stream`
    #[error("unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// Server closed the stream without emitting the completion event
    #[error("stream closed before completion")]
    StreamClosed,
}

/// Convenience type alias for `Result<T, SseError>`.
pub type Result<T> = std::result::Result<T, SseError>;

impl From<eventsource_stream::EventStreamError<reqwest::Error>> for SseError {
    fn from(err: eventsource_stream::EventStreamError<reqwest::Error>) -> Self {
        match err {
            eventsource_stream::EventStreamError::Transport(e) => SseError::Http(e),
            other => SseError::Stream(other.to_string()),
        }
    }
}
