use std::pin::Pin;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::types::constants::{LAST_EVENT_ID_HEADER, SSE_CONTENT_TYPE};
use crate::types::{Result, SseError, SseMessage};

/// Typed event stream handed to the lifecycle manager. Ends when the
/// server closes the response body.
pub type BoxedEventStream = Pin<Box<dyn Stream<Item = Result<SseMessage>> + Send>>;

/// Seam between the connection lifecycle and the wire.
///
/// The production implementation speaks SSE over HTTP; tests inject a
/// scripted transport to drive the state machine without a server.
#[async_trait]
pub trait EventStreamTransport: Send + Sync {
    /// Opens a fresh event stream. `last_event_id` carries the id of the
    /// most recent event seen on a previous connection, so the server may
    /// resume rather than replay.
    async fn open(&self, url: &Url, last_event_id: Option<&str>) -> Result<BoxedEventStream>;
}

/// SSE-over-HTTP transport backed by `reqwest`.
pub struct HttpEventStreamFactory {
    client: reqwest::Client,
}

impl HttpEventStreamFactory {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpEventStreamFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStreamTransport for HttpEventStreamFactory {
    async fn open(&self, url: &Url, last_event_id: Option<&str>) -> Result<BoxedEventStream> {
        tracing::debug!(%url, "opening event stream");

        let mut request = self.client.get(url.clone()).header(ACCEPT, SSE_CONTENT_TYPE);
        if let Some(id) = last_event_id {
            request = request.header(LAST_EVENT_ID_HEADER, id);
        }

        let response = request.send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with(SSE_CONTENT_TYPE) {
            return Err(SseError::UnexpectedContentType(content_type.to_string()));
        }

        let stream = response
            .bytes_stream()
            .eventsource()
            .map(|item| match item {
                Ok(event) => Ok(SseMessage::from(event)),
                Err(err) => Err(SseError::from(err)),
            });

        Ok(Box::pin(stream))
    }
}
