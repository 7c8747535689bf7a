use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::constants::stream_events;

/// A single server-sent event as delivered to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SseMessage {
    /// Event name; `"message"` for unnamed `data:` frames
    pub event: String,
    /// Raw event payload
    pub data: String,
    /// Event id, when the server sets one (used for resume)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Server-suggested retry interval, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<Duration>,
}

impl SseMessage {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
            id: None,
            retry: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Synthetic keep-alive payload, consumed by the client and never
    /// forwarded to `on_event`.
    pub fn is_keep_alive(&self) -> bool {
        stream_events::KEEP_ALIVE_TOKENS.contains(&self.data.as_str())
    }

    /// Distinguished event signaling graceful stream completion.
    pub fn is_done(&self) -> bool {
        self.event == stream_events::DONE
    }
}

impl From<eventsource_stream::Event> for SseMessage {
    fn from(ev: eventsource_stream::Event) -> Self {
        Self {
            event: ev.event,
            data: ev.data,
            id: (!ev.id.is_empty()).then_some(ev.id),
            retry: ev.retry,
        }
    }
}
