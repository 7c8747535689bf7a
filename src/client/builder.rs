use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use url::Url;

use super::{ClientState, ConnectionManager, ConnectionStatus, SseClient};
use crate::transport::{EventStreamTransport, HttpEventStreamFactory};
use crate::types::{Result, SseError, SseMessage};

pub type MessageCallback = Arc<dyn Fn(SseMessage) + Send + Sync + 'static>;
pub type ErrorCallback = Arc<dyn Fn(&SseError) + Send + Sync + 'static>;
pub type LifecycleCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Consumer-supplied callbacks, invoked from the client's event-loop
/// tasks in transport order.
#[derive(Clone, Default)]
pub struct EventHandlers {
    pub(crate) on_event: Option<MessageCallback>,
    pub(crate) on_open: Option<LifecycleCallback>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) on_close: Option<LifecycleCallback>,
}

impl EventHandlers {
    pub(crate) fn emit_event(&self, message: SseMessage) {
        if let Some(callback) = &self.on_event {
            callback(message);
        }
    }

    pub(crate) fn emit_open(&self) {
        if let Some(callback) = &self.on_open {
            callback();
        }
    }

    pub(crate) fn emit_error(&self, err: &SseError) {
        if let Some(callback) = &self.on_error {
            callback(err);
        }
    }

    pub(crate) fn emit_close(&self) {
        if let Some(callback) = &self.on_close {
            callback();
        }
    }
}

#[derive(Debug, Clone)]
pub struct SseClientOptions {
    /// Heartbeat window in milliseconds; silence longer than this while
    /// open is treated as a dead connection
    pub heartbeat_interval: Option<u64>,
    /// Reconnection attempts before the terminal close fires
    pub max_retries: Option<u32>,
    /// Whether transport errors schedule reconnection
    pub auto_reconnect: bool,
    /// Initial backoff delay in milliseconds
    pub reconnect_delay: Option<u64>,
    /// Backoff cap in milliseconds
    pub max_reconnect_delay: Option<u64>,
    /// Companion endpoint notified (best effort) on page unload
    pub abort_endpoint: Option<String>,
}

impl Default for SseClientOptions {
    fn default() -> Self {
        Self {
            heartbeat_interval: None,
            max_retries: None,
            auto_reconnect: true,
            reconnect_delay: None,
            max_reconnect_delay: None,
            abort_endpoint: None,
        }
    }
}

/// Builder for SseClient that handles initialization
pub struct SseClientBuilder {
    url: Url,
    options: SseClientOptions,
    handlers: EventHandlers,
    transport: Option<Arc<dyn EventStreamTransport>>,
}

impl SseClientBuilder {
    /// Create a new builder
    pub fn new(url: impl AsRef<str>, options: SseClientOptions) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(SseError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            url,
            options,
            handlers: EventHandlers::default(),
            transport: None,
        })
    }

    /// Callback for every consumer-facing event (keep-alives and the
    /// completion event are consumed internally and never reach this).
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(SseMessage) + Send + Sync + 'static,
    {
        self.handlers.on_event = Some(Arc::new(callback));
        self
    }

    /// Callback invoked on every successful open, initial and reconnect.
    pub fn on_open<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.on_open = Some(Arc::new(callback));
        self
    }

    /// Callback for transport errors (absorbed into the reconnection
    /// machinery; informational for the consumer).
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SseError) + Send + Sync + 'static,
    {
        self.handlers.on_error = Some(Arc::new(callback));
        self
    }

    /// Callback for terminal transitions: manual close, graceful
    /// completion, or retry exhaustion.
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.on_close = Some(Arc::new(callback));
        self
    }

    /// Replace the wire transport. Used by tests.
    pub fn transport(mut self, transport: Arc<dyn EventStreamTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> SseClient {
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::disconnected());

        let mut state = ClientState::new();
        state.state_change_tx = Some(status_tx);

        SseClient {
            url: self.url,
            options: self.options,
            handlers: self.handlers,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpEventStreamFactory::new())),
            connection: Arc::new(ConnectionManager::new()),
            state: Arc::new(RwLock::new(state)),
            status_rx,
        }
    }
}
