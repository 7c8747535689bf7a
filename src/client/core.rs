use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{RwLock, watch};
use tokio::time::Instant;
use url::Url;

use super::{
    ClientState, ConnectionManager, ConnectionStatus, EventHandlers, ReadyState, SseClientBuilder,
    SseClientOptions,
};
use crate::heartbeat::HeartbeatWatchdog;
use crate::infrastructure::backoff::compute_delay;
use crate::transport::{BoxedEventStream, EventStreamTransport};
use crate::types::constants::{
    DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_MAX_RECONNECT_DELAY, DEFAULT_MAX_RETRIES,
    DEFAULT_RECONNECT_DELAY,
};
use crate::types::{Result, SseError, SseMessage};

/// Resilient client for a long-lived Server-Sent Events stream.
///
/// `SseClient` owns the connection, all timers, and the retry state. It
/// reconnects automatically with capped exponential backoff, infers
/// liveness from inbound traffic (keep-alive pings included), and stops
/// retrying after a manual [`close()`](Self::close), a graceful `done`
/// event from the server, or retry exhaustion.
///
/// # Example
///
/// ```no_run
/// use resilient_sse::{SseClient, SseClientOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SseClient::new(
///     "https://example.com/api/completion/stream?threadId=t-1",
///     SseClientOptions::default(),
/// )?
/// .on_event(|msg| println!("{}", msg.data))
/// .build();
///
/// client.connect().await?;
/// // ... later
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SseClient {
    pub(crate) url: Url,
    pub(crate) options: SseClientOptions,
    pub(crate) handlers: EventHandlers,
    pub(crate) transport: Arc<dyn EventStreamTransport>,

    // Ready-state holder
    pub(crate) connection: Arc<ConnectionManager>,

    // Consolidated mutable state
    pub(crate) state: Arc<RwLock<ClientState>>,

    pub(crate) status_rx: watch::Receiver<ConnectionStatus>,
}

impl SseClient {
    /// Creates a builder for a client of the given SSE endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::UrlParse`] for a malformed URL and
    /// [`SseError::UnsupportedScheme`] for anything but http/https.
    pub fn new(url: impl AsRef<str>, options: SseClientOptions) -> Result<SseClientBuilder> {
        SseClientBuilder::new(url, options)
    }

    /// Set ready state and notify watchers
    pub(crate) async fn set_ready_state(&self, ready_state: ReadyState) {
        self.connection.set_ready_state(ready_state).await;

        let state = self.state.read().await;
        state.notify_state_change(ready_state);
    }

    /// Establishes the event stream connection.
    ///
    /// No-op when already open or connecting. On success the client
    /// resets its retry budget, starts the read loop and the heartbeat
    /// watchdog, and invokes the open callback. A failure is routed into
    /// the reconnection machinery before being returned.
    pub async fn connect(&self) -> Result<()> {
        let current = self.connection.ready_state().await;
        if current == ReadyState::Open || current == ReadyState::Connecting {
            return Ok(());
        }
        self.open().await
    }

    /// Opens a fresh stream, tearing down whatever came before it.
    ///
    /// Returns a boxed future rather than an `async fn` so its `Send`
    /// bound is stated by the signature: `open` is reachable from the
    /// reconnect timer it spawns (`open` -> `handle_stream_error` ->
    /// `schedule_reconnect` -> `tokio::spawn(open())`), and an `async fn`
    /// would force the compiler to prove `Send` of `open`'s own hidden
    /// type from within its defining scope, which it cannot do.
    pub(crate) fn open(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            {
                let mut state = self.state.write().await;
                state.tasks.abort_read();
                state.tasks.cancel_retry();
                state.completed = false;
            }
            self.set_ready_state(ReadyState::Connecting).await;

            let last_event_id = self.state.read().await.last_event_id.clone();
            let stream = match self
                .transport
                .open(&self.url, last_event_id.as_deref())
                .await
            {
                Ok(stream) => stream,
                Err(err) => {
                    self.handle_stream_error(&err).await;
                    return Err(err);
                }
            };

            {
                let mut state = self.state.write().await;
                state.retry_count = 0;
                state.is_reconnecting = false;
                state.exhaustion_notified = false;
                state.last_event_at = Instant::now();

                let reader = self.clone();
                state
                    .tasks
                    .set_read(tokio::spawn(async move { reader.read_loop(stream).await }));
                state
                    .tasks
                    .set_watchdog(HeartbeatWatchdog::new(self.clone()).spawn());
            }

            self.set_ready_state(ReadyState::Open).await;
            self.handlers.emit_open();
            tracing::debug!("event stream opened");
            Ok(())
        })
    }

    async fn read_loop(self, mut stream: BoxedEventStream) {
        while let Some(item) = stream.next().await {
            match item {
                Ok(message) => self.handle_stream_event(message).await,
                Err(err) => {
                    self.handle_stream_error(&err).await;
                    return;
                }
            }
        }
        self.handle_stream_end().await;
    }

    /// Handles one inbound event: stamps the heartbeat timestamp, records
    /// the event id, consumes keep-alives and the completion event, and
    /// forwards everything else to the consumer.
    pub(crate) async fn handle_stream_event(&self, message: SseMessage) {
        if self.connection.ready_state().await == ReadyState::Closed {
            return;
        }

        {
            let mut state = self.state.write().await;
            if state.manually_closed {
                return;
            }
            state.last_event_at = Instant::now();
            if let Some(id) = &message.id {
                state.last_event_id = Some(id.clone());
            }
        }

        if message.is_keep_alive() {
            tracing::debug!("keep-alive received");
            return;
        }

        if message.is_done() {
            // Graceful completion: success is not an error, so any backoff
            // sequence in progress stops here.
            tracing::debug!("stream completed");
            let ready_state = self.connection.ready_state().await;
            let mut state = self.state.write().await;
            state.retry_count = 0;
            state.is_reconnecting = false;
            state.completed = true;
            state.tasks.cancel_retry();
            state.notify_state_change(ready_state);
            return;
        }

        self.handlers.emit_event(message);
    }

    /// Transport-error path, shared by connect failures, read errors, and
    /// the heartbeat watchdog.
    pub(crate) async fn handle_stream_error(&self, err: &SseError) {
        if self.state.read().await.manually_closed {
            return;
        }

        tracing::warn!("event stream error: {}", err);
        self.set_ready_state(ReadyState::Closed).await;
        self.handlers.emit_error(err);

        let completed = self.state.read().await.completed;
        if self.options.auto_reconnect && !completed {
            self.schedule_reconnect().await;
        }
    }

    /// The server ended the stream. With the completion flag set this is
    /// a graceful terminal close; without it the server vanished
    /// mid-stream and the error path takes over.
    pub(crate) async fn handle_stream_end(&self) {
        let (manually_closed, completed) = {
            let state = self.state.read().await;
            (state.manually_closed, state.completed)
        };
        if manually_closed {
            return;
        }

        if completed {
            tracing::debug!("stream ended after completion");
            self.set_ready_state(ReadyState::Closed).await;
            self.handlers.emit_close();
        } else {
            self.handle_stream_error(&SseError::StreamClosed).await;
        }
    }

    /// Arms the one-shot reconnect timer.
    ///
    /// Idempotent: at most one pending timer exists at a time. Once the
    /// retry budget is exhausted the terminal close fires exactly once
    /// and nothing further is scheduled.
    pub(crate) async fn schedule_reconnect(&self) {
        let ready_state = self.connection.ready_state().await;
        let mut state = self.state.write().await;

        if state.manually_closed {
            return;
        }

        if state.retry_count >= self.max_retries() {
            let already_notified = state.exhaustion_notified;
            state.exhaustion_notified = true;
            drop(state);
            if !already_notified {
                tracing::warn!("max reconnection attempts reached");
                self.handlers.emit_close();
            }
            return;
        }

        if state.tasks.retry_pending() {
            return;
        }

        let delay = compute_delay(
            state.retry_count,
            self.reconnect_delay(),
            self.max_reconnect_delay(),
        );
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            attempt = state.retry_count + 1,
            "scheduling reconnection"
        );
        state.is_reconnecting = true;

        let client = self.clone();
        state.tasks.arm_retry(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut state = client.state.write().await;
                state.retry_count += 1;
                state.tasks.clear_retry();
            }
            let _ = client.open().await;
        }));
        state.notify_state_change(ready_state);
    }

    /// Closes the stream and suppresses all reconnection until
    /// [`retry()`](Self::retry). Idempotent.
    pub async fn close(&self) {
        {
            let mut state = self.state.write().await;
            if state.manually_closed {
                return;
            }
            tracing::debug!("manually closing event stream");
            state.manually_closed = true;
            state.is_reconnecting = false;
            state.tasks.abort_all();
        }
        self.set_ready_state(ReadyState::Closed).await;
        self.handlers.emit_close();
    }

    /// Manual re-entry point: clears the manual-close flag and the retry
    /// budget, then opens immediately, bypassing backoff.
    pub async fn retry(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.manually_closed = false;
            state.retry_count = 0;
            state.is_reconnecting = false;
            state.exhaustion_notified = false;
            state.tasks.cancel_retry();
        }
        self.open().await
    }

    /// Watchdog check: an open stream silent for longer than the
    /// heartbeat window is treated as dead and funneled into the same
    /// reconnection path a transport error takes. Returns whether a
    /// reconnection was triggered.
    pub(crate) async fn heartbeat_check(&self) -> bool {
        if self.connection.ready_state().await != ReadyState::Open {
            return false;
        }

        let silent_for = self.state.read().await.last_event_at.elapsed();
        if silent_for <= self.heartbeat_interval() {
            return false;
        }

        tracing::warn!(
            silent_ms = silent_for.as_millis() as u64,
            "heartbeat timeout, reconnecting"
        );
        self.schedule_reconnect().await;
        true
    }

    /// Snapshot of the connection for UI state.
    pub async fn status(&self) -> ConnectionStatus {
        let ready_state = self.connection.ready_state().await;
        let state = self.state.read().await;
        ConnectionStatus {
            ready_state,
            retry_count: state.retry_count,
            is_reconnecting: state.is_reconnecting,
        }
    }

    /// Watch channel mirroring [`status()`](Self::status), so a UI can
    /// render a reconnecting indicator without polling.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    /// Checks whether the stream is currently open
    pub async fn is_connected(&self) -> bool {
        self.connection.is_open().await
    }

    pub(crate) async fn is_manually_closed(&self) -> bool {
        self.state.read().await.manually_closed
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn abort_endpoint(&self) -> Option<&str> {
        self.options.abort_endpoint.as_deref()
    }

    pub(crate) fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(
            self.options
                .heartbeat_interval
                .unwrap_or(DEFAULT_HEARTBEAT_INTERVAL),
        )
    }

    fn max_retries(&self) -> u32 {
        self.options.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(
            self.options
                .reconnect_delay
                .unwrap_or(DEFAULT_RECONNECT_DELAY),
        )
    }

    fn max_reconnect_delay(&self) -> Duration {
        Duration::from_millis(
            self.options
                .max_reconnect_delay
                .unwrap_or(DEFAULT_MAX_RECONNECT_DELAY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SseClientBuilder;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// One scripted connection attempt.
    enum OpenPlan {
        /// The connect itself fails
        Fail,
        /// Yields the items, then the server closes the stream
        Stream(Vec<Result<SseMessage>>),
        /// Yields the items, then stays open forever
        Idle(Vec<Result<SseMessage>>),
    }

    struct ScriptedTransport {
        plans: Mutex<VecDeque<OpenPlan>>,
        opens: AtomicU32,
        seen_last_ids: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedTransport {
        fn new(plans: Vec<OpenPlan>) -> Arc<Self> {
            Arc::new(Self {
                plans: Mutex::new(plans.into()),
                opens: AtomicU32::new(0),
                seen_last_ids: Mutex::new(Vec::new()),
            })
        }

        fn opens(&self) -> u32 {
            self.opens.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventStreamTransport for ScriptedTransport {
        async fn open(&self, _url: &Url, last_event_id: Option<&str>) -> Result<BoxedEventStream> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.seen_last_ids
                .lock()
                .unwrap()
                .push(last_event_id.map(str::to_string));
            let plan = self
                .plans
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(OpenPlan::Idle(Vec::new()));
            match plan {
                OpenPlan::Fail => Err(SseError::Stream("scripted connect failure".to_string())),
                OpenPlan::Stream(items) => Ok(Box::pin(futures::stream::iter(items))),
                OpenPlan::Idle(items) => Ok(Box::pin(
                    futures::stream::iter(items).chain(futures::stream::pending()),
                )),
            }
        }
    }

    #[derive(Default)]
    struct Probe {
        events: AtomicU32,
        opens: AtomicU32,
        errors: AtomicU32,
        closes: AtomicU32,
    }

    impl Probe {
        fn counts(&self) -> (u32, u32, u32, u32) {
            (
                self.events.load(Ordering::SeqCst),
                self.opens.load(Ordering::SeqCst),
                self.errors.load(Ordering::SeqCst),
                self.closes.load(Ordering::SeqCst),
            )
        }
    }

    fn test_client(
        options: SseClientOptions,
        transport: Arc<ScriptedTransport>,
    ) -> (SseClient, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let client = SseClientBuilder::new(
            "https://example.com/api/completion/stream?threadId=t-1",
            options,
        )
        .unwrap()
        .on_event({
            let probe = Arc::clone(&probe);
            move |_| {
                probe.events.fetch_add(1, Ordering::SeqCst);
            }
        })
        .on_open({
            let probe = Arc::clone(&probe);
            move || {
                probe.opens.fetch_add(1, Ordering::SeqCst);
            }
        })
        .on_error({
            let probe = Arc::clone(&probe);
            move |_| {
                probe.errors.fetch_add(1, Ordering::SeqCst);
            }
        })
        .on_close({
            let probe = Arc::clone(&probe);
            move || {
                probe.closes.fetch_add(1, Ordering::SeqCst);
            }
        })
        .transport(transport)
        .build();
        (client, probe)
    }

    fn done_message() -> SseMessage {
        SseMessage::new("done", "{}")
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_open_resets_retry_budget() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.state.write().await.retry_count = 3;

        client.connect().await.unwrap();

        let status = client.status().await;
        assert_eq!(status.ready_state, ReadyState::Open);
        assert_eq!(status.retry_count, 0);
        assert!(!status.is_reconnecting);
        assert_eq!(probe.counts(), (0, 1, 0, 0));
        assert_eq!(transport.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_is_noop_while_open() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, _probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.connect().await.unwrap();
        client.connect().await.unwrap();

        assert_eq!(transport.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_reconnect_arms_single_timer() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, _probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.schedule_reconnect().await;
        client.schedule_reconnect().await;

        assert!(client.status().await.is_reconnecting);
        assert!(client.state.read().await.tasks.retry_pending());

        // Past the base delay, exactly one timer fires and opens once.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(transport.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_error_handler_closes_once() {
        let transport = ScriptedTransport::new(vec![]);
        let options = SseClientOptions {
            max_retries: Some(2),
            ..Default::default()
        };
        let (client, probe) = test_client(options, transport);

        client.state.write().await.retry_count = 2;

        client.handle_stream_error(&SseError::StreamClosed).await;
        client.handle_stream_error(&SseError::StreamClosed).await;

        let (_, _, errors, closes) = probe.counts();
        assert_eq!(errors, 2);
        assert_eq!(closes, 1);
        assert!(!client.state.read().await.tasks.retry_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_event_resets_retry_state() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), transport);

        client.connect().await.unwrap();
        client.state.write().await.retry_count = 4;
        client.schedule_reconnect().await;
        assert!(client.state.read().await.tasks.retry_pending());

        client.handle_stream_event(done_message()).await;

        let state = client.state.read().await;
        assert_eq!(state.retry_count, 0);
        assert!(!state.is_reconnecting);
        assert!(!state.tasks.retry_pending());
        drop(state);

        // The completion event itself is never forwarded.
        assert_eq!(probe.events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_updates_heartbeat_without_forwarding() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), transport);

        client.connect().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        client
            .handle_stream_event(SseMessage::new("message", "ping"))
            .await;

        assert_eq!(probe.events.load(Ordering::SeqCst), 0);
        assert_eq!(
            client.state.read().await.last_event_at.elapsed(),
            Duration::ZERO
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_client_ignores_stream_events() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), transport);

        client.connect().await.unwrap();
        client.close().await;
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);

        client
            .handle_stream_event(SseMessage::new("message", "late"))
            .await;
        client.handle_stream_error(&SseError::StreamClosed).await;

        assert_eq!(probe.counts(), (0, 1, 0, 1));
        assert_eq!(client.status().await.ready_state, ReadyState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_idempotent() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), transport);

        client.connect().await.unwrap();
        client.close().await;
        client.close().await;

        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_close_reopens_fresh() {
        let transport = ScriptedTransport::new(vec![]);
        let (client, probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.connect().await.unwrap();
        client.close().await;

        client.retry().await.unwrap();

        assert!(!client.is_manually_closed().await);
        let status = client.status().await;
        assert_eq!(status.ready_state, ReadyState::Open);
        assert_eq!(status.retry_count, 0);
        assert_eq!(transport.opens(), 2);
        assert_eq!(probe.opens.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_timeout_schedules_reconnect_once() {
        let transport = ScriptedTransport::new(vec![]);
        let options = SseClientOptions {
            heartbeat_interval: Some(10_000),
            ..Default::default()
        };
        let (client, _probe) = test_client(options, Arc::clone(&transport));

        client.connect().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10_001)).await;

        assert!(client.heartbeat_check().await);
        assert!(client.heartbeat_check().await);
        assert!(client.status().await.is_reconnecting);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        // One timer, one reopen.
        assert_eq!(transport.opens(), 2);
        assert_eq!(client.status().await.ready_state, ReadyState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_check_quiet_while_fresh() {
        let transport = ScriptedTransport::new(vec![]);
        let options = SseClientOptions {
            heartbeat_interval: Some(10_000),
            ..Default::default()
        };
        let (client, _probe) = test_client(options, transport);

        client.connect().await.unwrap();
        tokio::time::sleep(Duration::from_millis(9_999)).await;

        assert!(!client.heartbeat_check().await);
        assert!(!client.status().await.is_reconnecting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_failure_backs_off_and_recovers() {
        let transport = ScriptedTransport::new(vec![OpenPlan::Fail]);
        let (client, probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        assert!(client.connect().await.is_err());
        assert_eq!(probe.errors.load(Ordering::SeqCst), 1);
        assert!(client.status().await.is_reconnecting);
        assert_eq!(client.status().await.ready_state, ReadyState::Closed);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(transport.opens(), 2);
        let status = client.status().await;
        assert_eq!(status.ready_state, ReadyState::Open);
        assert_eq!(status.retry_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_end_without_done_reconnects() {
        let transport = ScriptedTransport::new(vec![OpenPlan::Stream(vec![Ok(SseMessage::new(
            "message", "hello",
        ))])]);
        let (client, probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.connect().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(probe.events.load(Ordering::SeqCst), 1);
        assert_eq!(probe.errors.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(transport.opens(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_then_stream_end_closes_gracefully() {
        let transport = ScriptedTransport::new(vec![OpenPlan::Stream(vec![Ok(done_message())])]);
        let (client, probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.connect().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;

        let (events, opens, errors, closes) = probe.counts();
        assert_eq!(events, 0);
        assert_eq!(opens, 1);
        assert_eq!(errors, 0);
        assert_eq!(closes, 1);
        assert_eq!(client.status().await.ready_state, ReadyState::Closed);

        // Success is not an error: no reconnection, ever.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(transport.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_reconnect_disabled_stays_down() {
        let transport = ScriptedTransport::new(vec![OpenPlan::Fail]);
        let options = SseClientOptions {
            auto_reconnect: false,
            ..Default::default()
        };
        let (client, probe) = test_client(options, Arc::clone(&transport));

        assert!(client.connect().await.is_err());
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(transport.opens(), 1);
        assert_eq!(probe.errors.load(Ordering::SeqCst), 1);
        assert!(!client.status().await.is_reconnecting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_event_id_replayed_on_reconnect() {
        let transport = ScriptedTransport::new(vec![OpenPlan::Stream(vec![Ok(SseMessage::new(
            "message", "hello",
        )
        .with_id("41"))])]);
        let (client, _probe) = test_client(SseClientOptions::default(), Arc::clone(&transport));

        client.connect().await.unwrap();
        // Stream yields an event with an id, then drops; backoff reopens.
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(transport.opens(), 2);
        let seen = transport.seen_last_ids.lock().unwrap();
        assert_eq!(seen[0], None);
        assert_eq!(seen[1].as_deref(), Some("41"));
    }
}
