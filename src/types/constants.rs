/// Server-emitted event/payload strings (magic strings layer)
pub mod stream_events {
    /// Distinguished event name signaling graceful stream completion
    pub const DONE: &str = "done";
    /// Default SSE event name for unnamed `data:` frames
    pub const MESSAGE: &str = "message";
    /// Keep-alive payloads recognized and consumed, never forwarded
    pub const KEEP_ALIVE_TOKENS: [&str; 2] = ["heartbeat", "ping"];
}

/// Expected response content type for an SSE endpoint
pub const SSE_CONTENT_TYPE: &str = "text/event-stream";

/// Request header carrying the last seen event id on reconnect
pub const LAST_EVENT_ID_HEADER: &str = "Last-Event-ID";

/// Query parameter identifying the logical session on the stream URL,
/// forwarded to the abort endpoint on unload
pub const THREAD_ID_PARAM: &str = "threadId";

/// Default heartbeat window (milliseconds)
pub const DEFAULT_HEARTBEAT_INTERVAL: u64 = 30_000;

/// Default maximum reconnection attempts before the terminal close fires
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default initial backoff delay (milliseconds)
pub const DEFAULT_RECONNECT_DELAY: u64 = 1_000;

/// Default backoff cap (milliseconds)
pub const DEFAULT_MAX_RECONNECT_DELAY: u64 = 30_000;
