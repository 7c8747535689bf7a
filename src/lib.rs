//! # resilient-sse
//!
//! A resilient Server-Sent Events client: automatic reconnection with
//! capped exponential backoff, heartbeat-based dead-connection
//! detection, and host-reported lifecycle hooks.
//!
//! ## Example
//!
//! ```no_run
//! use resilient_sse::{SseClient, SseClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SseClient::new(
//!         "https://example.com/api/completion/stream?threadId=t-1",
//!         SseClientOptions::default(),
//!     )?
//!     .on_event(|msg| println!("{}", msg.data))
//!     .on_close(|| println!("stream closed"))
//!     .build();
//!
//!     client.connect().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod heartbeat;
pub mod infrastructure;
pub mod lifecycle;
pub mod transport;
pub mod types;

pub use client::{
    ConnectionStatus, ReadyState, SseClient, SseClientBuilder, SseClientOptions,
};
pub use heartbeat::HeartbeatWatchdog;
pub use lifecycle::{LifecycleObserver, Visibility};
pub use transport::{BoxedEventStream, EventStreamTransport, HttpEventStreamFactory};
pub use types::{Result, SseError, SseMessage};
