// Module declarations
mod builder;
mod connection;
mod core;
mod state;

// Public API exports
pub use builder::{
    ErrorCallback, EventHandlers, LifecycleCallback, MessageCallback, SseClientBuilder,
    SseClientOptions,
};
pub use connection::{ConnectionManager, ReadyState};
pub use self::core::SseClient;
pub use state::{ClientState, ConnectionStatus};
