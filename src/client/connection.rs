use serde::Serialize;
use tokio::sync::RwLock;

/// Connection readiness as seen by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Connecting,
    Open,
    Closed,
}

/// Owns the readiness of the underlying event stream.
///
/// SSE is a read-only transport, so teardown is aborting the read task;
/// there is no writer half to close here.
pub struct ConnectionManager {
    state: RwLock<ReadyState>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ReadyState::Closed),
        }
    }

    /// Gets the current ready state
    pub async fn ready_state(&self) -> ReadyState {
        *self.state.read().await
    }

    /// Sets the ready state
    pub async fn set_ready_state(&self, new_state: ReadyState) {
        let mut state = self.state.write().await;
        *state = new_state;
    }

    /// Checks if the stream is currently open
    pub async fn is_open(&self) -> bool {
        *self.state.read().await == ReadyState::Open
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
