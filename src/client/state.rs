use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;

use super::connection::ReadyState;
use crate::infrastructure::TaskRegistry;

/// Consumer-visible snapshot of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionStatus {
    pub ready_state: ReadyState,
    pub retry_count: u32,
    pub is_reconnecting: bool,
}

impl ConnectionStatus {
    pub(crate) fn disconnected() -> Self {
        Self {
            ready_state: ReadyState::Closed,
            retry_count: 0,
            is_reconnecting: false,
        }
    }
}

/// Consolidated mutable state for SseClient
/// Using a single struct reduces lock contention
pub struct ClientState {
    /// Reconnection attempts since the last successful open
    pub retry_count: u32,

    /// Whether a reconnection sequence is in progress
    pub is_reconnecting: bool,

    /// Whether the close was manual (prevents auto-reconnect)
    pub manually_closed: bool,

    /// Whether the server signaled graceful completion
    pub completed: bool,

    /// Whether the terminal exhaustion close has already fired
    pub exhaustion_notified: bool,

    /// When the last inbound event arrived (keep-alives included)
    pub last_event_at: Instant,

    /// Id of the last event carrying one, replayed on reconnect
    pub last_event_id: Option<String>,

    /// Background task ownership (read loop, watchdog, retry timer)
    pub tasks: TaskRegistry,

    /// Sender for state change notifications
    pub state_change_tx: Option<watch::Sender<ConnectionStatus>>,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            retry_count: 0,
            is_reconnecting: false,
            manually_closed: false,
            completed: false,
            exhaustion_notified: false,
            last_event_at: Instant::now(),
            last_event_id: None,
            tasks: TaskRegistry::new(),
            state_change_tx: None,
        }
    }

    /// Notify state change watchers
    pub fn notify_state_change(&self, ready_state: ReadyState) {
        if let Some(tx) = &self.state_change_tx {
            let status = ConnectionStatus {
                ready_state,
                retry_count: self.retry_count,
                is_reconnecting: self.is_reconnecting,
            };
            if tx.send(status).is_err() {
                tracing::debug!("state change watcher disconnected, could not notify");
            }
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}
