use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::client::SseClient;

/// Detects silent connection death from the absence of inbound traffic.
///
/// Push transports do not reliably signal half-open connections, so
/// liveness is inferred from application-level traffic (keep-alive pings
/// included). An open stream that has been silent for longer than the
/// heartbeat window is funneled into the same reconnection path a
/// transport error takes, without waiting for the transport to notice.
pub struct HeartbeatWatchdog {
    interval: Duration,
    client: SseClient,
}

impl HeartbeatWatchdog {
    pub fn new(client: SseClient) -> Self {
        Self {
            interval: client.heartbeat_interval(),
            client,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawns the periodic check task. Checks run twice per heartbeat
    /// window.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(self.interval / 2);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                self.client.heartbeat_check().await;
            }
        })
    }
}
