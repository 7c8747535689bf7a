use tokio::task::JoinHandle;

/// Named background-task slots owned by one client instance.
///
/// The read loop, heartbeat watchdog, and reconnect timer each get a
/// dedicated slot; storing a new handle aborts whatever was in the slot.
/// The retry slot is distinguishable so the lifecycle manager can keep
/// the invariant of at most one pending reconnect timer.
#[derive(Default)]
pub struct TaskRegistry {
    read: Option<JoinHandle<()>>,
    watchdog: Option<JoinHandle<()>>,
    retry: Option<JoinHandle<()>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_read(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.read.replace(handle) {
            old.abort();
        }
    }

    pub fn set_watchdog(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.watchdog.replace(handle) {
            old.abort();
        }
    }

    /// Arm the one-shot reconnect timer.
    pub fn arm_retry(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.retry.replace(handle) {
            old.abort();
        }
    }

    /// Whether a reconnect timer is armed and has not fired yet.
    pub fn retry_pending(&self) -> bool {
        self.retry.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Drop the retry handle without aborting (the timer fired).
    pub fn clear_retry(&mut self) {
        self.retry = None;
    }

    /// Abort a pending reconnect timer, if any.
    pub fn cancel_retry(&mut self) {
        if let Some(handle) = self.retry.take() {
            handle.abort();
        }
    }

    /// Abort the read loop, leaving watchdog and timer slots alone.
    pub fn abort_read(&mut self) {
        if let Some(handle) = self.read.take() {
            handle.abort();
        }
    }

    /// Abort everything. Used by `close()`.
    pub fn abort_all(&mut self) {
        for handle in [self.read.take(), self.watchdog.take(), self.retry.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_retry_pending_tracks_armed_timer() {
        let mut tasks = TaskRegistry::new();
        assert!(!tasks.retry_pending());

        tasks.arm_retry(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        assert!(tasks.retry_pending());

        tasks.cancel_retry();
        assert!(!tasks.retry_pending());
    }

    #[tokio::test]
    async fn test_clear_retry_drops_handle_without_aborting() {
        let mut tasks = TaskRegistry::new();
        tasks.arm_retry(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        assert!(tasks.retry_pending());
        tasks.clear_retry();
        assert!(!tasks.retry_pending());
    }
}
