use crate::client::{ReadyState, SseClient};
use crate::infrastructure::{AbortBeacon, thread_id_from_url};

/// Host-reported page visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Page lifecycle hooks for the stream.
///
/// Browser embeddings forward visibilitychange/beforeunload here; other
/// hosts call these from their own foreground/background transitions.
pub struct LifecycleObserver {
    client: SseClient,
}

impl LifecycleObserver {
    pub fn new(client: SseClient) -> Self {
        Self { client }
    }

    /// Visibility restored while the stream is down re-establishes it
    /// eagerly instead of waiting for the next heartbeat check. Hiding
    /// the page takes no corrective action; the watchdog keeps running
    /// so drops are caught immediately on foreground.
    pub async fn visibility_changed(&self, visibility: Visibility) {
        match visibility {
            Visibility::Hidden => {
                tracing::debug!("page hidden, event stream remains open");
            }
            Visibility::Visible => {
                let status = self.client.status().await;
                if status.ready_state != ReadyState::Open && !self.client.is_manually_closed().await
                {
                    tracing::debug!("page visible, re-establishing event stream");
                    let _ = self.client.retry().await;
                }
            }
        }
    }

    /// Page unload: close the stream, then notify the companion abort
    /// endpoint so the server releases the abandoned session early. The
    /// notification is fire-and-forget and never blocks unload.
    pub async fn page_unload(&self) {
        tracing::debug!("page unloading, closing event stream");
        self.client.close().await;

        let Some(endpoint) = self.client.abort_endpoint() else {
            return;
        };
        if let Some(thread_id) = thread_id_from_url(self.client.url()) {
            AbortBeacon::new(endpoint).fire(&thread_id);
        }
    }
}
