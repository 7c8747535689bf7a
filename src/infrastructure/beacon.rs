use serde_json::json;
use url::Url;

use crate::types::constants::THREAD_ID_PARAM;

/// Best-effort notification to the companion abort endpoint.
///
/// Fired on page unload so the server can release an abandoned session
/// early. The request is spawned detached and never awaited; failure is
/// logged at debug and otherwise ignored.
pub struct AbortBeacon {
    endpoint: String,
}

impl AbortBeacon {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Fire the notification for the given thread id. Returns immediately.
    pub fn fire(&self, thread_id: &str) {
        let endpoint = self.endpoint.clone();
        let body = json!({ "threadId": thread_id });
        tokio::spawn(async move {
            let result = reqwest::Client::new()
                .post(&endpoint)
                .json(&body)
                .send()
                .await;
            match result {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "abort notification sent");
                }
                Err(err) => {
                    tracing::debug!("abort notification failed: {}", err);
                }
            }
        });
    }
}

/// Extracts the logical session id from the stream URL's query string.
pub fn thread_id_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == THREAD_ID_PARAM)
        .map(|(_, value)| value.into_owned())
}
