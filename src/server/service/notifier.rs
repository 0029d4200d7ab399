//! Fire-and-forget hand-off of completed requests to the external analysis service.

use tracing::{debug, error, info};

use crate::server::model::analysis::AnalysisJob;

/// Receives analysis jobs after the resolving transaction has committed.
///
/// Implementations must not block the caller and must not report failures back; the
/// committed request outcome is final regardless of what happens here.
pub trait AnalysisDispatcher {
    fn dispatch(&self, job: AnalysisJob);
}

/// Posts jobs as JSON to the configured analysis endpoint from a spawned task.
#[derive(Clone)]
pub struct HttpAnalysisDispatcher {
    client: reqwest::Client,
    url: Option<String>,
}

impl HttpAnalysisDispatcher {
    /// # Arguments
    /// - `client` - Shared HTTP client
    /// - `url` - Analysis endpoint; `None` disables dispatch
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }
}

impl AnalysisDispatcher for HttpAnalysisDispatcher {
    fn dispatch(&self, job: AnalysisJob) {
        let Some(url) = self.url.clone() else {
            debug!(
                "Analysis service not configured, skipping dispatch for request {}",
                job.request_id
            );
            return;
        };

        let client = self.client.clone();
        let request_id = job.request_id;
        let payload = job.into_dto();

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("Dispatched analysis for request {}", request_id);
                }
                Ok(response) => {
                    error!(
                        "Analysis service returned {} for request {}",
                        response.status(),
                        request_id
                    );
                }
                Err(e) => {
                    error!(
                        "Failed to dispatch analysis for request {}: {}",
                        request_id, e
                    );
                }
            }
        });
    }
}
