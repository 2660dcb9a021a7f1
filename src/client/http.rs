use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::WorkerSource;
use crate::error::FetchError;
use crate::models::ApiResponse;
use crate::models::services::ServiceStats;
use crate::models::workers::{WorkerPage, WorkerQuery, WorkerRecord};

/// [`WorkerSource`] backed by the JSON API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// `base_url` points at the API root, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `path`, check the status and unwrap the `{success, data}` envelope.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(T, Option<serde_json::Value>), FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!("Fetching {url}");

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let envelope: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if !envelope.success {
            return Err(FetchError::Unsuccessful(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let data = envelope
            .data
            .ok_or_else(|| FetchError::Malformed("missing `data`".to_string()))?;
        Ok((data, envelope.metadata))
    }
}

impl WorkerSource for HttpSource {
    async fn fetch_workers(&self, query: &WorkerQuery) -> Result<WorkerPage, FetchError> {
        let (records, metadata) = self
            .get_envelope::<Vec<WorkerRecord>>("/workers", &query.to_query_pairs())
            .await?;

        let total_count = metadata
            .as_ref()
            .and_then(|m| m.get("totalCount"))
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(records.len() as u64);

        Ok(WorkerPage {
            records,
            total_count,
        })
    }

    async fn fetch_services(&self) -> Result<Vec<String>, FetchError> {
        let (services, _) = self.get_envelope("/services", &[]).await?;
        Ok(services)
    }

    async fn fetch_service_stats(&self) -> Result<Vec<ServiceStats>, FetchError> {
        let (stats, _) = self
            .get_envelope("/services", &[("stats", "true".to_string())])
            .await?;
        Ok(stats)
    }
}
