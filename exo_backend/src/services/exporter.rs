//! Persistence boundary: POST enriched records to an external endpoint.
//!
//! Export is fire-and-forget from the pipeline's perspective — one JSON
//! record per call, failures logged and swallowed. An awaitable variant
//! exists for callers that do want the outcome.

use std::time::Duration;
use thiserror::Error;

use crate::core::domain::EnrichedRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint returned status {0}")]
    Api(u16),
}

/// Client for the record-persistence endpoint.
#[derive(Clone)]
pub struct RecordExporter {
    http: reqwest::Client,
    endpoint: String,
}

impl RecordExporter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ExportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ExportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// POST one record and report the outcome.
    pub async fn export(&self, record: &EnrichedRecord) -> Result<(), ExportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| ExportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Api(status.as_u16()));
        }
        Ok(())
    }

    /// Fire-and-forget export: spawns the POST and logs failures.
    pub fn spawn_export(&self, record: EnrichedRecord) {
        let exporter = self.clone();
        tokio::spawn(async move {
            if let Err(err) = exporter.export(&record).await {
                log::warn!(
                    "failed to export record {:?}: {}",
                    record.canonical.planet_name,
                    err
                );
            }
        });
    }
}
