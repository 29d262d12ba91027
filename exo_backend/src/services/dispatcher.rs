//! Dispatch of enriched records into the rate-limited queue.
//!
//! Each selected record becomes one image-generation task. The client's
//! rate-limit error maps onto the queue's typed rate-limit variant, so the
//! retry branch is a plain enum match — the queue never inspects the shape
//! of an arbitrary error to guess whether it was a rate limit.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::domain::EnrichedRecord;
use crate::queue::{JobHandle, JobQueue, TaskError};
use crate::services::image_client::{ImageGenError, ImageGenerator};
use crate::transformations::filtering::{apply_mask, MaskPolicy};

impl From<ImageGenError> for TaskError {
    fn from(err: ImageGenError) -> Self {
        match err {
            ImageGenError::RateLimited { retry_after_ms } => {
                TaskError::RateLimited { retry_after_ms }
            }
            other => TaskError::Failed(other.to_string()),
        }
    }
}

/// Feeds image-generation work for enriched records through one queue.
pub struct EnrichmentDispatcher<G: ImageGenerator + 'static> {
    queue: JobQueue<String>,
    generator: Arc<G>,
}

impl<G: ImageGenerator + 'static> EnrichmentDispatcher<G> {
    pub fn new(queue: JobQueue<String>, generator: Arc<G>) -> Self {
        Self { queue, generator }
    }

    pub fn queue(&self) -> &JobQueue<String> {
        &self.queue
    }

    /// Enqueue one record's image generation. The handle resolves to an
    /// image reference string (data URI or URL).
    pub fn dispatch(&self, record: &EnrichedRecord) -> JobHandle<String> {
        self.dispatch_cancellable(record, CancellationToken::new())
    }

    /// Enqueue with a caller-supplied cancellation token.
    pub fn dispatch_cancellable(
        &self,
        record: &EnrichedRecord,
        cancel: CancellationToken,
    ) -> JobHandle<String> {
        let generator = Arc::clone(&self.generator);
        let prompt = record.description.clone();
        let negative = record.negative_description.clone();

        self.queue.enqueue_cancellable(
            move || {
                let generator = Arc::clone(&generator);
                let prompt = prompt.clone();
                let negative = negative.clone();
                async move {
                    generator
                        .generate(&prompt, &negative)
                        .await
                        .map_err(TaskError::from)
                }
            },
            cancel,
        )
    }

    /// Enqueue every record, in order.
    pub fn dispatch_all(&self, records: &[EnrichedRecord]) -> Vec<JobHandle<String>> {
        records.iter().map(|r| self.dispatch(r)).collect()
    }

    /// Apply the inclusion mask, then enqueue the kept records in order.
    pub fn dispatch_masked(
        &self,
        records: &[EnrichedRecord],
        mask: &[u8],
        policy: MaskPolicy,
    ) -> Vec<JobHandle<String>> {
        let selected = apply_mask(records, mask, policy);
        log::debug!(
            "dispatching {} of {} records selected by mask",
            selected.len(),
            records.len()
        );
        self.dispatch_all(&selected)
    }
}
