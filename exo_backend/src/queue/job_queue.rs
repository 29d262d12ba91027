//! Single-lane task queue with a minimum inter-task interval.
//!
//! External generation services impose per-account rate limits, so derived
//! work (image requests) funnels through one strictly serialized queue: at
//! most one task in flight, with a configurable minimum spacing between task
//! starts. A task that fails with a rate-limit signal is re-queued at the
//! head — before any newer task — after the signaled backoff, without
//! resolving its handle.
//!
//! Enqueue never blocks and may be called concurrently; the drain loop is
//! self-driving once the queue is non-empty.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::QueueConfig;

/// Terminal outcome of a queued task.
///
/// `RateLimited` is special-cased by the queue itself: it triggers a retry
/// with backoff instead of surfacing to the caller. `Canceled` is a distinct
/// outcome, not a generic failure — callers should treat the task as
/// abandoned.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The downstream service asked us to back off.
    #[error("rate limited, retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    /// The task was canceled via its cancellation token.
    #[error("task canceled")]
    Canceled,

    /// Any other terminal failure, surfaced to the caller.
    #[error("{0}")]
    Failed(String),
}

impl TaskError {
    pub fn failed(message: impl Into<String>) -> Self {
        TaskError::Failed(message.into())
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        TaskError::Failed(err.to_string())
    }
}

type TaskFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, TaskError>> + Send>;

struct QueuedTask<T> {
    id: Uuid,
    enqueued_at: chrono::DateTime<chrono::Utc>,
    run: TaskFn<T>,
    done: oneshot::Sender<Result<T, TaskError>>,
    cancel: CancellationToken,
}

struct State<T> {
    pending: VecDeque<QueuedTask<T>>,
    draining: bool,
    last_run: Option<Instant>,
    min_interval: Duration,
}

struct Inner<T> {
    state: Mutex<State<T>>,
}

/// Handle to one enqueued task. Resolves exactly once.
pub struct JobHandle<T> {
    id: Uuid,
    token: CancellationToken,
    rx: oneshot::Receiver<Result<T, TaskError>>,
}

impl<T> JobHandle<T> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Request cooperative cancellation. The task will be rejected with
    /// [`TaskError::Canceled`] and never retried.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the task's terminal outcome.
    pub async fn wait(self) -> Result<T, TaskError> {
        match self.rx.await {
            Ok(result) => result,
            // The queue was dropped with this task still pending.
            Err(_) => Err(TaskError::Canceled),
        }
    }
}

/// Rate-limited single-worker task queue.
///
/// Cheap to clone; all clones share the same lane.
pub struct JobQueue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for JobQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> JobQueue<T> {
    /// Create a queue with the given minimum spacing between task starts.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    pending: VecDeque::new(),
                    draining: false,
                    last_run: None,
                    min_interval,
                }),
            }),
        }
    }

    pub fn from_config(config: &QueueConfig) -> Self {
        Self::new(Duration::from_millis(config.min_interval_ms))
    }

    /// Change the minimum spacing. Takes effect on the next wait computation.
    pub fn set_min_interval(&self, min_interval: Duration) {
        self.inner.state.lock().min_interval = min_interval;
    }

    pub fn min_interval(&self) -> Duration {
        self.inner.state.lock().min_interval
    }

    /// Number of tasks waiting (not counting one currently in flight).
    pub fn len(&self) -> usize {
        self.inner.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().pending.is_empty()
    }

    /// Enqueue a task with a fresh cancellation token.
    ///
    /// The task is a factory: it is invoked once per execution attempt, so a
    /// rate-limited retry re-invokes it for a fresh future.
    pub fn enqueue<F, Fut>(&self, task: F) -> JobHandle<T>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        self.enqueue_cancellable(task, CancellationToken::new())
    }

    /// Enqueue a task governed by a caller-supplied cancellation token.
    ///
    /// Never blocks. A token canceled before the task starts rejects it
    /// without consuming a rate slot; cancellation during execution aborts
    /// the task's future.
    pub fn enqueue_cancellable<F, Fut>(&self, task: F, cancel: CancellationToken) -> JobHandle<T>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        let (done, rx) = oneshot::channel();
        let id = Uuid::new_v4();
        let queued = QueuedTask {
            id,
            enqueued_at: chrono::Utc::now(),
            run: Box::new(move || task().boxed()),
            done,
            cancel: cancel.clone(),
        };

        self.inner.state.lock().pending.push_back(queued);
        self.kick();

        JobHandle {
            id,
            token: cancel,
            rx,
        }
    }

    /// Start the drain loop unless one is already running.
    fn kick(&self) {
        {
            let mut st = self.inner.state.lock();
            if st.draining || st.pending.is_empty() {
                return;
            }
            st.draining = true;
        }
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            drain(inner).await;
        });
    }
}

/// The single worker loop: waits out the rate interval, runs the head task,
/// and handles retry/cancel/failure outcomes until the queue empties.
async fn drain<T: Send + 'static>(inner: Arc<Inner<T>>) {
    loop {
        let wait = {
            let mut st = inner.state.lock();
            if st.pending.is_empty() {
                st.draining = false;
                return;
            }
            match st.last_run {
                Some(last) => (last + st.min_interval).saturating_duration_since(Instant::now()),
                None => Duration::ZERO,
            }
        };

        if !wait.is_zero() {
            log::debug!("rate limiting: waiting {:?} before next task", wait);
            sleep(wait).await;
        }

        let Some(task) = inner.state.lock().pending.pop_front() else {
            continue;
        };

        if task.cancel.is_cancelled() {
            // Never started, so no rate slot is consumed.
            log::debug!("job {} canceled before start", task.id);
            let _ = task.done.send(Err(TaskError::Canceled));
            continue;
        }

        inner.state.lock().last_run = Some(Instant::now());
        log::debug!(
            "job {} starting (enqueued at {})",
            task.id,
            task.enqueued_at
        );

        let cancel = task.cancel.clone();
        let fut = (task.run)();
        let result = tokio::select! {
            _ = cancel.cancelled() => Err(TaskError::Canceled),
            r = fut => r,
        };

        match result {
            Ok(value) => {
                let _ = task.done.send(Ok(value));
            }
            Err(TaskError::RateLimited { retry_after_ms }) => {
                log::warn!(
                    "job {} rate limited, backing off {} ms before retry",
                    task.id,
                    retry_after_ms
                );
                let canceled = tokio::select! {
                    _ = cancel.cancelled() => true,
                    _ = sleep(Duration::from_millis(retry_after_ms)) => false,
                };
                if canceled {
                    // A canceled task is never retried, even after a
                    // rate-limit report.
                    let _ = task.done.send(Err(TaskError::Canceled));
                } else {
                    // Head of the queue: the retried task runs before any
                    // newer task.
                    inner.state.lock().pending.push_front(task);
                }
            }
            Err(err) => {
                log::debug!("job {} failed: {}", task.id, err);
                let _ = task.done.send(Err(err));
            }
        }
    }
}
