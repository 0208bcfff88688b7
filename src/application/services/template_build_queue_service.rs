//! Template Build Queue Service - Background seat template builds
//!
//! Builds are submitted without waiting for them to finish. Every submission
//! gets a build record that moves Pending -> Processing -> Completed/Failed,
//! and a completion channel that resolves with the final record, so failures
//! are observable even though the submitter does not block on them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{oneshot, Mutex, RwLock, Semaphore};

use crate::application::dto::{BuildRequest, TemplateBuildRecord, TemplateBuildStatus};
use crate::application::ports::outbound::HallRepositoryPort;
use crate::application::services::SeatTemplateService;
use crate::domain::value_objects::TemplateBuildId;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Template build queue is full")]
    QueueFull,
    #[error("Template build queue is closed")]
    Closed,
}

/// Handle returned to the submitter of a build
#[derive(Debug)]
pub struct TemplateBuildTicket {
    pub build_id: TemplateBuildId,
    /// Resolves with the finished record (Completed or Failed)
    pub completion: oneshot::Receiver<TemplateBuildRecord>,
}

struct TemplateBuildJob {
    build_id: TemplateBuildId,
    request: BuildRequest,
    completion: oneshot::Sender<TemplateBuildRecord>,
}

type BuildRecords = Arc<RwLock<HashMap<TemplateBuildId, TemplateBuildRecord>>>;

/// Service for queueing and running seat template builds
pub struct TemplateBuildQueueService<R: HallRepositoryPort + 'static> {
    builder: Arc<SeatTemplateService<R>>,
    sender: mpsc::Sender<TemplateBuildJob>,
    receiver: Mutex<mpsc::Receiver<TemplateBuildJob>>,
    builds: BuildRecords,
    semaphore: Arc<Semaphore>,
}

impl<R: HallRepositoryPort + 'static> TemplateBuildQueueService<R> {
    /// Create a new template build queue service
    ///
    /// # Arguments
    ///
    /// * `builder` - The service that performs the actual build
    /// * `capacity` - Maximum number of builds waiting in the queue
    /// * `worker_count` - Maximum number of builds running at once
    pub fn new(builder: Arc<SeatTemplateService<R>>, capacity: usize, worker_count: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            builder,
            sender,
            receiver: Mutex::new(receiver),
            builds: Arc::new(RwLock::new(HashMap::new())),
            semaphore: Arc::new(Semaphore::new(worker_count.max(1))),
        }
    }

    /// Queue a template build and return immediately
    pub async fn submit(&self, request: BuildRequest) -> Result<TemplateBuildTicket, QueueError> {
        let record = TemplateBuildRecord::pending(request.hall_id);
        let build_id = record.id;
        let hall_id = request.hall_id;
        let (completion_tx, completion_rx) = oneshot::channel();

        self.builds.write().await.insert(build_id, record);

        let job = TemplateBuildJob {
            build_id,
            request,
            completion: completion_tx,
        };
        if let Err(e) = self.sender.try_send(job) {
            self.builds.write().await.remove(&build_id);
            return Err(match e {
                TrySendError::Full(_) => QueueError::QueueFull,
                TrySendError::Closed(_) => QueueError::Closed,
            });
        }

        tracing::info!(build_id = %build_id, hall_id = %hall_id, "Queued seat template build");
        Ok(TemplateBuildTicket {
            build_id,
            completion: completion_rx,
        })
    }

    /// Background worker that processes queued builds
    ///
    /// Runs each build in a spawned task, holding a semaphore permit for the
    /// duration so at most `worker_count` builds run concurrently.
    pub async fn run_worker(&self) {
        let mut receiver = self.receiver.lock().await;
        loop {
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!("Semaphore error: {}", e);
                    break;
                }
            };

            let Some(job) = receiver.recv().await else {
                tracing::info!("Template build queue closed, stopping worker");
                break;
            };

            let builder = self.builder.clone();
            let builds = self.builds.clone();
            tokio::spawn(async move {
                let _permit = permit;
                Self::process(builder, builds, job).await;
            });
        }
    }

    async fn process(
        builder: Arc<SeatTemplateService<R>>,
        builds: BuildRecords,
        job: TemplateBuildJob,
    ) {
        let TemplateBuildJob {
            build_id,
            request,
            completion,
        } = job;

        Self::set_status(&builds, build_id, TemplateBuildStatus::Processing).await;
        tracing::info!(build_id = %build_id, hall_id = %request.hall_id, "Processing seat template build");

        let status = match builder
            .allocate_seat_template(request.hall_id, &request.floors)
            .await
        {
            Ok(summary) => {
                tracing::info!(build_id = %build_id, seats = summary.seats, "Seat template build completed");
                TemplateBuildStatus::Completed { summary }
            }
            Err(e) => {
                tracing::error!(build_id = %build_id, hall_id = %request.hall_id, "Seat template build failed: {}", e);
                TemplateBuildStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        if let Some(record) = Self::set_status(&builds, build_id, status).await {
            if completion.send(record).is_err() {
                tracing::debug!(build_id = %build_id, "Build submitter no longer waiting");
            }
        }
    }

    async fn set_status(
        builds: &BuildRecords,
        build_id: TemplateBuildId,
        status: TemplateBuildStatus,
    ) -> Option<TemplateBuildRecord> {
        let mut builds = builds.write().await;
        let record = builds.get_mut(&build_id)?;
        if status.is_finished() {
            record.finished_at = Some(Utc::now());
        }
        record.status = status;
        Some(record.clone())
    }

    /// Get a build record by ID
    pub async fn get(&self, build_id: TemplateBuildId) -> Option<TemplateBuildRecord> {
        self.builds.read().await.get(&build_id).cloned()
    }

    /// List all known builds, oldest first
    pub async fn list(&self) -> Vec<TemplateBuildRecord> {
        let mut records: Vec<_> = self.builds.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.submitted_at);
        records
    }

    /// Remove finished builds older than the retention window
    pub async fn cleanup(&self, older_than: Duration) -> usize {
        let Some(cutoff) = chrono::Duration::from_std(older_than)
            .ok()
            .and_then(|age| Utc::now().checked_sub_signed(age))
        else {
            return 0;
        };

        let mut builds = self.builds.write().await;
        let before = builds.len();
        builds.retain(|_, record| match record.finished_at {
            Some(finished_at) => finished_at > cutoff,
            None => true,
        });
        before - builds.len()
    }
}
