//! Job status polling state machine.
//!
//! [`submit_and_watch`] submits one generation request and spawns a watcher
//! task that queries `GET /status/{job_id}` on a fixed cadence until a
//! terminal state is reached. Observers read [`Job`] snapshots from a watch
//! channel; the owner stops the loop deterministically through the returned
//! [`JobHandle`].
//!
//! Each poll response is a full snapshot and is applied wholesale
//! (last-write-wins). The service processes one job id serially and the
//! watcher awaits each query inline, so at most one request is in flight
//! per job and no ordering metadata is needed.
//!
//! At most one polling loop exists per job id: the only way to start one is
//! through [`submit_and_watch`], which owns the freshly assigned id.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use docgen_protocol::{
    STATUS_CACHED, STATUS_COMPLETED, STATUS_FAILED, STATUS_STARTED, StatusResponse,
};

use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{GenerationRequest, JobId};

/// Lifecycle states of one watched job.
///
/// `Completed` and `CompletedFromCache` are both success terminals that
/// unlock the download locator; they are distinguished for display only.
/// `Cancelled` is client-local - the service never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Submitting,
    Polling,
    Completed,
    CompletedFromCache,
    Failed,
    Cancelled,
}

impl JobState {
    /// Maps a wire status string onto a state. Non-terminal strings
    /// ("queued", "Cloning repository", ...) all map to `Polling`.
    pub fn from_wire(status: &str) -> Self {
        match status {
            STATUS_COMPLETED => Self::Completed,
            STATUS_CACHED => Self::CompletedFromCache,
            STATUS_FAILED => Self::Failed,
            _ => Self::Polling,
        }
    }

    /// Whether no further polling occurs in this state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::CompletedFromCache | Self::Failed | Self::Cancelled
        )
    }

    /// Whether the download locator is meaningful in this state.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Completed | Self::CompletedFromCache)
    }
}

/// Snapshot of a watched job, published after every applied poll response.
#[derive(Debug, Clone)]
pub struct Job {
    /// Assigned by the service at submission; `None` until then.
    pub id: Option<JobId>,
    pub state: JobState,
    /// The service's verbatim status label, kept for display.
    pub status_label: String,
    /// Integer percentage as reported; not assumed monotonic.
    pub progress: u8,
    /// Failure detail reported by the service or the transport.
    pub error: Option<String>,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            id: None,
            state: JobState::Idle,
            status_label: String::new(),
            progress: 0,
            error: None,
        }
    }
}

/// Tuning for the watcher loop.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Fixed polling cadence.
    pub interval: Duration,
    /// Consecutive transport failures tolerated before giving up. A
    /// successful poll resets the counter; a lone network blip therefore
    /// only delays visibility.
    pub max_poll_failures: u32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_poll_failures: 3,
        }
    }
}

/// Owner handle for one watcher task.
///
/// Dropping the handle cancels the loop; a resolved-but-stale response is
/// discarded, so no state mutation occurs after teardown.
#[derive(Debug)]
pub struct JobHandle {
    rx: watch::Receiver<Job>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl JobHandle {
    /// Latest published snapshot.
    pub fn snapshot(&self) -> Job {
        self.rx.borrow().clone()
    }

    /// A receiver observing every subsequent snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Job> {
        self.rx.clone()
    }

    /// Suspends until the job reaches a terminal state and returns it.
    pub async fn wait(&mut self) -> Job {
        loop {
            let job = self.rx.borrow_and_update().clone();
            if job.state.is_terminal() {
                return job;
            }
            if self.rx.changed().await.is_err() {
                // Watcher task ended; its last publication stands.
                return self.rx.borrow().clone();
            }
        }
    }

    /// Stops the watcher and waits for it to wind down.
    pub async fn stop(mut self) -> Job {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.rx.borrow().clone()
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Submits `request` and starts watching the assigned job.
///
/// Validation failures short-circuit before any network call and before any
/// state transition. A submission failure is recorded as `Failed` on the
/// published snapshot rather than wedging the watcher in `Submitting`.
pub fn submit_and_watch(
    client: ApiClient,
    request: GenerationRequest,
    config: WatchConfig,
) -> Result<JobHandle> {
    request.validate()?;

    let (tx, rx) = watch::channel(Job {
        state: JobState::Submitting,
        ..Job::default()
    });
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run_watch(client, request, config, tx, cancel.clone()));

    Ok(JobHandle {
        rx,
        cancel,
        task: Some(task),
    })
}

async fn run_watch(
    client: ApiClient,
    request: GenerationRequest,
    config: WatchConfig,
    tx: watch::Sender<Job>,
    cancel: CancellationToken,
) {
    let id = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            mark_cancelled(&tx);
            return;
        }
        submitted = client.start_generation(&request) => match submitted {
            Ok(id) => id,
            Err(err) => {
                warn!(target = "docgen.job", repo = %request.repo, error = %err, "submission failed");
                tx.send_modify(|job| {
                    job.state = JobState::Failed;
                    job.status_label = STATUS_FAILED.to_string();
                    job.error = Some(err.to_string());
                });
                return;
            }
        },
    };

    debug!(target = "docgen.job", job_id = %id, "watching job");
    tx.send_modify(|job| {
        job.id = Some(id.clone());
        job.state = JobState::Polling;
        job.status_label = STATUS_STARTED.to_string();
    });

    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut consecutive_failures = 0u32;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                mark_cancelled(&tx);
                return;
            }
            _ = interval.tick() => {}
        }

        // Cover the in-flight request too: cancellation drops the future and
        // its response is never applied.
        let polled = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                mark_cancelled(&tx);
                return;
            }
            polled = client.job_status(&id) => polled,
        };

        match polled {
            Ok(status) => {
                consecutive_failures = 0;
                if apply_status(&tx, &status) {
                    debug!(
                        target = "docgen.job",
                        job_id = %id,
                        status = %status.status,
                        "terminal status observed; polling stopped"
                    );
                    return;
                }
            }
            Err(err) => {
                consecutive_failures += 1;
                warn!(
                    target = "docgen.job",
                    job_id = %id,
                    error = %err,
                    attempt = consecutive_failures,
                    "status query failed; retrying next tick"
                );
                if consecutive_failures >= config.max_poll_failures {
                    tx.send_modify(|job| {
                        job.state = JobState::Failed;
                        job.status_label = STATUS_FAILED.to_string();
                        job.error = Some(err.to_string());
                    });
                    return;
                }
            }
        }
    }
}

/// Applies one full status snapshot, overwriting prior values wholesale.
/// Returns whether a terminal state was reached.
fn apply_status(tx: &watch::Sender<Job>, status: &StatusResponse) -> bool {
    let next = JobState::from_wire(&status.status);
    tx.send_modify(|job| {
        job.state = next;
        job.status_label = status.status.clone();
        job.progress = status.progress;
        job.error = status.error.clone();
    });
    next.is_terminal()
}

fn mark_cancelled(tx: &watch::Sender<Job>) {
    tx.send_modify(|job| {
        if !job.state.is_terminal() {
            job.state = JobState::Cancelled;
        }
    });
}
