//! Bodies for `POST /start-generation` and `GET /status/{job_id}`.

use serde::{Deserialize, Serialize};

/// Status string reported for a freshly submitted job.
pub const STATUS_STARTED: &str = "Started";
/// Status string reported for a job that finished successfully.
pub const STATUS_COMPLETED: &str = "Completed";
/// Status string reported when the artifact was served from the service cache.
pub const STATUS_CACHED: &str = "Loaded from cache";
/// Status string reported for a job that terminated with an error.
pub const STATUS_FAILED: &str = "Failed";

/// Request body for starting a generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGenerationRequest {
    pub repo_url: String,
    pub branch: String,
    pub theme: String,
    pub model: String,
    pub format: String,
}

/// Response body carrying the job handle assigned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGenerationResponse {
    pub job_id: String,
}

/// Full status snapshot for a job.
///
/// Every poll returns a complete snapshot, not a delta. `status` is the
/// service's free-form progress label ("Cloning repository", "Building
/// Markdown", ...) until one of the terminal strings above is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
