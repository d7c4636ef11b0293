//! Bodies for `GET /github/repos`.

use serde::{Deserialize, Serialize};

/// One repository visible to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Response body for the repository listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReposResponse {
    #[serde(default)]
    pub repos: Vec<RepoSummary>,
}
