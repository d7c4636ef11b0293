//! Bodies for `POST /list-branches`.

use serde::{Deserialize, Serialize};

/// Request body for branch discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBranchesRequest {
    pub repo_url: String,
}

/// Response body for branch discovery.
///
/// `default` may be empty when the service could not determine a default
/// branch; consumers must not assume membership in `branches` without
/// checking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBranchesResponse {
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(default)]
    pub default: String,
}
