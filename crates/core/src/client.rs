//! HTTP client for the docgen service.
//!
//! One [`ApiClient`] instance covers branch discovery, job submission,
//! status queries, the repository browser, and the download locator. The
//! bearer credential is supplied explicitly at construction, never read
//! from ambient state, so the client stays testable without a storage
//! environment.

use std::path::Path;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use docgen_protocol::{
    ListBranchesRequest, ListBranchesResponse, ListReposResponse, RepoSummary,
    StartGenerationRequest, StartGenerationResponse, StatusResponse,
};

use crate::error::{Error, Result};
use crate::model::{BranchSet, GenerationRequest, JobId, RepoRef};
use crate::session::Session;

/// Typed client over the service's HTTP contract.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Option<Session>,
}

impl ApiClient {
    /// Creates an unauthenticated client against a service base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            session: None,
        }
    }

    /// Attaches a bearer credential to every subsequent request.
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// Whether a credential is attached.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches branches and the default branch for a repository.
    ///
    /// Failures resolve to an explicit [`Error`]; callers that can proceed
    /// with a manually-entered branch should use
    /// [`list_branches_or_empty`](Self::list_branches_or_empty) instead.
    pub async fn list_branches(&self, repo: &RepoRef) -> Result<BranchSet> {
        let url = self.endpoint(&["list-branches"])?;
        let body = ListBranchesRequest {
            repo_url: repo.clone_url(),
        };
        let resp = self.authorize(self.http.post(url).json(&body)).send().await?;
        let resp = Self::check(resp).await?;
        let parsed: ListBranchesResponse = resp.json().await?;
        debug!(
            target = "docgen.api",
            repo = %repo,
            branches = parsed.branches.len(),
            default = %parsed.default,
            "branch discovery complete"
        );
        Ok(BranchSet::from_response(parsed))
    }

    /// Branch discovery with graceful degradation: any failure is logged and
    /// surfaced as an empty [`BranchSet`] so generation stays possible with a
    /// manually-entered branch.
    pub async fn list_branches_or_empty(&self, repo: &RepoRef) -> BranchSet {
        match self.list_branches(repo).await {
            Ok(set) => set,
            Err(err) => {
                warn!(
                    target = "docgen.api",
                    repo = %repo,
                    error = %err,
                    "branch discovery failed; continuing with empty branch set"
                );
                BranchSet::empty()
            }
        }
    }

    /// Submits a generation job and returns the id assigned by the service.
    pub async fn start_generation(&self, request: &GenerationRequest) -> Result<JobId> {
        request.validate()?;
        let url = self.endpoint(&["start-generation"])?;
        let body = StartGenerationRequest {
            repo_url: request.repo.clone_url(),
            branch: request.branch.clone(),
            theme: request.theme.clone(),
            model: request.model.clone(),
            format: request.format.clone(),
        };
        let resp = self.authorize(self.http.post(url).json(&body)).send().await?;
        let resp = Self::check(resp).await?;
        let parsed: StartGenerationResponse = resp.json().await?;
        debug!(target = "docgen.api", repo = %request.repo, job_id = %parsed.job_id, "job submitted");
        Ok(JobId::new(parsed.job_id))
    }

    /// Queries the full status snapshot for a job.
    pub async fn job_status(&self, id: &JobId) -> Result<StatusResponse> {
        let url = self.endpoint(&["status", id.as_str()])?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Lists repositories visible to the authenticated user.
    ///
    /// Short-circuits with [`Error::Unauthenticated`] before any network
    /// call when no credential is attached.
    pub async fn list_repositories(&self) -> Result<Vec<RepoSummary>> {
        if self.session.is_none() {
            return Err(Error::Unauthenticated);
        }
        let url = self.endpoint(&["github", "repos"])?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        let resp = Self::check(resp).await?;
        let parsed: ListReposResponse = resp.json().await?;
        Ok(parsed.repos)
    }

    /// Deterministic artifact locator for a job id.
    ///
    /// Pure URL construction, no network call. Meaningful only once the
    /// job has reached a success terminal; the service rejects earlier use.
    pub fn download_url(&self, id: &JobId) -> Result<Url> {
        self.endpoint(&["download", id.as_str()])
    }

    /// Fetches the artifact for a completed job into `path`.
    ///
    /// Returns the number of bytes written. A failure mid-stream removes the
    /// partial file; `path` either holds the complete artifact or is absent.
    pub async fn download_to(&self, id: &JobId, path: &Path) -> Result<u64> {
        let url = self.download_url(id)?;
        let resp = self.authorize(self.http.get(url)).send().await?;
        let mut resp = Self::check(resp).await?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::File::create(path).await?;
        match Self::stream_body(&mut resp, &mut file).await {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(file);
                let _ = tokio::fs::remove_file(path).await;
                Err(err)
            }
        }
    }

    async fn stream_body(resp: &mut Response, file: &mut tokio::fs::File) -> Result<u64> {
        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|()| Error::Validation("api base URL cannot be a base".to_string()))?;
            parts.pop_if_empty();
            parts.extend(segments);
        }
        Ok(url)
    }

    /// Maps non-2xx responses onto the error taxonomy, extracting the
    /// service's `{"detail": ...}` body when present.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthenticated);
        }

        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(str::to_string)))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });

        Err(Error::Remote {
            status: status.as_u16(),
            detail,
        })
    }
}
