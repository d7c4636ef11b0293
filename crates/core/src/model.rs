//! Shared data model for the generation flow.

use std::fmt;

use docgen_protocol::ListBranchesResponse;

use crate::error::{Error, Result};

/// Reference to a source repository, `owner/name` form.
///
/// Immutable once constructed; passed by value between components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.trim().is_empty() || name.trim().is_empty() {
            return Err(Error::Validation(
                "repository reference requires both owner and name".to_string(),
            ));
        }
        Ok(Self { owner, name })
    }

    /// Parses an `owner/name` string.
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(Error::Validation(format!(
                "expected repository as owner/name, got {full_name:?}"
            ))),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTPS clone URL sent to the service.
    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Branches available for one repository plus its default, fetched prior to
/// submission. Not cached across reference changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSet {
    branches: Vec<String>,
    default: Option<String>,
}

impl BranchSet {
    /// Builds a set from the wire response, normalizing the default.
    ///
    /// A default that is empty, or not a member of a non-empty branch list,
    /// is dropped rather than trusted; the caller then decides the fallback.
    pub fn from_response(resp: ListBranchesResponse) -> Self {
        let default = if resp.default.is_empty() {
            None
        } else if !resp.branches.is_empty() && !resp.branches.iter().any(|b| b == &resp.default) {
            None
        } else {
            Some(resp.default)
        };
        Self {
            branches: resp.branches,
            default,
        }
    }

    /// Empty set used when discovery fails and the flow degrades gracefully.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Opaque job handle assigned by the service at submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generation request, consumed exactly once by submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub repo: RepoRef,
    pub branch: String,
    pub theme: String,
    pub model: String,
    pub format: String,
}

impl GenerationRequest {
    /// Creates a request with the service defaults for theme/model/format.
    pub fn new(repo: RepoRef, branch: impl Into<String>) -> Self {
        Self {
            repo,
            branch: branch.into(),
            theme: "default".to_string(),
            model: "llama3.2".to_string(),
            format: "md".to_string(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Checks the non-empty requirements. Allowed enumeration values are the
    /// service's responsibility, not the client's.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("branch", &self.branch),
            ("theme", &self.theme),
            ("model", &self.model),
            ("format", &self.format),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
