//! Shared execution context resolved once in `main`.

use std::path::PathBuf;

use url::Url;

use docgen::{ApiClient, SessionStore};

use crate::error::Result;

/// Resolved API endpoint and credential store handed to every command.
///
/// The credential is loaded here and passed into the client explicitly;
/// commands never read storage ad hoc.
pub struct CommandContext {
    api_url: Url,
    store: SessionStore,
}

impl CommandContext {
    pub fn new(api_url: Url, session_file: Option<PathBuf>) -> Result<Self> {
        let store = match session_file {
            Some(path) => SessionStore::new(path),
            None => SessionStore::default_location()?,
        };
        Ok(Self { api_url, store })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Builds a client carrying the stored credential when present.
    pub fn client(&self) -> Result<ApiClient> {
        let session = self.store.load()?;
        Ok(ApiClient::new(self.api_url.clone()).with_session(session))
    }
}
