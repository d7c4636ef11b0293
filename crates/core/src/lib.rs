//! Client-side job lifecycle orchestration for the docgen service.
//!
//! The service generates documentation for a git repository asynchronously:
//! the client submits a generation request, receives a job id, and polls the
//! job status on a fixed cadence until one of the terminal outcomes is
//! reached. This crate owns that lifecycle end to end:
//!
//! * [`SessionStore`] - durable single-key storage for the bearer credential
//! * [`ApiClient`] - branch discovery, job submission, status queries,
//!   repository listing, and the download locator
//! * [`submit_and_watch`] - the polling state machine, exposed as a
//!   cancellable [`JobHandle`] publishing [`Job`] snapshots
//!
//! Wire shapes live in `docgen-protocol`; everything here is the ergonomic
//! layer above them.

pub mod client;
pub mod error;
pub mod job;
pub mod model;
pub mod session;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use job::{Job, JobHandle, JobState, WatchConfig, submit_and_watch};
pub use model::{BranchSet, GenerationRequest, JobId, RepoRef};
pub use session::{Session, SessionStore};
