//! End-to-end watcher behavior against the fake service.

mod support;

use std::sync::atomic::Ordering;
use std::time::Duration;

use docgen::{ApiClient, GenerationRequest, JobState, RepoRef, WatchConfig, submit_and_watch};
use support::{FakeDocgen, ServiceState, status_failed, status_ok};

fn fast_config() -> WatchConfig {
    WatchConfig {
        interval: Duration::from_millis(20),
        max_poll_failures: 3,
    }
}

fn request() -> GenerationRequest {
    GenerationRequest::new(RepoRef::parse("acme/app").unwrap(), "main")
}

#[tokio::test]
async fn submit_poll_complete_unlocks_download() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([
        status_ok("Started", 10),
        status_ok("Completed", 100),
    ]);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client.clone(), request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::Completed);
    assert!(job.state.is_success());
    assert_eq!(job.progress, 100);
    let id = job.id.expect("job id assigned at submission");
    assert_eq!(id.as_str(), "abc123");

    // Submission payload carried the request fields verbatim.
    let submitted = server.state.last_submission.lock().unwrap().clone().unwrap();
    assert_eq!(submitted["repo_url"], "https://github.com/acme/app.git");
    assert_eq!(submitted["branch"], "main");
    assert_eq!(submitted["theme"], "default");
    assert_eq!(submitted["model"], "llama3.2");
    assert_eq!(submitted["format"], "md");

    // The download handle is deterministic and usable once successful.
    assert_eq!(
        client.download_url(&id).unwrap().as_str(),
        format!("http://{}/download/abc123", server.addr)
    );
    let tmp = tempfile::TempDir::new().unwrap();
    let out = tmp.path().join("documentation.md");
    let written = client.download_to(&id, &out).await.unwrap();
    assert!(written > 0);
    assert_eq!(
        std::fs::read(&out).unwrap(),
        b"# Repository Documentation\n"
    );

    // No further queries after the terminal status was observed.
    let hits = server.status_hits();
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(server.status_hits(), hits);
}

#[tokio::test]
async fn cache_hit_is_a_success_terminal() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([status_ok("Loaded from cache", 100)]);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client, request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::CompletedFromCache);
    assert!(job.state.is_success());
    assert_eq!(job.status_label, "Loaded from cache");
}

#[tokio::test]
async fn failure_retains_detail_and_stops_polling() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([status_ok("Cloning repository", 10), status_failed("clone failed")]);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client, request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::Failed);
    assert!(!job.state.is_success());
    assert_eq!(job.error.as_deref(), Some("clone failed"));

    let hits = server.status_hits();
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(server.status_hits(), hits);
}

#[tokio::test]
async fn submission_failure_lands_in_failed_not_submitting() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.state.fail_submission.store(true, Ordering::SeqCst);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client, request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::Failed);
    assert!(job.error.unwrap().contains("worker pool exhausted"));
    assert!(job.id.is_none());
    assert_eq!(server.status_hits(), 0);
}

#[tokio::test]
async fn empty_branch_short_circuits_without_network() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    let client = ApiClient::new(server.base_url());
    let mut request = request();
    request.branch = String::new();

    let result = submit_and_watch(client, request, fast_config());
    assert!(matches!(result, Err(docgen::Error::Validation(_))));
    assert_eq!(server.submit_hits(), 0);
}

#[tokio::test]
async fn cancellation_stops_queries_and_freezes_state() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([status_ok("Processing files", 30)]);
    let client = ApiClient::new(server.base_url());

    let handle = submit_and_watch(client, request(), fast_config()).unwrap();

    // Let a few polls land, then tear down.
    tokio::time::sleep(Duration::from_millis(70)).await;
    let job = handle.stop().await;
    assert_eq!(job.state, JobState::Cancelled);
    assert_eq!(job.progress, 30);

    let hits = server.status_hits();
    assert!(hits > 0, "expected at least one poll before cancellation");
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(server.status_hits(), hits, "no queries after teardown");
}

#[tokio::test]
async fn dropping_the_handle_cancels_the_watcher() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([status_ok("Processing files", 30)]);
    let client = ApiClient::new(server.base_url());

    let handle = submit_and_watch(client, request(), fast_config()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(handle);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let hits = server.status_hits();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(server.status_hits(), hits);
}

#[tokio::test]
async fn transient_poll_failures_are_skipped() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    server.script_statuses([
        support::Scripted::Error,
        status_ok("Processing files", 50),
        support::Scripted::Error,
        status_ok("Completed", 100),
    ]);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client, request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::Completed);
    assert_eq!(server.status_hits(), 4);
}

#[tokio::test]
async fn persistent_poll_failures_exhaust_to_failed() {
    let server = FakeDocgen::spawn(ServiceState::default()).await;
    // Empty script: every status query answers 500.
    server.script_statuses([]);
    let client = ApiClient::new(server.base_url());

    let mut handle = submit_and_watch(client, request(), fast_config()).unwrap();
    let job = handle.wait().await;

    assert_eq!(job.state, JobState::Failed);
    assert!(job.error.is_some());
    assert_eq!(server.status_hits(), 3);
}
