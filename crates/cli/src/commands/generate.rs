//! Full generation flow: discovery, submission, watching, download.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use tracing::info;

use docgen::{GenerationRequest, Job, JobState, RepoRef, WatchConfig, submit_and_watch};

use crate::context::CommandContext;
use crate::error::{CliError, Result};

pub struct GenerateArgs {
    pub repo: String,
    pub branch: Option<String>,
    pub theme: String,
    pub model: String,
    pub format: String,
    pub output: Option<PathBuf>,
    pub no_download: bool,
    pub poll_interval: u64,
}

pub async fn run(ctx: &CommandContext, args: GenerateArgs) -> Result<()> {
    let repo = RepoRef::parse(&args.repo)?;
    let client = ctx.client()?;

    let branch = match args.branch {
        Some(branch) => branch,
        None => {
            let set = client.list_branches_or_empty(&repo).await;
            match set.default_branch() {
                Some(default) => default.to_string(),
                None => {
                    println!("Branch discovery unavailable; falling back to 'main'.");
                    "main".to_string()
                }
            }
        }
    };

    info!(target = "docgen", repo = %repo, %branch, "starting generation");
    println!("Generating documentation for {repo} ({branch})");

    let request = GenerationRequest::new(repo, branch)
        .with_theme(args.theme)
        .with_model(args.model)
        .with_format(args.format.clone());
    let config = WatchConfig {
        interval: Duration::from_secs(args.poll_interval.max(1)),
        ..WatchConfig::default()
    };

    let handle = submit_and_watch(client.clone(), request, config)?;
    let job = watch_progress(&handle).await;

    match job.state {
        JobState::Completed | JobState::CompletedFromCache => {
            let label = if job.state == JobState::CompletedFromCache {
                "Generation complete (served from cache)"
            } else {
                "Generation complete"
            };
            println!("{}", label.green());

            let id = job
                .id
                .ok_or_else(|| CliError::Context("job finished without an id".to_string()))?;

            if args.no_download {
                println!("Download available at: {}", client.download_url(&id)?);
            } else {
                let output = args
                    .output
                    .unwrap_or_else(|| PathBuf::from(format!("documentation.{}", args.format)));
                let written = client.download_to(&id, &output).await?;
                println!("Saved {} ({written} bytes)", output.display());
            }
            Ok(())
        }
        JobState::Failed => {
            let detail = job
                .error
                .unwrap_or_else(|| "generation failed without detail".to_string());
            eprintln!("{}", format!("Generation failed: {detail}").red());
            Err(docgen::Error::JobFailed(detail).into())
        }
        _ => Err(CliError::Context("generation was interrupted".to_string())),
    }
}

/// Prints each observed snapshot until the job reaches a terminal state.
async fn watch_progress(handle: &docgen::JobHandle) -> Job {
    let mut rx = handle.subscribe();
    let mut last_line = String::new();

    loop {
        let job = rx.borrow_and_update().clone();
        let line = render(&job);
        if line != last_line && !line.is_empty() {
            println!("{line}");
            last_line = line;
        }
        if job.state.is_terminal() {
            return job;
        }
        if rx.changed().await.is_err() {
            return rx.borrow().clone();
        }
    }
}

fn render(job: &Job) -> String {
    match job.state {
        JobState::Idle | JobState::Submitting => "Submitting...".to_string(),
        JobState::Polling => format!("  {:>3}% {}", job.progress, job.status_label),
        // Terminal lines are rendered by the caller.
        _ => String::new(),
    }
}
