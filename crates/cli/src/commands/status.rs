//! One-shot status query command.

use colored::Colorize;

use docgen::{JobId, JobState};
use docgen_protocol::StatusResponse;

use crate::context::CommandContext;
use crate::error::Result;

pub async fn run(ctx: &CommandContext, job_id: &str, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let snapshot: StatusResponse = client.job_status(&JobId::new(job_id)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let state = JobState::from_wire(&snapshot.status);
    let label = match state {
        JobState::Completed | JobState::CompletedFromCache => snapshot.status.green(),
        JobState::Failed => snapshot.status.red(),
        _ => snapshot.status.normal(),
    };

    println!("Job:      {job_id}");
    println!("Status:   {label}");
    println!("Progress: {}%", snapshot.progress);
    if let Some(error) = &snapshot.error {
        println!("Error:    {error}");
    }
    if state.is_success() {
        println!("Download: {}", client.download_url(&JobId::new(job_id))?);
    }

    Ok(())
}
