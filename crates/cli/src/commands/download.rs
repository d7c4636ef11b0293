//! Artifact retrieval for a completed job.

use std::path::Path;

use docgen::JobId;

use crate::context::CommandContext;
use crate::error::Result;

pub async fn run(ctx: &CommandContext, job_id: &str, output: &Path) -> Result<()> {
    let client = ctx.client()?;
    let id = JobId::new(job_id);
    let written = client.download_to(&id, output).await?;
    println!("Saved {} ({written} bytes)", output.display());
    Ok(())
}
