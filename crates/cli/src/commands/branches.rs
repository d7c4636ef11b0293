//! Branch discovery command.

use serde_json::json;

use docgen::RepoRef;

use crate::context::CommandContext;
use crate::error::Result;

pub async fn run(ctx: &CommandContext, repo: &str, json_output: bool) -> Result<()> {
    let repo = RepoRef::parse(repo)?;
    let client = ctx.client()?;

    // Discovery failure degrades to an empty set; the user can still pass
    // an explicit --branch to `generate`.
    let set = client.list_branches_or_empty(&repo).await;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "branches": set.branches(),
                "default": set.default_branch(),
            }))?
        );
        return Ok(());
    }

    if set.is_empty() {
        println!("No branches found for {repo} (service unavailable or repository unreachable).");
        return Ok(());
    }

    for branch in set.branches() {
        if set.default_branch() == Some(branch.as_str()) {
            println!("* {branch}");
        } else {
            println!("  {branch}");
        }
    }

    Ok(())
}
