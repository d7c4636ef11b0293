//! Repository browser command.

use crate::context::CommandContext;
use crate::error::Result;

pub async fn run(ctx: &CommandContext, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let repos = client.list_repositories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(());
    }

    if repos.is_empty() {
        println!("No repositories available.");
        return Ok(());
    }

    println!("{:<40} {:<10} {}", "REPOSITORY", "VISIBILITY", "URL");
    println!("{}", "-".repeat(80));
    for repo in &repos {
        let visibility = if repo.private { "private" } else { "public" };
        let url = repo.html_url.as_deref().unwrap_or("-");
        println!("{:<40} {:<10} {}", repo.full_name, visibility, url);
    }
    println!();
    println!("Total: {} repositories", repos.len());

    Ok(())
}
