mod auth;
mod branches;
mod download;
mod generate;
mod repos;
mod status;

use crate::cli::Commands;
use crate::context::CommandContext;
use crate::error::Result;

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Auth { action } => auth::run(action, ctx),
        Commands::Repos { json } => repos::run(ctx, json).await,
        Commands::Branches { repo, json } => branches::run(ctx, &repo, json).await,
        Commands::Generate {
            repo,
            branch,
            theme,
            model,
            format,
            output,
            no_download,
            poll_interval,
        } => {
            generate::run(
                ctx,
                generate::GenerateArgs {
                    repo,
                    branch,
                    theme,
                    model,
                    format,
                    output,
                    no_download,
                    poll_interval,
                },
            )
            .await
        }
        Commands::Status { job_id, json } => status::run(ctx, &job_id, json).await,
        Commands::Download { job_id, output } => download::run(ctx, &job_id, &output).await,
    }
}
