use clap::Parser;
use docgen_cli::{cli::Cli, commands, context::CommandContext, logging};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let ctx = match CommandContext::new(cli.api_url, cli.session_file) {
        Ok(ctx) => ctx,
        Err(err) => {
            error!(target = "docgen", error = %err, "failed to initialize");
            std::process::exit(1);
        }
    };

    if let Err(err) = commands::dispatch(cli.command, &ctx).await {
        error!(target = "docgen", error = %err, "command failed");
        std::process::exit(1);
    }
}
