use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "docgen")]
#[command(about = "Generate repository documentation through the docgen service")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Base URL of the docgen service
    #[arg(
        long,
        global = true,
        env = "DOCGEN_API_URL",
        default_value = "http://localhost:8000",
        value_name = "URL"
    )]
    pub api_url: Url,

    /// Session file overriding the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the service credential
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// List repositories visible to the authenticated user
    Repos {
        /// Emit the raw listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// List branches for a repository
    #[command(alias = "br")]
    Branches {
        /// Repository as owner/name
        repo: String,
        /// Emit the branch set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate documentation and wait for completion
    #[command(alias = "gen")]
    Generate {
        /// Repository as owner/name
        repo: String,
        /// Branch to document (defaults to the repository default)
        #[arg(short, long)]
        branch: Option<String>,
        /// Documentation theme
        #[arg(long, default_value = "default")]
        theme: String,
        /// Model used by the service
        #[arg(long, default_value = "llama3.2")]
        model: String,
        /// Output format (md, pdf, docx)
        #[arg(short, long, default_value = "md")]
        format: String,
        /// File to save the artifact to (defaults to documentation.<format>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Skip downloading the artifact after completion
        #[arg(long)]
        no_download: bool,
        /// Polling interval in seconds
        #[arg(long, default_value = "2", value_name = "SECS")]
        poll_interval: u64,
    },

    /// Show the current status of a job
    Status {
        job_id: String,
        /// Emit the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the artifact of a completed job
    #[command(alias = "dl")]
    Download {
        job_id: String,
        /// File to save the artifact to
        #[arg(short, long, default_value = "documentation.md", value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Store a bearer token for the service
    Login { token: String },
    /// Show where the credential is stored (token is masked)
    Show,
    /// Remove the stored credential
    Logout,
}
