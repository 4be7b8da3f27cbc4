use crate::demo::{run_demo, run_match, DemoArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_portal::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Opportunity Portal",
    about = "Match applicants to job postings and serve the portal over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the eligibility matcher once for an applicant described by flags
    Match(MatchArgs),
    /// Walk a scripted applicant through the form, result and back again
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the interview listing CSV path
    #[arg(long)]
    pub(crate) interviews_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Demo(args) => run_demo(args),
    }
}
