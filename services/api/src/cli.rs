use crate::commands::{run_export, run_job_list, run_seed, ExportArgs, JobListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Serve and administer the job board data service",
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
    /// Initialize empty collections with the starter dataset
    Seed,
    /// Query job postings from the configured store
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Print the full dataset as JSON
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List one page of postings, newest first
    List(JobListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seed => run_seed().await,
        Command::Jobs {
            command: JobsCommand::List(args),
        } => run_job_list(args).await,
        Command::Export(args) => run_export(args).await,
    }
}
