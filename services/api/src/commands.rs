use crate::infra::{build_board, SharedBackend};
use clap::Args;
use job_board::config::{AppConfig, StoreConfig};
use job_board::dataset::DatasetSnapshot;
use job_board::error::AppError;
use job_board::jobs::{EmploymentType, JobListParams, JobServiceError};
use job_board::latency::SimulatedLatency;
use job_board::JobBoard;

#[derive(Args, Debug, Default)]
pub(crate) struct JobListArgs {
    /// Case-insensitive match against title or company
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Full-time, Part-time, Contract or Temporary
    #[arg(long, value_parser = parse_employment_type)]
    pub(crate) employment_type: Option<EmploymentType>,
    /// Exact location, e.g. "Toronto, ON"
    #[arg(long, conflicts_with = "remote_only")]
    pub(crate) location: Option<String>,
    /// Only postings whose location mentions remote work
    #[arg(long)]
    pub(crate) remote_only: bool,
    /// 1-based page number
    #[arg(long)]
    pub(crate) page: Option<u32>,
    /// Page size (defaults to 6)
    #[arg(long)]
    pub(crate) limit: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Pretty-print the dataset JSON
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn parse_employment_type(raw: &str) -> Result<EmploymentType, String> {
    EmploymentType::from_label(raw.trim()).ok_or_else(|| {
        let expected: Vec<&str> = EmploymentType::ALL.iter().map(|kind| kind.label()).collect();
        format!("unknown employment type '{raw}' (expected one of {})", expected.join(", "))
    })
}

/// Initializes any collection that has never been written.
pub(crate) async fn run_seed() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let board = build_board(&config.store, SimulatedLatency::none());
    let report = board.store().seed().await?;

    if report.seeded.is_empty() {
        println!("All collections already initialized; nothing seeded.");
    } else {
        println!("Seeded collections:");
        for key in report.seeded {
            println!("  - {key}");
        }
    }
    Ok(())
}

/// Opens the configured store, seeding it only when `seed_on_start` is set.
async fn open_for_reading(store: &StoreConfig) -> Result<JobBoard<SharedBackend>, AppError> {
    let board = build_board(store, SimulatedLatency::none());
    if store.seed_on_start {
        board.store().seed().await?;
    }
    Ok(board)
}

pub(crate) async fn run_job_list(args: JobListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let board = open_for_reading(&config.store).await?;

    let params = JobListParams {
        search: args.search,
        employment_type: args.employment_type,
        location: args.location,
        remote_only: args.remote_only,
        page: args.page,
        limit: args.limit,
    };
    let (filter, window) = params.into_query().map_err(JobServiceError::from)?;
    let page = board.jobs().list(&filter, window).await?;

    println!(
        "Jobs page {} ({} per page), {} matching",
        page.page, page.limit, page.total_count
    );
    if page.items.is_empty() {
        println!("  No jobs on this page.");
    }
    for job in &page.items {
        println!(
            "  [{}] {} at {} | {} | {} | posted {}",
            job.id,
            job.title,
            job.company,
            job.location,
            job.employment_type,
            job.posted_date.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Writes every collection to stdout as one JSON document.
pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let board = build_board(&config.store, SimulatedLatency::none());
    let snapshot = board.store().snapshot().await?;

    println!("{}", render_snapshot(&snapshot, args.pretty)?);
    Ok(())
}

fn render_snapshot(snapshot: &DatasetSnapshot, pretty: bool) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(rendered)
}
