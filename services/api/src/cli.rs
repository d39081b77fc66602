use crate::render::{run_opportunity_list, run_opportunity_show, run_timeline};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fellows::catalog::OpportunityCategory;
use fellows::error::AppError;
use fellows::pages::parse_date;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fellows.best",
    about = "Serve and inspect the fellows.best opportunity directory",
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
    /// Inspect individual opportunities or the browse listing
    Opportunity {
        #[command(subcommand)]
        command: OpportunityCommand,
    },
    /// Print open opportunities ordered by deadline
    Timeline(TimelineArgs),
}

#[derive(Subcommand, Debug)]
enum OpportunityCommand {
    /// Show the detail page for one opportunity
    Show(ShowArgs),
    /// List opportunities with optional filters
    List(ListArgs),
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

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// CSV catalog to load instead of APP_CATALOG_PATH or the bundled catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Evaluate deadlines as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Opportunity identifier, e.g. y-combinator
    pub(crate) id: String,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Only list this category (fellowship, accelerator, grant, hackathon, competition)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<OpportunityCategory>,
    /// Only list opportunities carrying this tag
    #[arg(long)]
    pub(crate) tag: Option<String>,
    /// Include opportunities whose deadline has passed
    #[arg(long)]
    pub(crate) include_closed: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TimelineArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

fn parse_category(raw: &str) -> Result<OpportunityCategory, String> {
    OpportunityCategory::from_slug(raw).ok_or_else(|| format!("unknown category '{raw}'"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Opportunity {
            command: OpportunityCommand::Show(args),
        } => run_opportunity_show(args),
        Command::Opportunity {
            command: OpportunityCommand::List(args),
        } => run_opportunity_list(args),
        Command::Timeline(args) => run_timeline(args),
    }
}
