use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "keel",
    about = "keel — ordered in-memory repositories and gauges",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load JSON records into a keyed repository and print one page
    Page(PageArgs),
    /// Feed a payload to a gauge and print its value
    Gauge(GaugeArgs),
}

#[derive(Args)]
pub struct PageArgs {
    /// JSON file holding an array of objects
    #[arg(short, long)]
    pub file: PathBuf,
    /// Field whose value (string or integer) keys each record
    #[arg(short, long, default_value = "id")]
    pub key: String,
    /// Index of the first record on the page
    #[arg(long, conflicts_with = "page", allow_hyphen_values = true)]
    pub offset: Option<i64>,
    /// Zero-based page number
    #[arg(short, long, allow_hyphen_values = true)]
    pub page: Option<i64>,
    /// Maximum number of records on the page
    #[arg(short = 'n', long, default_value = "20", allow_hyphen_values = true)]
    pub size: i64,
    /// Sort order as `property[,asc|desc]`; repeatable
    #[arg(long)]
    pub sort: Vec<String>,
    /// Store configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct GaugeArgs {
    #[arg(long)]
    pub name: String,
    /// Payload as JSON; bare text is taken as a string
    #[arg(long, allow_hyphen_values = true)]
    pub payload: String,
}
