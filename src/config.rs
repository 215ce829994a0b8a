use std::path::PathBuf;

use clap::Parser;

/// Congressional topic trends: mentions per topic per year, from a spreadsheet
/// of report summaries.
///
/// Without `--export` the dashboard window opens; with it the filtered counts
/// are written as CSV and the program exits.
#[derive(Debug, Clone, Parser)]
#[command(name = "topic-trends", version, about)]
pub struct Config {
    /// Spreadsheet with `file_name` and `main_topic_summary` columns
    /// (.xlsx, .xls, .ods, .csv, .json, .parquet)
    #[arg(env = "TOPIC_TRENDS_DATA")]
    pub data: Option<PathBuf>,

    /// Write the filtered counts to this CSV file instead of opening the window
    #[arg(long, value_name = "PATH", requires = "data")]
    pub export: Option<PathBuf>,

    /// First year to include (defaults to the earliest observed year)
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Last year to include (defaults to the latest observed year)
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Only include these topics (repeatable; defaults to all topics)
    #[arg(long = "topic", value_name = "TOPIC")]
    pub topics: Vec<String>,
}
