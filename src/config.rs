use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::ALL;

/// Student performance dashboard: linked histogram, box plot, trend line and
/// details table over one filtered dataset.
#[derive(Debug, Clone, Parser)]
#[command(name = "study-panda", version, about)]
pub struct Config {
    /// Student records (.csv, .json or .parquet).
    #[arg(value_name = "DATA", default_value = "student_performance_prediction.csv")]
    pub data: PathBuf,

    /// Verbose logging and the diagnostics window.
    #[arg(long)]
    pub debug: bool,

    /// Initial pass-status filter ("All", "Passed" or "Not Passed").
    #[arg(long, default_value = ALL)]
    pub passed: String,

    /// Initial parent-education filter ("All" or a level present in the data).
    #[arg(long = "parent-education", default_value = ALL)]
    pub parent_education: String,

    /// Rows per page in the details table.
    #[arg(
        long = "page-size",
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub page_size: u16,

    /// Write the view data as JSON to PATH ("-" for stdout) instead of
    /// opening a window.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl Config {
    /// Default log level; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
