use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::data::model::YearRange;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "dying-dialects")]
#[command(version)]
#[command(about = "Historical Asian-language course enrollment, by term and by level")]
pub struct Cli {
    /// Enrollment dataset to open at startup (.json, .csv or .parquet)
    #[arg(value_name = "DATA", env = "DYING_DIALECTS_DATA")]
    pub data: Option<PathBuf>,

    /// First year shown on the charts
    #[arg(long, default_value_t = YearRange::DEFAULT_MIN)]
    pub from_year: i32,

    /// Last year shown on the charts
    #[arg(long, default_value_t = YearRange::DEFAULT_MAX)]
    pub to_year: i32,
}

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: Option<PathBuf>,
    pub year_range: YearRange,
}

impl DashboardConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let year_range = YearRange::new(cli.from_year, cli.to_year)?;
        Ok(DashboardConfig {
            data_path: cli.data,
            year_range,
        })
    }
}
