use std::path::PathBuf;

use clap::Parser;

use crate::config::{OutputFormat, Settings};
use crate::source::TimeRange;

/// Score how performative your recent Spotify listening looks
#[derive(Parser, Debug)]
#[command(name = "performativify")]
#[command(version)]
#[command(about = "Score how performative your recent Spotify listening looks")]
pub struct Args {
    /// Which top-tracks window to analyze
    #[arg(long, alias = "time_range", value_enum)]
    pub time_range: Option<TimeRange>,

    /// How many top tracks to analyze
    #[arg(long)]
    pub limit: Option<usize>,

    /// Read tracks and artists from a JSON snapshot instead of the Spotify API
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Write the fetched tracks and artists to a JSON snapshot
    #[arg(long, value_name = "PATH")]
    pub save_snapshot: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable ANSI styling in the text report
    #[arg(long)]
    pub no_color: bool,

    /// Path to the config file (overrides PERFORMATIVIFY_CONFIG_PATH)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(range) = self.time_range {
            settings.fetch.time_range = range;
        }
        if let Some(limit) = self.limit {
            settings.fetch.limit = limit;
        }
        if let Some(format) = self.format {
            settings.report.format = format;
        }
        if self.no_color {
            settings.report.color = false;
        }
    }
}
