use std::fmt::Write as _;

use crossterm::style::Stylize;
use serde::Serialize;

use crate::config::{OutputFormat, ReportSettings};
use crate::metrics::{MetricsResult, SCORE_WEIGHTS_VERSION, clamp01, pct};
use crate::source::TimeRange;

pub const NO_TRACKS_MESSAGE: &str = "No tracks found. Play more music.";

/// Everything a report shows, independent of output format.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub time_range: TimeRange,
    pub tracks_analyzed: usize,
    pub weights_version: u32,
    pub metrics: &'a MetricsResult,
    pub suggestions: &'a [String],
}

impl<'a> Report<'a> {
    pub fn new(
        time_range: TimeRange,
        tracks_analyzed: usize,
        metrics: &'a MetricsResult,
        suggestions: &'a [String],
    ) -> Self {
        Self {
            time_range,
            tracks_analyzed,
            weights_version: SCORE_WEIGHTS_VERSION,
            metrics,
            suggestions,
        }
    }
}

/// `[####----]` bar with `width` cells, filled in proportion to `x`.
pub fn bar(x: f64, width: usize) -> String {
    let filled = (clamp01(x) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn render(report: &Report<'_>, settings: &ReportSettings) -> Result<String, RenderError> {
    match settings.format {
        OutputFormat::Text => Ok(render_text(report, settings)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Toml => Ok(toml::to_string_pretty(report)?),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode TOML report: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub fn render_text(report: &Report<'_>, settings: &ReportSettings) -> String {
    let m = report.metrics;
    let width = settings.bar_width;
    let heading = |s: &str| {
        if settings.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("=== Performativify ==="));
    let _ = writeln!(out, "Time range: {}", report.time_range.label());
    let _ = writeln!(out, "Tracks analyzed: {}", report.tracks_analyzed);
    out.push('\n');

    let overall = format!("Overall Performative Score: {} / 100", pct(m.score));
    let _ = writeln!(out, "{} {}", heading(&overall), bar(m.score, width));
    out.push('\n');

    let lines = [
        ("Mainstream Flex (popularity):", m.pop),
        ("Recency (newness):", m.recency),
        ("Globalness (markets):", m.globalness),
        ("Edgy Points (explicit):", m.explicit),
        ("Artist Mainstream:", m.artist_mainstream),
        ("Artist Diversity:", m.artist_diversity),
        ("Genre Variety (artists):", m.genre_variety),
    ];
    for (label, value) in lines {
        let _ = writeln!(out, "{label:<30}{:>3}% {}", pct(value), bar(value, width));
    }
    out.push('\n');

    let _ = writeln!(out, "Unique artists: {}", m.unique_artists);
    let _ = writeln!(out, "Unique genres:  {}", m.unique_genres);
    out.push('\n');

    let _ = writeln!(out, "{}", heading("How to be more performative:"));
    for (i, tip) in report.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, tip);
    }

    out
}
