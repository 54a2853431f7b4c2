use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config;
use crate::metrics::{RULES, compute_metrics, compute_suggestions};
use crate::report::{NO_TRACKS_MESSAGE, Report, render};
use crate::source::{
    ArtistSource, Snapshot, SnapshotSource, SpotifyClient, TrackSource, unique_artist_ids,
};

mod cli;
mod logging;
mod settings;

use cli::Args;

pub fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let mut settings = settings::load_settings(args.config.as_deref());
    args.apply(&mut settings);
    if let Err(msg) = settings.validate() {
        anyhow::bail!("invalid options: {msg}");
    }
    if !std::io::stdout().is_terminal() {
        settings.report.color = false;
    }

    let output = match &args.snapshot {
        Some(path) => {
            let source = SnapshotSource::open(path)?;
            tracing::info!(path = %source.path().display(), "scoring snapshot");
            analyze(&source, &source, &settings, args.save_snapshot.as_deref())?
        }
        None => {
            let client = SpotifyClient::new(&settings.spotify)?;
            analyze(&client, &client, &settings, args.save_snapshot.as_deref())?
        }
    };

    print!("{output}");
    Ok(())
}

/// Fetch, score and render one report.
pub fn analyze(
    track_source: &impl TrackSource,
    artist_source: &impl ArtistSource,
    settings: &config::Settings,
    save_snapshot: Option<&Path>,
) -> Result<String> {
    let fetch = &settings.fetch;
    let tracks = track_source
        .top_tracks(fetch.time_range, fetch.limit)
        .context("failed to fetch top tracks")?;

    let artists = if tracks.is_empty() {
        Vec::new()
    } else {
        let ids = unique_artist_ids(&tracks);
        tracing::debug!(tracks = tracks.len(), artists = ids.len(), "resolving artists");
        artist_source
            .artists(&ids)
            .context("failed to fetch artists")?
    };

    if let Some(path) = save_snapshot {
        let snapshot = Snapshot {
            tracks: tracks.clone(),
            artists: artists.clone(),
        };
        snapshot.write(path)?;
        tracing::info!(path = %path.display(), "saved snapshot");
    }

    let Some(metrics) = compute_metrics(&tracks, &artists) else {
        return Ok(format!("{NO_TRACKS_MESSAGE}\n"));
    };
    let suggestions = compute_suggestions(&metrics);
    for (name, value) in metrics.fields() {
        tracing::trace!(name, ?value, "metric");
    }
    let fired: Vec<&str> = RULES
        .iter()
        .filter(|rule| rule.triggers(&metrics))
        .map(|rule| rule.name)
        .collect();
    tracing::debug!(score = metrics.score, ?fired, "computed metrics");

    let report = Report::new(fetch.time_range, tracks.len(), &metrics, &suggestions);
    Ok(render(&report, &settings.report)?)
}
