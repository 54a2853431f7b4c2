//! Where listening history comes from.
//!
//! The metrics engine only sees records; this module owns fetching them, either
//! live from the Spotify Web API or from a JSON snapshot on disk.

mod snapshot;
mod spotify;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{ArtistRecord, TrackRecord};

pub use snapshot::{Snapshot, SnapshotSource};
pub use spotify::SpotifyClient;

/// Upper bound on ids per artist lookup, imposed by the provider.
pub const MAX_ARTIST_BATCH: usize = 50;
/// Largest page the top-items endpoint serves.
pub const TOP_PAGE_SIZE: usize = 50;
/// The provider stops ranking top items after this many entries.
pub const MAX_TOP_TRACKS: usize = 100;

/// How far back the provider looks when ranking top tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[serde(alias = "short-term", alias = "short")]
    #[value(name = "short_term", alias = "short-term")]
    ShortTerm,
    #[serde(alias = "medium-term", alias = "medium")]
    #[value(name = "medium_term", alias = "medium-term")]
    MediumTerm,
    #[serde(alias = "long-term", alias = "long")]
    #[value(name = "long_term", alias = "long-term")]
    LongTerm,
}

impl TimeRange {
    /// Wire name used in API queries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "short term (~last 4 weeks)",
            Self::MediumTerm => "medium term (~last 6 months)",
            Self::LongTerm => "long term (~several years)",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no Spotify access token configured (set spotify.access_token or PERFORMATIVIFY__SPOTIFY__ACCESS_TOKEN)")]
    MissingToken,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait TrackSource {
    /// Up to `limit` of the user's top tracks, best ranked first.
    fn top_tracks(&self, range: TimeRange, limit: usize) -> Result<Vec<TrackRecord>, SourceError>;
}

pub trait ArtistSource {
    /// Artist records for already-deduplicated `ids`, in request order.
    /// Ids the provider does not know are skipped.
    fn artists(&self, ids: &[String]) -> Result<Vec<ArtistRecord>, SourceError>;
}

/// Primary artist ids of `tracks`, first occurrence wins, order preserved.
pub fn unique_artist_ids(tracks: &[TrackRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .filter(|t| seen.insert(t.primary_artist_id.as_str()))
        .map(|t| t.primary_artist_id.clone())
        .collect()
}

/// Split `ids` into request-sized batches, never larger than [`MAX_ARTIST_BATCH`].
pub fn artist_batches(ids: &[String], batch_size: usize) -> std::slice::Chunks<'_, String> {
    ids.chunks(batch_size.clamp(1, MAX_ARTIST_BATCH))
}

/// `(offset, size)` of each top-tracks page needed to collect `limit` tracks.
pub fn top_track_pages(limit: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..limit)
        .step_by(TOP_PAGE_SIZE)
        .map(move |offset| (offset, (limit - offset).min(TOP_PAGE_SIZE)))
}
