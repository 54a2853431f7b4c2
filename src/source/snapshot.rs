use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{ArtistRecord, TrackRecord};

use super::{ArtistSource, SourceError, TimeRange, TrackSource};

/// One fetch's worth of records, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tracks: Vec<TrackRecord>,
    #[serde(default)]
    pub artists: Vec<ArtistRecord>,
}

impl Snapshot {
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), SourceError> {
        let raw = serde_json::to_string_pretty(self).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Offline source backed by a [`Snapshot`] file.
///
/// The snapshot is assumed to already reflect the requested time range, so
/// `range` is ignored.
pub struct SnapshotSource {
    path: PathBuf,
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let snapshot = Snapshot::read(path)?;
        tracing::debug!(
            path = %path.display(),
            tracks = snapshot.tracks.len(),
            artists = snapshot.artists.len(),
            "loaded snapshot"
        );
        Ok(Self {
            path: path.to_path_buf(),
            snapshot,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackSource for SnapshotSource {
    fn top_tracks(&self, _range: TimeRange, limit: usize) -> Result<Vec<TrackRecord>, SourceError> {
        Ok(self.snapshot.tracks.iter().take(limit).cloned().collect())
    }
}

impl ArtistSource for SnapshotSource {
    fn artists(&self, ids: &[String]) -> Result<Vec<ArtistRecord>, SourceError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.snapshot.artists.iter().find(|a| &a.id == id))
            .cloned()
            .collect())
    }
}
