//! Listening-history records consumed by the metrics engine.
//!
//! These mirror what the track and artist sources hand over: already fetched,
//! already shaped, one record per top-track entry and one per unique artist.

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the user's top tracks, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    /// Display names of every credited artist.
    #[serde(default)]
    pub artists: Vec<String>,
    pub primary_artist_id: String,
    #[serde(default, deserialize_with = "flag")]
    pub explicit: bool,
    /// Provider popularity, 0..=100.
    #[serde(default)]
    pub popularity: u32,
    /// Partial ISO date: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Number of markets the track is available in.
    #[serde(default)]
    pub markets: u32,
    #[serde(default, deserialize_with = "flag")]
    pub preview: bool,
}

/// One record per unique primary artist of the track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Provider popularity, 0..=100.
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Accept both `true`/`false` and the `0`/`1` flags older snapshots carry.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
