//! Spotify Web API client for top tracks and artist details.
//!
//! Authentication is out of scope: the client is handed an already-issued
//! bearer token with the `user-top-read` scope.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::SpotifySettings;
use crate::model::{ArtistRecord, TrackRecord};

use super::{ArtistSource, SourceError, TimeRange, TrackSource, artist_batches, top_track_pages};

pub struct SpotifyClient {
    client: Client,
    api_base: String,
    token: String,
    artist_batch_size: usize,
}

#[derive(Deserialize)]
struct TopTracksPage {
    #[serde(default)]
    items: Vec<Option<ApiTrack>>,
}

#[derive(Deserialize)]
pub(super) struct ApiTrack {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<ApiArtistRef>,
    #[serde(default)]
    explicit: bool,
    #[serde(default)]
    popularity: u32,
    #[serde(default)]
    album: ApiAlbum,
    preview_url: Option<String>,
}

#[derive(Deserialize)]
struct ApiArtistRef {
    id: Option<String>,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize, Default)]
struct ApiAlbum {
    release_date: Option<String>,
    #[serde(default)]
    available_markets: Vec<String>,
}

#[derive(Deserialize)]
struct ArtistsPage {
    #[serde(default)]
    artists: Vec<Option<ApiArtist>>,
}

#[derive(Deserialize)]
pub(super) struct ApiArtist {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    popularity: u32,
    followers: Option<ApiFollowers>,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Deserialize)]
struct ApiFollowers {
    total: Option<u64>,
}

impl ApiTrack {
    /// Shape an API item into a record; items without an id or any artist are dropped.
    pub(super) fn into_record(self) -> Option<TrackRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let primary_artist_id = self.artists.first()?.id.clone()?;

        Some(TrackRecord {
            id,
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
            primary_artist_id,
            explicit: self.explicit,
            popularity: self.popularity,
            release_date: self.album.release_date.filter(|d| !d.is_empty()),
            markets: self.album.available_markets.len() as u32,
            preview: self.preview_url.is_some_and(|u| !u.is_empty()),
        })
    }
}

impl From<ApiArtist> for ArtistRecord {
    fn from(a: ApiArtist) -> Self {
        ArtistRecord {
            id: a.id,
            name: a.name,
            popularity: a.popularity,
            followers: a.followers.and_then(|f| f.total),
            genres: a.genres,
        }
    }
}

impl SpotifyClient {
    pub fn new(settings: &SpotifySettings) -> Result<Self, SourceError> {
        let token = settings
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SourceError::MissingToken)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token,
            artist_batch_size: settings.artist_batch_size,
        })
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).bearer_auth(&self.token).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.json()?)
    }
}

impl TrackSource for SpotifyClient {
    fn top_tracks(&self, range: TimeRange, limit: usize) -> Result<Vec<TrackRecord>, SourceError> {
        let mut tracks = Vec::new();

        for (offset, page_size) in top_track_pages(limit) {
            let url = format!(
                "{}/me/top/tracks?time_range={}&limit={}&offset={}",
                self.api_base,
                range.as_str(),
                page_size,
                offset
            );
            let page: TopTracksPage = self.get(&url)?;
            let served = page.items.len();

            tracks.extend(page.items.into_iter().flatten().filter_map(ApiTrack::into_record));

            if served < page_size {
                break;
            }
        }

        tracing::info!(range = range.as_str(), count = tracks.len(), "fetched top tracks");
        Ok(tracks)
    }
}

impl ArtistSource for SpotifyClient {
    fn artists(&self, ids: &[String]) -> Result<Vec<ArtistRecord>, SourceError> {
        let mut artists = Vec::with_capacity(ids.len());

        for batch in artist_batches(ids, self.artist_batch_size) {
            let url = format!("{}/artists?ids={}", self.api_base, batch.join(","));
            let page: ArtistsPage = self.get(&url)?;
            artists.extend(page.artists.into_iter().flatten().map(ArtistRecord::from));
        }

        tracing::info!(requested = ids.len(), count = artists.len(), "fetched artists");
        Ok(artists)
    }
}
