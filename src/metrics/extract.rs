use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{ArtistRecord, TrackRecord};

use super::stats::{clamp01, herfindahl, months_since, safe_average, shannon_entropy};

/// Releases this many months old (or older) carry no recency.
const RECENCY_WINDOW_MONTHS: i64 = 120;
/// Market count at which a track counts as fully global.
const GLOBAL_MARKETS: f64 = 200.0;
/// Rescales `log10(1 + followers)` so ~10M followers lands near 1.0.
const FOLLOWER_LOG_SCALE: f64 = 7.0;
/// Artists below this popularity count as niche.
const NICHE_POPULARITY: u32 = 40;

/// Scalar signals extracted from one snapshot of tracks and artists.
///
/// Averages that could not be computed are `None`; the aggregator decides how
/// to treat them.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub pop: Option<f64>,
    pub explicit: Option<f64>,
    pub recency: Option<f64>,
    pub globalness: Option<f64>,
    pub artist_pop: Option<f64>,
    pub artist_follow: Option<f64>,
    pub genre_variety: f64,
    pub artist_diversity: f64,
    pub artist_niche: f64,
    pub unique_genres: usize,
    pub unique_artists: usize,
}

pub fn extract(tracks: &[TrackRecord], artists: &[ArtistRecord], today: NaiveDate) -> Signals {
    let pop = safe_average(tracks.iter().map(|t| Some(f64::from(t.popularity) / 100.0)));
    let explicit = safe_average(
        tracks
            .iter()
            .map(|t| Some(if t.explicit { 1.0 } else { 0.0 })),
    );
    let recency = safe_average(
        tracks
            .iter()
            .map(|t| months_since(t.release_date.as_deref(), today).map(recency_of)),
    );
    let globalness = safe_average(
        tracks
            .iter()
            .map(|t| Some((f64::from(t.markets) / GLOBAL_MARKETS).min(1.0))),
    );

    let artist_pop = safe_average(artists.iter().map(|a| Some(f64::from(a.popularity) / 100.0)));
    let artist_follow = safe_average(artists.iter().map(|a| {
        a.followers
            .map(|f| (1.0 + f as f64).log10() / FOLLOWER_LOG_SCALE)
    }));

    let genre_counts = count_by(artists.iter().flat_map(|a| a.genres.iter().map(String::as_str)));
    let genre_variety = shannon_entropy(&genre_counts.values().copied().collect::<Vec<_>>());

    let artist_niche = if artists.is_empty() {
        0.0
    } else {
        let niche = artists
            .iter()
            .filter(|a| a.popularity < NICHE_POPULARITY)
            .count();
        niche as f64 / artists.len() as f64
    };

    Signals {
        pop,
        explicit,
        recency,
        globalness,
        artist_pop,
        artist_follow,
        genre_variety,
        artist_diversity: artist_diversity(tracks),
        artist_niche,
        unique_genres: genre_counts.len(),
        unique_artists: artists.len(),
    }
}

/// `1 - herfindahl` of each primary artist's share of the track list.
pub fn artist_diversity(tracks: &[TrackRecord]) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }

    let n = tracks.len() as f64;
    let shares: Vec<f64> = count_by(tracks.iter().map(|t| t.primary_artist_id.as_str()))
        .values()
        .map(|&c| c as f64 / n)
        .collect();

    1.0 - herfindahl(&shares)
}

fn recency_of(months: i64) -> f64 {
    let months = months.min(RECENCY_WINDOW_MONTHS) as f64;
    clamp01(1.0 - months / RECENCY_WINDOW_MONTHS as f64)
}

// Sorted keys keep float summation order, and therefore output, stable across runs.
fn count_by<'a, I>(items: I) -> BTreeMap<&'a str, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}
