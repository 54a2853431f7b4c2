use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::model::{ArtistRecord, TrackRecord};

use super::extract::{Signals, extract};
use super::stats::clamp01;

/// Bumped whenever [`SCORE_WEIGHTS`] change; scores from different versions are
/// not comparable.
pub const SCORE_WEIGHTS_VERSION: u32 = 1;

/// Weights of the composite score, in the order of [`ScoreWeights::terms`].
pub const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
    pop: 0.28,
    explicit: 0.12,
    recency: 0.14,
    globalness: 0.10,
    genre_variety: 0.17,
    artist_diversity: 0.13,
    artist_mainstream: 0.06,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub pop: f64,
    pub explicit: f64,
    pub recency: f64,
    pub globalness: f64,
    pub genre_variety: f64,
    pub artist_diversity: f64,
    pub artist_mainstream: f64,
}

impl ScoreWeights {
    /// Named `(weight, signal)` terms of the linear combination.
    pub fn terms(&self, m: &MetricsResult) -> [(&'static str, f64, f64); 7] {
        [
            ("pop", self.pop, m.pop),
            ("explicit", self.explicit, m.explicit),
            ("recency", self.recency, m.recency),
            ("globalness", self.globalness, m.globalness),
            ("genre_variety", self.genre_variety, m.genre_variety),
            ("artist_diversity", self.artist_diversity, m.artist_diversity),
            ("artist_mainstream", self.artist_mainstream, m.artist_mainstream),
        ]
    }

    pub fn total(&self) -> f64 {
        self.pop
            + self.explicit
            + self.recency
            + self.globalness
            + self.genre_variety
            + self.artist_diversity
            + self.artist_mainstream
    }
}

/// A value that the upstream provider may no longer be able to supply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FeatureValue {
    #[allow(dead_code)]
    Available(f64),
    Unavailable,
}

/// Audio-analysis placeholders. The provider no longer serves audio features,
/// so these are always [`FeatureValue::Unavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub danceability: FeatureValue,
    pub energy: FeatureValue,
    pub valence: FeatureValue,
    pub acousticness: FeatureValue,
}

impl AudioFeatures {
    pub const UNAVAILABLE: Self = Self {
        danceability: FeatureValue::Unavailable,
        energy: FeatureValue::Unavailable,
        valence: FeatureValue::Unavailable,
        acousticness: FeatureValue::Unavailable,
    };
}

/// One scalar in the flattened view of a [`MetricsResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Ratio(f64),
    Count(usize),
    Flag(bool),
    Feature(FeatureValue),
}

/// Everything the engine computed for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    pub score: f64,
    pub have_features: bool,
    pub pop: f64,
    pub explicit: f64,
    pub recency: f64,
    pub globalness: f64,
    pub artist_popularity: f64,
    pub artist_followers: f64,
    pub genre_variety: f64,
    pub artist_diversity: f64,
    pub artist_mainstream: f64,
    pub artist_niche: f64,
    pub unique_genres: usize,
    pub unique_artists: usize,
    pub audio: AudioFeatures,
}

impl MetricsResult {
    /// Flat `name -> value` view, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, MetricValue)> {
        use MetricValue::*;
        vec![
            ("score", Ratio(self.score)),
            ("have_features", Flag(self.have_features)),
            ("pop", Ratio(self.pop)),
            ("explicit", Ratio(self.explicit)),
            ("recency", Ratio(self.recency)),
            ("globalness", Ratio(self.globalness)),
            ("artist_popularity", Ratio(self.artist_popularity)),
            ("artist_followers", Ratio(self.artist_followers)),
            ("genre_variety", Ratio(self.genre_variety)),
            ("artist_diversity", Ratio(self.artist_diversity)),
            ("artist_mainstream", Ratio(self.artist_mainstream)),
            ("artist_niche", Ratio(self.artist_niche)),
            ("unique_genres", Count(self.unique_genres)),
            ("unique_artists", Count(self.unique_artists)),
            ("danceability", Feature(self.audio.danceability)),
            ("energy", Feature(self.audio.energy)),
            ("valence", Feature(self.audio.valence)),
            ("acousticness", Feature(self.audio.acousticness)),
        ]
    }
}

/// Score a snapshot against today's local date.
///
/// Returns `None` when there are no tracks: there is nothing to score.
pub fn compute_metrics(tracks: &[TrackRecord], artists: &[ArtistRecord]) -> Option<MetricsResult> {
    compute_metrics_at(tracks, artists, Local::now().date_naive())
}

/// Score a snapshot against a fixed reference date.
pub fn compute_metrics_at(
    tracks: &[TrackRecord],
    artists: &[ArtistRecord],
    today: NaiveDate,
) -> Option<MetricsResult> {
    if tracks.is_empty() {
        return None;
    }
    Some(aggregate(&extract(tracks, artists, today)))
}

/// Package extracted signals and derive the composite score.
///
/// This is the only place unknown averages collapse to `0.0`.
pub fn aggregate(s: &Signals) -> MetricsResult {
    let artist_popularity = s.artist_pop.unwrap_or(0.0);
    let artist_followers = s.artist_follow.unwrap_or(0.0);

    let mut m = MetricsResult {
        score: 0.0,
        have_features: false,
        pop: clamp01(s.pop.unwrap_or(0.0)),
        explicit: clamp01(s.explicit.unwrap_or(0.0)),
        recency: clamp01(s.recency.unwrap_or(0.0)),
        globalness: clamp01(s.globalness.unwrap_or(0.0)),
        artist_popularity: clamp01(artist_popularity),
        artist_followers,
        genre_variety: clamp01(s.genre_variety),
        artist_diversity: clamp01(s.artist_diversity),
        artist_mainstream: clamp01(0.7 * artist_popularity + 0.3 * artist_followers),
        artist_niche: clamp01(s.artist_niche),
        unique_genres: s.unique_genres,
        unique_artists: s.unique_artists,
        audio: AudioFeatures::UNAVAILABLE,
    };

    let raw: f64 = SCORE_WEIGHTS
        .terms(&m)
        .iter()
        .map(|(_, weight, signal)| weight * signal)
        .sum();
    m.score = clamp01(raw);
    m
}
