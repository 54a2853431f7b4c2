use super::*;
use crate::model::{ArtistRecord, TrackRecord};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn track(id: &str, artist_id: &str, popularity: u32, release: Option<&str>) -> TrackRecord {
    TrackRecord {
        id: id.into(),
        name: format!("Song {id}"),
        artists: vec![format!("Artist {artist_id}")],
        primary_artist_id: artist_id.into(),
        explicit: false,
        popularity,
        release_date: release.map(str::to_string),
        markets: 100,
        preview: false,
    }
}

fn artist(id: &str, popularity: u32, followers: Option<u64>, genres: &[&str]) -> ArtistRecord {
    ArtistRecord {
        id: id.into(),
        name: format!("Artist {id}"),
        popularity,
        followers,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn metrics_with(
    artist_diversity: f64,
    artist_mainstream: f64,
    artist_niche: f64,
    genre_variety: f64,
) -> MetricsResult {
    let mut m = compute_metrics_at(&[track("t", "a", 50, None)], &[], today()).unwrap();
    m.artist_diversity = artist_diversity;
    m.artist_mainstream = artist_mainstream;
    m.artist_niche = artist_niche;
    m.genre_variety = genre_variety;
    m
}

#[test]
fn clamp01_is_idempotent_and_bounded() {
    for x in [-3.0, -0.0, 0.0, 0.25, 1.0, 1.5, 42.0] {
        let c = clamp01(x);
        assert!((0.0..=1.0).contains(&c));
        assert_eq!(clamp01(c), c);
    }
    assert!(clamp01(0.2) <= clamp01(0.7));
}

#[test]
fn pct_rounds_and_stays_in_range() {
    assert_eq!(pct(-1.0), 0);
    assert_eq!(pct(0.0), 0);
    assert_eq!(pct(0.504), 50);
    assert_eq!(pct(0.505), 51);
    assert_eq!(pct(1.0), 100);
    assert_eq!(pct(7.0), 100);
}

#[test]
fn shannon_entropy_boundaries() {
    assert_eq!(shannon_entropy(&[]), 0.0);
    assert_eq!(shannon_entropy(&[0, 0]), 0.0);
    assert_eq!(shannon_entropy(&[12]), 0.0);
    assert!((shannon_entropy(&[3, 3]) - 1.0).abs() < 1e-9);
    assert!((shannon_entropy(&[1, 1, 1, 1, 1]) - 1.0).abs() < 1e-9);
}

#[test]
fn shannon_entropy_drops_for_skewed_distributions() {
    let skewed = shannon_entropy(&[9, 1]);
    assert!(skewed > 0.0 && skewed < 1.0);
    assert!(shannon_entropy(&[5, 5]) > skewed);
}

#[test]
fn herfindahl_concentration() {
    assert!(approx(herfindahl(&[1.0]), 1.0));
    assert!(approx(herfindahl(&[0.25; 4]), 0.25));
    assert!(approx(herfindahl(&[0.2; 5]), 0.2));
    assert_eq!(herfindahl(&[]), 0.0);
}

#[test]
fn months_since_parses_partial_dates() {
    assert_eq!(months_since(Some("2020"), today()), Some(53));
    assert_eq!(months_since(Some("2020-06"), today()), Some(48));
    assert_eq!(months_since(Some("2020-06-15"), today()), Some(48));
    assert_eq!(months_since(Some("2024-06-30"), today()), Some(0));
    assert_eq!(months_since(Some("2024-08"), today()), Some(-2));
}

#[test]
fn months_since_unknown_for_missing_or_malformed() {
    assert_eq!(months_since(None, today()), None);
    assert_eq!(months_since(Some(""), today()), None);
    assert_eq!(months_since(Some("not-a-date"), today()), None);
    assert_eq!(months_since(Some("2020-13"), today()), None);
    assert_eq!(months_since(Some("2021-02-30"), today()), None);
}

#[test]
fn safe_average_skips_unknowns() {
    assert_eq!(safe_average(Vec::<Option<f64>>::new()), None);
    assert_eq!(safe_average(vec![None, None]), None);
    assert_eq!(safe_average(vec![Some(1.0), None, Some(0.0)]), Some(0.5));
}

#[test]
fn compute_metrics_empty_tracks_is_nothing_to_score() {
    assert!(compute_metrics(&[], &[]).is_none());
    assert!(compute_metrics_at(&[], &[artist("a", 50, None, &[])], today()).is_none());
}

#[test]
fn single_track_single_artist() {
    let mut t = track("t1", "a1", 80, Some("2024-06-15"));
    t.explicit = true;
    t.markets = 200;
    let a = artist("a1", 80, Some(5_000_000), &["pop"]);

    let m = compute_metrics_at(&[t.clone()], &[a.clone()], today()).unwrap();
    assert!(approx(m.pop, 0.8));
    assert_eq!(m.explicit, 1.0);
    assert!(approx(m.recency, 1.0));
    assert_eq!(m.globalness, 1.0);
    assert_eq!(m.genre_variety, 0.0);
    assert_eq!(m.artist_diversity, 0.0);
    assert_eq!(m.unique_genres, 1);
    assert_eq!(m.unique_artists, 1);
    assert!(!m.have_features);
    assert_eq!(m.audio, AudioFeatures::UNAVAILABLE);

    let a_follow = (5_000_001f64).log10() / 7.0;
    let mainstream = 0.7 * 0.8 + 0.3 * a_follow;
    assert!(approx(m.artist_mainstream, mainstream));

    let expected = 0.28 * 0.8 + 0.12 + 0.14 + 0.10 + 0.06 * mainstream;
    assert!(approx(m.score, expected));

    let again = compute_metrics_at(&[t], &[a], today()).unwrap();
    assert_eq!(m, again);
}

#[test]
fn recency_excludes_unparseable_dates_and_decays_linearly() {
    let tracks = vec![
        track("t1", "a", 50, Some("2019-06")),
        track("t2", "a", 50, Some("garbage")),
        track("t3", "a", 50, None),
    ];
    let m = compute_metrics_at(&tracks, &[], today()).unwrap();
    assert!(approx(m.recency, 0.5));

    let old = compute_metrics_at(&[track("t", "a", 50, Some("1990"))], &[], today()).unwrap();
    assert_eq!(old.recency, 0.0);

    let future = compute_metrics_at(&[track("t", "a", 50, Some("2025-01"))], &[], today()).unwrap();
    assert_eq!(future.recency, 1.0);

    let none = compute_metrics_at(&[track("t", "a", 50, None)], &[], today()).unwrap();
    assert_eq!(none.recency, 0.0);
}

#[test]
fn globalness_saturates_at_200_markets() {
    let mut a = track("t1", "a", 50, None);
    a.markets = 400;
    let mut b = track("t2", "a", 50, None);
    b.markets = 50;
    let m = compute_metrics_at(&[a, b], &[], today()).unwrap();
    assert!(approx(m.globalness, (1.0 + 0.25) / 2.0));
}

#[test]
fn artist_diversity_reflects_concentration() {
    let tracks = vec![
        track("t1", "a", 50, None),
        track("t2", "b", 50, None),
        track("t3", "c", 50, None),
        track("t4", "d", 50, None),
    ];
    assert!(approx(artist_diversity(&tracks), 0.75));

    let lopsided = vec![
        track("t1", "a", 50, None),
        track("t2", "a", 50, None),
        track("t3", "a", 50, None),
        track("t4", "b", 50, None),
    ];
    assert!(approx(artist_diversity(&lopsided), 1.0 - (0.75 * 0.75 + 0.25 * 0.25)));
}

#[test]
fn genres_pool_duplicates_across_artists() {
    let tracks = vec![track("t1", "a", 50, None), track("t2", "b", 50, None)];
    let artists = vec![
        artist("a", 30, Some(10), &["indie", "pop"]),
        artist("b", 90, Some(10), &["pop", "rock"]),
    ];
    let m = compute_metrics_at(&tracks, &artists, today()).unwrap();
    assert_eq!(m.unique_genres, 3);
    assert!(approx(m.genre_variety, shannon_entropy(&[1, 2, 1])));
    assert!(approx(m.artist_niche, 0.5));
    assert!(approx(m.artist_popularity, 0.6));
}

#[test]
fn missing_followers_are_excluded_from_average() {
    let tracks = vec![track("t1", "a", 50, None), track("t2", "b", 50, None)];
    let artists = vec![artist("a", 50, Some(9_999_999), &[]), artist("b", 50, None, &[])];
    let m = compute_metrics_at(&tracks, &artists, today()).unwrap();
    assert!(approx(m.artist_followers, 1.0));
}

#[test]
fn empty_artist_list_zeroes_artist_metrics() {
    let m = compute_metrics_at(&[track("t1", "a", 60, None)], &[], today()).unwrap();
    assert_eq!(m.artist_popularity, 0.0);
    assert_eq!(m.artist_followers, 0.0);
    assert_eq!(m.artist_mainstream, 0.0);
    assert_eq!(m.artist_niche, 0.0);
    assert_eq!(m.genre_variety, 0.0);
    assert_eq!(m.unique_genres, 0);
    assert_eq!(m.unique_artists, 0);
}

#[test]
fn score_weights_sum_to_one() {
    assert!(approx(SCORE_WEIGHTS.total(), 1.0));
    assert_eq!(SCORE_WEIGHTS_VERSION, 1);
}

#[test]
fn score_is_always_clamped() {
    let mut tracks = Vec::new();
    for i in 0..20 {
        let mut t = track(&format!("t{i}"), &format!("a{i}"), 100, Some("2024-06"));
        t.explicit = true;
        t.markets = 500;
        tracks.push(t);
    }
    let artists: Vec<ArtistRecord> = (0..20)
        .map(|i| artist(&format!("a{i}"), 100, Some(u64::MAX), &[format!("g{i}").as_str()]))
        .collect();
    let m = compute_metrics_at(&tracks, &artists, today()).unwrap();
    assert!((0.0..=1.0).contains(&m.score));
    assert!(m.artist_followers > 1.0);
    assert_eq!(m.artist_mainstream, 1.0);
}

#[test]
fn fields_flatten_every_metric_in_order() {
    let m = compute_metrics_at(&[track("t1", "a", 60, None)], &[], today()).unwrap();
    let fields = m.fields();
    let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
    assert_eq!(names[0], "score");
    assert_eq!(names.len(), 18);
    assert!(matches!(fields[1].1, MetricValue::Flag(false)));
    assert!(
        fields
            .iter()
            .filter(|(_, v)| matches!(v, MetricValue::Feature(FeatureValue::Unavailable)))
            .count()
            == 4
    );
}

#[test]
fn suggestions_fallback_when_everything_passes() {
    let m = metrics_with(0.9, 0.9, 0.5, 0.9);
    assert_eq!(compute_suggestions(&m), vec![FALLBACK_SUGGESTION.to_string()]);
}

#[test]
fn suggestions_all_rules_in_table_order() {
    let m = metrics_with(0.1, 0.1, 0.1, 0.1);
    let tips = compute_suggestions(&m);
    let expected: Vec<String> = RULES.iter().map(|r| r.message.to_string()).collect();
    assert_eq!(tips, expected);
    assert_eq!(tips.len(), 4);
    assert!(tips[0].starts_with("Rotate in more artists"));
    assert!(tips[3].starts_with("Widen your genre net"));
}

#[test]
fn suggestions_threshold_is_strict() {
    let m = metrics_with(0.65, 0.5, 0.3, 0.5);
    assert_eq!(compute_suggestions(&m), vec![FALLBACK_SUGGESTION.to_string()]);

    let m = metrics_with(0.9, 0.49, 0.9, 0.9);
    assert_eq!(
        compute_suggestions(&m),
        vec!["Add a couple of big-name artists for social flex.".to_string()]
    );
}

#[test]
fn feature_values_serialize_with_explicit_status() {
    let unavailable = serde_json::to_value(FeatureValue::Unavailable).unwrap();
    assert_eq!(unavailable, serde_json::json!({"status": "unavailable"}));

    let available = serde_json::to_value(FeatureValue::Available(0.5)).unwrap();
    assert_eq!(available, serde_json::json!({"status": "available", "value": 0.5}));
}
