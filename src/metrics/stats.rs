//! Data-agnostic statistical helpers shared by feature extraction and scoring.

use chrono::{Datelike, NaiveDate};

/// Guards the logarithm against zero-probability categories.
const LOG_EPSILON: f64 = 1e-12;

/// Restrict `x` to `[0, 1]`.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a unit-interval value to a whole percentage in `0..=100`.
pub fn pct(x: f64) -> u8 {
    (100.0 * clamp01(x)).round() as u8
}

/// Normalized Shannon entropy of a set of category counts.
///
/// Returns `0.0` when the total is zero or fewer than two categories exist,
/// otherwise the entropy divided by `log2(k)` so the result lands in `[0, 1]`
/// regardless of how many categories were observed.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 || counts.len() <= 1 {
        return 0.0;
    }

    let total = total as f64;
    let h: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            -p * (p + LOG_EPSILON).log2()
        })
        .sum();

    h / (counts.len() as f64).log2()
}

/// Herfindahl concentration index: the sum of squared shares.
pub fn herfindahl(proportions: &[f64]) -> f64 {
    proportions.iter().map(|p| p * p).sum()
}

/// Whole calendar months between a partial release date and `today`.
///
/// Day of month is ignored. Returns `None` for absent, malformed or invalid
/// dates so callers can drop them from averages instead of scoring them as zero.
pub fn months_since(date: Option<&str>, today: NaiveDate) -> Option<i64> {
    let then = parse_partial_date(date?)?;
    let years = i64::from(today.year() - then.year());
    let months = i64::from(today.month()) - i64::from(then.month());
    Some(12 * years + months)
}

fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    let num = |i: usize| parts.get(i).map(|p| p.trim().parse::<u32>());

    let year: i32 = parts.first()?.trim().parse().ok()?;
    let month = match num(1) {
        Some(m) => m.ok()?,
        None => 1,
    };
    let day = match num(2) {
        Some(d) => d.ok()?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Mean of the known values; `None` when nothing is known.
pub fn safe_average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 { None } else { Some(sum / n as f64) }
}
