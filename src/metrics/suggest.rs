use super::score::MetricsResult;

/// A rule fires when `metric(m) < threshold`.
pub struct SuggestionRule {
    pub name: &'static str,
    pub metric: fn(&MetricsResult) -> f64,
    pub threshold: f64,
    pub message: &'static str,
}

impl SuggestionRule {
    pub fn triggers(&self, m: &MetricsResult) -> bool {
        (self.metric)(m) < self.threshold
    }
}

/// Evaluated top to bottom; every triggered message is kept.
pub const RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "artist_diversity",
        metric: |m| m.artist_diversity,
        threshold: 0.65,
        message: "Rotate in more artists to avoid monoculture vibes.",
    },
    SuggestionRule {
        name: "artist_mainstream",
        metric: |m| m.artist_mainstream,
        threshold: 0.5,
        message: "Add a couple of big-name artists for social flex.",
    },
    SuggestionRule {
        name: "artist_niche",
        metric: |m| m.artist_niche,
        threshold: 0.3,
        message: "Slip in a few low-pop indie names for \u{2018}I knew them early\u{2019}.",
    },
    SuggestionRule {
        name: "genre_variety",
        metric: |m| m.genre_variety,
        threshold: 0.5,
        message: "Widen your genre net to look intentionally curated.",
    },
];

pub const FALLBACK_SUGGESTION: &str =
    "You\u{2019}re already delightfully performative. Maintain the illusion.";

/// Advisory messages for `metrics`; never empty.
pub fn compute_suggestions(metrics: &MetricsResult) -> Vec<String> {
    let tips: Vec<String> = RULES
        .iter()
        .filter(|rule| rule.triggers(metrics))
        .map(|rule| rule.message.to_string())
        .collect();

    if tips.is_empty() {
        vec![FALLBACK_SUGGESTION.to_string()]
    } else {
        tips
    }
}
