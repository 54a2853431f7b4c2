use serde::Deserialize;

use crate::source::TimeRange;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/performativify/config.toml` or
/// `~/.config/performativify/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `PERFORMATIVIFY__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub fetch: FetchSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotifySettings {
    /// Bearer token with the `user-top-read` scope.
    pub access_token: Option<String>,
    /// Web API root, without trailing slash.
    pub api_base: String,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
    /// Artist ids per lookup request (1..=50).
    pub artist_batch_size: usize,
}

impl Default for SpotifySettings {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base: "https://api.spotify.com/v1".to_string(),
            timeout_secs: 30,
            artist_batch_size: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub time_range: TimeRange,
    /// How many top tracks to analyze.
    pub limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            time_range: TimeRange::ShortTerm,
            limit: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: OutputFormat,
    /// Number of cells in each percentage bar.
    pub bar_width: usize,
    /// Style headings with ANSI escapes (text format only).
    pub color: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            bar_width: 20,
            color: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[serde(alias = "txt", alias = "plain")]
    Text,
    Json,
    Toml,
}
