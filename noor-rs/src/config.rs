//! Configuration for noor-rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NoorError, Result};

/// Hard upper bound on the number of results one search returns
pub const MAX_RESULTS_CAP: usize = 50;

/// Main service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Corpus file locations
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Calendar engine settings
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Per-IP rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_allow_any: bool,
}

/// Corpus configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Directory holding the corpus JSON documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Surah-keyed Arabic verse file, relative to `data_dir`
    #[serde(default = "default_quran_file")]
    pub quran_file: String,
    /// "chapter:verse"-keyed English translation file, relative to `data_dir`
    #[serde(default = "default_translation_file")]
    pub translation_file: String,
    /// Directory of per-book hadith files, relative to `data_dir`
    #[serde(default = "default_hadith_dir")]
    pub hadith_dir: String,
}

/// Calendar configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Days added to each Gregorian date before reading its Hijri date.
    /// Use -1 or +1 to follow a local moon sighting.
    #[serde(default)]
    pub hijri_offset_days: i64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a session searches
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters, as typed) return nothing
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Cap on results per search, at most `MAX_RESULTS_CAP`
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Keep parsed hadith books in memory between searches
    #[serde(default)]
    pub cache_hadith_books: bool,
}

/// Rate limit configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum requests per window per client IP
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_true() -> bool {
    true
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_quran_file() -> String {
    "quran.json".to_string()
}

fn default_translation_file() -> String {
    "quran_en.json".to_string()
}

fn default_hadith_dir() -> String {
    "hadith".to_string()
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_min_query_len() -> usize {
    2
}

fn default_max_results() -> usize {
    MAX_RESULTS_CAP
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    60
}

fn default_log_level() -> String {
    "noor_rs=info,tower_http=info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quran_file: default_quran_file(),
            translation_file: default_translation_file(),
            hadith_dir: default_hadith_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            max_results: default_max_results(),
            cache_hadith_books: false,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CorpusConfig {
    pub fn quran_path(&self) -> PathBuf {
        self.data_dir.join(&self.quran_file)
    }

    pub fn translation_path(&self) -> PathBuf {
        self.data_dir.join(&self.translation_file)
    }

    pub fn hadith_path(&self, book_id: &str) -> PathBuf {
        self.data_dir
            .join(&self.hadith_dir)
            .join(format!("{}.json", book_id))
    }
}

impl NoorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content)
            .map_err(|e| NoorError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration layered from defaults, an optional TOML file and
    /// `NOOR_*` environment variables (e.g. `NOOR_SERVER__LISTEN_ADDR`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::development())
            .map_err(|e| NoorError::Config(format!("Failed to build defaults: {}", e)))?;

        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path).format(::config::FileFormat::Toml),
            );
        }

        let config: Self = builder
            .add_source(
                ::config::Environment::with_prefix("NOOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| NoorError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "127.0.0.1:8080".to_string(),
                cors_allow_any: true,
            },
            corpus: CorpusConfig::default(),
            calendar: CalendarConfig::default(),
            search: SearchConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                NoorError::Config(format!(
                    "Invalid listen address '{}': {}",
                    self.server.listen_addr, e
                ))
            })?;

        if self.search.max_results == 0 || self.search.max_results > MAX_RESULTS_CAP {
            return Err(NoorError::Config(format!(
                "search.max_results must be between 1 and {}, got {}",
                MAX_RESULTS_CAP, self.search.max_results
            )));
        }

        if self.search.min_query_len == 0 {
            return Err(NoorError::Config("search.min_query_len must be at least 1".to_string()));
        }

        if self.calendar.hijri_offset_days.abs() > 3 {
            return Err(NoorError::Config(format!(
                "calendar.hijri_offset_days must be within ±3, got {}",
                self.calendar.hijri_offset_days
            )));
        }

        if self.rate_limit.enabled && (self.rate_limit.max_requests == 0 || self.rate_limit.window_seconds == 0) {
            return Err(NoorError::Config(
                "rate_limit.max_requests and rate_limit.window_seconds must be positive".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(NoorError::Config(format!("Unknown log format '{}'", other))),
        }
    }
}

impl Default for NoorConfig {
    fn default() -> Self {
        Self::development()
    }
}
