//! noor-rs: Hijri calendar and Quran/Hadith search service
//!
//! Computes Hijri dates and countdowns to Islamic observances, and runs
//! substring search over the Quran and nine Hadith collections.
//!
//! # Features
//!
//! - Tabular Hijri/Gregorian conversion with an optional sighting offset
//! - Upcoming events, month views, recommended fasting days, moon phases
//! - Capped Quran and Hadith search with debounced search-as-you-type sessions
//! - JSON REST API and a WebSocket search endpoint
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8080"
//! cors_allow_any = true
//!
//! [corpus]
//! data_dir = "/var/lib/noor/data"
//! quran_file = "quran.json"
//! translation_file = "quran_en.json"
//! hadith_dir = "hadith"
//!
//! [calendar]
//! hijri_offset_days = 0
//!
//! [search]
//! debounce_ms = 600
//! min_query_len = 2
//! max_results = 50
//! cache_hadith_books = false
//!
//! [rate_limit]
//! enabled = true
//! max_requests = 100
//! window_seconds = 60
//!
//! [logging]
//! level = "noor_rs=info,tower_http=info"
//! format = "pretty"
//! ```

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod search;

pub use api::ApiServer;
pub use config::NoorConfig;
pub use error::{NoorError, Result};
