//! Search manager
//!
//! Provides a high-level interface over the Quran and Hadith indexes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

use super::corpus::CorpusSource;
use super::hadith::HadithIndex;
use super::quran::QuranIndex;
use super::types::*;
use crate::config::{SearchConfig, MAX_RESULTS_CAP};
use crate::error::Result;

/// Search manager
pub struct SearchManager {
    quran: QuranIndex,
    hadith: HadithIndex,
    min_query_len: usize,
    max_results: usize,
    searches_run: AtomicU64,
}

impl SearchManager {
    pub fn new(source: Arc<dyn CorpusSource>, config: &SearchConfig) -> Self {
        Self {
            quran: QuranIndex::new(Arc::clone(&source)),
            hadith: HadithIndex::new(source, config.cache_hadith_books),
            min_query_len: config.min_query_len,
            max_results: config.max_results.min(MAX_RESULTS_CAP),
            searches_run: AtomicU64::new(0),
        }
    }

    /// Whether `query` is searched at all: it must hold something other
    /// than whitespace and be at least the minimum length as typed
    pub fn accepts(&self, query: &str) -> bool {
        !query.trim().is_empty() && query.chars().count() >= self.min_query_len
    }

    /// Search one tab for `query` exactly as typed. Queries that are not
    /// accepted return an empty set without touching the corpus; a Quran
    /// corpus failure is returned.
    pub async fn try_search(&self, tab: SearchTab, query: &str) -> Result<SearchResults> {
        if !self.accepts(query) {
            return Ok(SearchResults::empty(query, tab));
        }

        self.searches_run.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();

        let results: Vec<SearchResult> = match tab {
            SearchTab::Quran => self
                .quran
                .search(query, self.max_results)
                .await?
                .into_iter()
                .map(SearchResult::Quran)
                .collect(),
            SearchTab::Hadith => self
                .hadith
                .search(query, self.max_results)
                .await
                .into_iter()
                .map(SearchResult::Hadith)
                .collect(),
        };

        let total = results.len();
        let query_time_ms = start.elapsed().as_millis() as u64;
        debug!("{} search '{}' matched {} in {}ms", tab, query, total, query_time_ms);

        Ok(SearchResults {
            query: query.to_string(),
            tab,
            results,
            total,
            truncated: total >= self.max_results,
            query_time_ms,
        })
    }

    /// Search one tab, degrading any failure to an empty result set
    pub async fn search(&self, tab: SearchTab, query: &str) -> SearchResults {
        match self.try_search(tab, query).await {
            Ok(results) => results,
            Err(e) => {
                error!("{} search for '{}' failed: {}", tab, query, e);
                SearchResults::empty(query, tab)
            }
        }
    }

    /// Get index status
    pub async fn status(&self) -> IndexStatus {
        IndexStatus {
            quran_loaded: self.quran.is_loaded(),
            quran_verses: self.quran.verse_count(),
            hadith_books: self.hadith.books().to_vec(),
            cached_hadith_books: self.hadith.cached_books().await,
            searches_run: self.searches_run.load(Ordering::Relaxed),
        }
    }
}
