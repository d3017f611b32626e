//! Hadith search across the nine books

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::corpus::{CorpusSource, HADITH_BOOKS};
use super::types::{HadithBook, HadithResult};
use crate::error::Result;

/// Append matches from one book until `results` holds `limit` entries.
///
/// An entry matches when its Arabic text contains `query` verbatim, or its
/// English narrator or body contains `query_lower` ignoring case.
fn collect_matches(
    book_id: &str,
    book: &HadithBook,
    query: &str,
    query_lower: &str,
    limit: usize,
    results: &mut Vec<HadithResult>,
) {
    for entry in &book.hadiths {
        if results.len() >= limit {
            return;
        }

        let matched = entry.arabic.contains(query)
            || entry.english.narrator.to_lowercase().contains(query_lower)
            || entry.english.text.to_lowercase().contains(query_lower);

        if matched {
            results.push(HadithResult::new(book_id, entry));
        }
    }
}

/// Hadith search index
///
/// Books are read from the source on every search unless caching is
/// enabled, in which case each book is read once and kept.
pub struct HadithIndex {
    source: Arc<dyn CorpusSource>,
    books: Vec<&'static str>,
    cache: Option<RwLock<HashMap<&'static str, Arc<HadithBook>>>>,
}

impl HadithIndex {
    pub fn new(source: Arc<dyn CorpusSource>, cache_books: bool) -> Self {
        Self {
            source,
            books: HADITH_BOOKS.to_vec(),
            cache: cache_books.then(|| RwLock::new(HashMap::new())),
        }
    }

    pub fn books(&self) -> &[&'static str] {
        &self.books
    }

    pub async fn cached_books(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.read().await.len(),
            None => 0,
        }
    }

    async fn load_book(&self, book_id: &'static str) -> Result<Arc<HadithBook>> {
        if let Some(cache) = &self.cache {
            if let Some(book) = cache.read().await.get(book_id) {
                return Ok(Arc::clone(book));
            }
        }

        let book = Arc::new(self.source.load_hadith_book(book_id).await?);
        debug!("Loaded hadith book {} ({} hadiths)", book_id, book.hadiths.len());

        if let Some(cache) = &self.cache {
            cache.write().await.insert(book_id, Arc::clone(&book));
        }

        Ok(book)
    }

    /// Search every book in order, stopping at `limit` matches. A book that
    /// fails to load is logged and skipped.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<HadithResult> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for &book_id in &self.books {
            if results.len() >= limit {
                break;
            }

            match self.load_book(book_id).await {
                Ok(book) => collect_matches(book_id, &book, query, &query_lower, limit, &mut results),
                Err(e) => warn!("Skipping hadith book {}: {}", book_id, e),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::corpus::MemoryCorpus;
    use crate::search::types::{HadithEnglish, HadithEntry};

    fn search_books<'a, const N: usize>(books: [(&'a str, &'a HadithBook); N], query: &str, limit: usize) -> Vec<HadithResult> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();
        for (book_id, book) in books {
            collect_matches(book_id, book, query, &query_lower, limit, &mut results);
        }
        results
    }

    fn entry(id: u32, narrator: &str, text: &str) -> HadithEntry {
        HadithEntry {
            id,
            id_in_book: id,
            arabic: String::new(),
            english: HadithEnglish {
                narrator: narrator.to_string(),
                text: text.to_string(),
            },
        }
    }

    fn book(entries: Vec<HadithEntry>) -> HadithBook {
        HadithBook {
            hadiths: entries,
            ..HadithBook::default()
        }
    }

    #[test]
    fn test_matches_narrator_and_text_ignoring_case() {
        let b = book(vec![
            entry(1, "Narrated Abu Huraira:", "Charity does not decrease wealth."),
            entry(2, "Narrated 'Aisha:", "The most beloved deeds are the most regular."),
            entry(3, "Narrated Anas:", "None of you truly believes."),
        ]);

        let results = search_books([("bukhari", &b)], "ABU HURAIRA", 50);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id_in_book, 1);

        let results = search_books([("bukhari", &b)], "deeds", 50);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "/hadith/bukhari/2");
    }

    #[test]
    fn test_arabic_match_is_case_and_script_sensitive() {
        let mut e = entry(7, "", "");
        e.arabic = "الدين النصيحة".to_string();
        let b = book(vec![e]);

        assert_eq!(search_books([("muslim", &b)], "النصيحة", 50).len(), 1);
        assert!(search_books([("muslim", &b)], "نصيحه", 50).is_empty());
    }

    #[test]
    fn test_cap_is_global_across_books() {
        let first = book((1..=3).map(|i| entry(i, "", "prayer")).collect());
        let second = book((1..=3).map(|i| entry(i, "", "prayer")).collect());

        let results = search_books([("bukhari", &first), ("muslim", &second)], "prayer", 4);
        let ids: Vec<_> = results.iter().map(|r| (r.book_id.as_str(), r.id_in_book)).collect();
        assert_eq!(ids, vec![("bukhari", 1), ("bukhari", 2), ("bukhari", 3), ("muslim", 1)]);
    }

    #[tokio::test]
    async fn test_index_skips_failing_books() {
        let source = Arc::new(
            MemoryCorpus::new()
                .with_book("muslim", book(vec![entry(1, "", "fasting in Ramadan")]))
                .with_book("darimi", book(vec![entry(9, "", "fasting on Mondays")])),
        );
        let index = HadithIndex::new(source.clone(), false);

        let results = index.search("fasting", 50).await;
        let ids: Vec<_> = results.iter().map(|r| r.book_id.as_str()).collect();
        assert_eq!(ids, vec!["muslim", "darimi"]);
        assert_eq!(source.book_loads(), 9);
    }

    #[tokio::test]
    async fn test_index_stops_opening_books_once_capped() {
        let source = Arc::new(
            MemoryCorpus::new()
                .with_book("bukhari", book((1..=60).map(|i| entry(i, "", "zakat")).collect()))
                .with_book("muslim", book(vec![entry(1, "", "zakat")])),
        );
        let index = HadithIndex::new(source.clone(), false);

        let results = index.search("zakat", 50).await;
        assert_eq!(results.len(), 50);
        assert!(results.iter().all(|r| r.book_id == "bukhari"));
        assert_eq!(source.book_loads(), 1);
    }

    #[tokio::test]
    async fn test_books_reloaded_per_search_without_cache() {
        let source = Arc::new(MemoryCorpus::new().with_book("bukhari", book(vec![entry(1, "", "hajj")])));
        let index = HadithIndex::new(source.clone(), false);

        index.search("hajj", 50).await;
        index.search("hajj", 50).await;
        assert_eq!(source.book_loads(), 18);
        assert_eq!(index.cached_books().await, 0);
    }

    #[tokio::test]
    async fn test_cache_keeps_results_identical() {
        let source = Arc::new(MemoryCorpus::new().with_book("bukhari", book(vec![entry(1, "", "hajj")])));
        let index = HadithIndex::new(source.clone(), true);

        let first = index.search("hajj", 50).await;
        let loads_after_first = source.book_loads();
        let second = index.search("hajj", 50).await;

        assert_eq!(first, second);
        assert_eq!(index.cached_books().await, 1);
        // Only the failing books are retried
        assert_eq!(source.book_loads(), loads_after_first + 8);
    }
}
